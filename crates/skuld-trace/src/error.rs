//! Error types for trace construction.

use skuld_ast::EvalError;
use thiserror::Error;

/// Errors that abort a trace build. Analysis is single-pass, so every
/// variant is fatal to the run; no partial trace is valid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TraceError {
    /// Reference to a wire that has not been declared.
    #[error("Wire '{0}' has not been declared at this point")]
    UndeclaredWire(String),

    /// Arrays broadcast together disagree on size.
    #[error("Arrays '{first}' and '{second}' do not match in size")]
    SizeMismatch {
        /// First array seen in the call.
        first: String,
        /// The array whose size disagrees.
        second: String,
    },

    /// Call to a name that is neither a built-in gate nor a definition.
    #[error("Cannot resolve callable '{0}'")]
    UnresolvedCallable(String),

    /// A control modifier that cannot be classified or satisfied.
    #[error("Unclassifiable control modifier: {0}")]
    MalformedModifier(String),

    /// Argument count differs from a definition's formal parameter count.
    #[error("Callable '{callable}' expects {expected} quantum arguments, got {got}")]
    ArityMismatch {
        callable: String,
        expected: usize,
        got: usize,
    },

    /// Built-in gate applied to too few wires.
    #[error("Gate '{gate}' requires {expected} wires, got {got}")]
    GateArity {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Bit-slice measurement with a non-array operand.
    #[error("Bit-slice measure requires array operands: {0}")]
    InvalidSlice(String),

    /// Constant expression failed to fold where a value is required.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// Trace interchange data with the wrong shape.
    #[error("Invalid trace data: {0}")]
    InvalidTrace(String),

    /// Malformed trace JSON.
    #[error("Malformed trace JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;
