//! Error types for constant folding.

use thiserror::Error;

/// Errors raised while folding constant expressions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvalError {
    /// Identifier not present in the constants table.
    #[error("Unknown identifier '{0}' in constant expression")]
    UnknownIdentifier(String),

    /// Expression contains an operator that cannot fold to a number.
    #[error("Expression does not fold to a constant: {0}")]
    NotConstant(String),

    /// Folded value is not an integer where one is required.
    #[error("Expected an integer value, got {0}")]
    NotIntegral(f64),

    /// Folded value cannot be used as an index or size.
    #[error("Expected a non-negative index or size, got {0}")]
    NotAnIndex(i64),

    /// Loop step of zero would never terminate.
    #[error("Loop step must be non-zero")]
    ZeroStep,
}

/// Result type for constant folding.
pub type EvalResult<T> = Result<T, EvalError>;
