//! Error types for slicing.

use thiserror::Error;

/// Errors raised while computing a slice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SliceError {
    /// The criterion matched no node; there is nothing to slice from.
    #[error("No nodes matched the slicing criterion ({0}); try relaxing filters")]
    EmptyCriterion(String),
}

/// Result type for slicing operations.
pub type SliceResult<T> = Result<T, SliceError>;
