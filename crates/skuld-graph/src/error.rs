//! Error types for graph interchange.

use thiserror::Error;

/// Errors raised while importing a serialized graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// Node action name that maps to no known kind.
    #[error("Unknown action kind '{0}' in graph data")]
    UnknownAction(String),

    /// Edge referencing a node id that was not exported.
    #[error("Edge {from} -> {to} references an unknown node id")]
    DanglingEdge { from: usize, to: usize },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
