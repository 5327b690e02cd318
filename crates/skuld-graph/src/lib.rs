//! Dependency Graph Construction for Skuld
//!
//! This crate turns a finished trace into a typed, directed dependency
//! multigraph: the structure the slicer traverses. It is the second
//! stage of the skuld pipeline (trace, then graph, then slice).
//!
//! # Core Components
//!
//! - **Nodes**: [`DepNode`] — quantum events plus synthesized
//!   classical-definition nodes, with idempotent identity ([`NodeKey`])
//! - **Edges**: [`EdgeKind`] — temporal, entanglement, measurement and
//!   quantum-to-classical dependencies
//! - **Builder**: [`build_graph`] — one pass over a borrowed trace
//! - **Interchange**: [`export_graph`] / [`import_graph`] — lossless
//!   JSON-shaped round-trip
//! - **Projection**: [`render_dot`] — Graphviz view clustered by wire
//!
//! # Example
//!
//! ```rust
//! use skuld_trace::{Action, ActionKind, Trace, Wire};
//! use skuld_graph::{EdgeKind, build_graph};
//!
//! let mut trace = Trace::new();
//! trace.declare("a", Wire::named());
//! trace.record("a", Action::new(0, 1, ActionKind::Reset)).unwrap();
//! let mut h = Action::new(1, 2, ActionKind::GateCall);
//! h.gate = Some("h".into());
//! trace.record("a", h).unwrap();
//!
//! let graph = build_graph(&trace);
//! assert_eq!(graph.node_count(), 2);
//! assert!(graph.edges().any(|(_, _, k)| k == EdgeKind::Temporal));
//! ```

pub mod build;
pub mod dot;
pub mod error;
pub mod export;
pub mod graph;
pub mod node;

pub use build::build_graph;
pub use dot::{DotOptions, render_dot};
pub use error::{GraphError, GraphResult};
pub use export::{EdgeExport, GraphExport, NodeExport, export_graph, import_graph};
pub use graph::{DepGraph, NodeIndex};
pub use node::{DEF_ACTION, DefNode, DepNode, EdgeKind, NodeKey, OpNode};
