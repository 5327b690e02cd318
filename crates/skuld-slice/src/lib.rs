//! Slicing for Skuld
//!
//! The final stage of the skuld pipeline: given a dependency graph and a
//! criterion, compute the reachability closure in one direction and
//! explain how every node was reached.
//!
//! # Core Components
//!
//! - **Criterion**: [`Criterion`] — ANDed filters over
//!   (wire, line, time, action, gate); zero matches is fatal
//! - **Direction**: [`Direction`] — backward ("what could have caused
//!   this") or forward ("what this could affect")
//! - **Slicer**: [`slice`] — multi-source BFS with explanations fixed at
//!   first discovery, plus witness-path reconstruction
//! - **Interchange**: [`export_slice`] — the serialized slice shape
//!
//! # Example
//!
//! ```rust
//! use skuld_trace::{Action, ActionKind, Trace, Wire};
//! use skuld_graph::build_graph;
//! use skuld_slice::{Criterion, Direction, slice};
//!
//! let mut trace = Trace::new();
//! trace.declare("a", Wire::named());
//! trace.record("a", Action::new(0, 1, ActionKind::Reset)).unwrap();
//! let mut m = Action::new(1, 2, ActionKind::Measure);
//! m.store = Some("c".into());
//! trace.record("a", m).unwrap();
//!
//! let graph = build_graph(&trace);
//! let criterion = Criterion::new().with_action("measure");
//! let result = slice(&graph, &criterion, Direction::Backward).unwrap();
//! assert_eq!(result.len(), 2); // the measurement and the reset
//! ```

pub mod criterion;
pub mod error;
pub mod export;
pub mod slicer;

pub use criterion::{Criterion, Direction};
pub use error::{SliceError, SliceResult};
pub use export::{CriterionExport, NodeBrief, SliceEntry, SliceExport, export_slice};
pub use slicer::{Explanation, Reason, Slice, slice};
