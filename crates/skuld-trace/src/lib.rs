//! Trace Construction for Skuld
//!
//! This crate symbolically executes a quantum program tree into the
//! **trace**: a flat, per-wire timeline of actions tagged with logical
//! time and source line. It is the first stage of the skuld pipeline
//! (trace, then dependency graph, then slice).
//!
//! # Core Components
//!
//! - **Wires and Actions**: [`Wire`], [`Action`], [`ActionKind`] — the
//!   per-wire timelines the rest of the pipeline consumes
//! - **Trace**: [`Trace`] — all wires in declaration order, plus the
//!   reserved metadata, with JSON interchange in both directions
//! - **Builder**: [`TraceBuilder`] — the worklist interpreter handling
//!   inlining, unrolling, broadcasting and control modifiers
//! - **Lineage**: [`control_lineage`] — transitive control-set
//!   resolution at record time
//!
//! # Example
//!
//! ```rust
//! use skuld_ast::{CallStmt, Program, RegRef, Stmt, StmtKind};
//! use skuld_trace::build_trace;
//!
//! // qubit a;  cx a, $0;
//! let program = Program {
//!     statements: vec![
//!         Stmt::new(1, StmtKind::QubitDecl { name: "a".into(), size: None }),
//!         Stmt::new(10, StmtKind::Call(CallStmt {
//!             name: "cx".into(),
//!             modifiers: vec![],
//!             qargs: vec![RegRef::whole("a"), RegRef::whole("$0")],
//!         })),
//!     ],
//! };
//!
//! let trace = build_trace(&program).unwrap();
//! let target = &trace.get("$0").unwrap().actions[0];
//! assert_eq!(target.lineage.as_deref(), Some("a"));
//! ```

pub mod action;
pub mod builder;
pub mod error;
pub mod gates;
pub mod lineage;
pub mod trace;
pub mod wire;

pub use action::{Action, ActionKind};
pub use builder::{DEFAULT_PHYSICAL_WIRES, TraceBuilder, build_trace};
pub use error::{TraceError, TraceResult};
pub use gates::BuiltinGate;
pub use lineage::{control_lineage, lineage_string};
pub use trace::{FILENAME_KEY, Trace};
pub use wire::{Wire, WireKind};
