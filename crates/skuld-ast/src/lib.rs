//! Quantum Program Tree for Skuld
//!
//! This crate defines the already-parsed program tree the skuld analysis
//! pipeline consumes, together with the constant expression machinery the
//! trace builder relies on:
//!
//! - **Statements**: [`Stmt`] / [`StmtKind`] — a closed set of statement
//!   shapes (declarations, calls with modifiers, measurements, control
//!   flow), each carrying its source line.
//! - **Expressions**: [`Expression`] with source-faithful rendering, used
//!   for indices, sizes, loop bounds and `if` guards.
//! - **Constant folding**: [`eval_f64`]/[`eval_i64`]/[`eval_u32`] resolve
//!   expressions against the [`Constants`] table.
//! - **Substitution**: [`substitute_stmt`] rewrites a statement subtree
//!   for one loop iteration.
//!
//! The tree is serde-serializable, so front ends can hand programs over
//! as JSON without linking against a parser.
//!
//! # Example
//!
//! ```rust
//! use skuld_ast::{Constants, Expression, eval_u32};
//!
//! let mut consts = Constants::default();
//! consts.insert("n".to_string(), 4.0);
//!
//! let size = Expression::binop(
//!     Expression::ident("n"),
//!     skuld_ast::BinOp::Sub,
//!     Expression::Int(1),
//! );
//! assert_eq!(eval_u32(&size, &consts).unwrap(), 3);
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod expr;
pub mod subst;

pub use ast::{
    CallStmt, CallableDef, Modifier, Param, Program, Range, RegRef, Select, Stmt, StmtKind,
};
pub use error::{EvalError, EvalResult};
pub use eval::{Constants, default_constants, eval_f64, eval_i64, eval_u32, fold};
pub use expr::{BinOp, Expression};
pub use subst::{subst_expr, substitute_stmt};
