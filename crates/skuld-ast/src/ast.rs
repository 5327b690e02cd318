//! Statement shapes of the quantum program tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expr::Expression;

/// A complete program: the ordered top-level statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Statements in source order.
    pub statements: Vec<Stmt>,
}

/// A statement together with its source line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stmt {
    /// Source line the statement starts on.
    pub line: u32,
    /// The statement shape.
    pub kind: StmtKind,
}

impl Stmt {
    /// Create a statement at a source line.
    pub fn new(line: u32, kind: StmtKind) -> Self {
        Self { line, kind }
    }
}

/// A statement shape. Each variant carries only its relevant fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StmtKind {
    /// Constant declaration: `const n = 4;`
    ConstDecl { name: String, value: Expression },

    /// Qubit declaration: `qubit q;` or `qubit[n] q;`
    QubitDecl {
        name: String,
        size: Option<Expression>,
    },

    /// Index-range alias: `let a = q[2:4];`
    LetAlias { name: String, target: RegRef },

    /// User gate definition.
    GateDef(CallableDef),

    /// Function definition (formals may be array-typed).
    FnDef(CallableDef),

    /// Gate or function call, possibly with control modifiers.
    Call(CallStmt),

    /// Measurement shorthand: `c = measure q;`
    MeasureAssign { store: String, target: RegRef },

    /// Explicit measurement: `measure q[a:b] -> c;`
    Measure { source: RegRef, store: RegRef },

    /// Reset: `reset q;`
    Reset { target: RegRef },

    /// Barrier: `barrier q, a;` or bare `barrier;`
    Barrier { targets: Vec<RegRef> },

    /// Conditional block.
    If {
        condition: Expression,
        body: Vec<Stmt>,
    },

    /// Counted loop over an inclusive range.
    For {
        variable: String,
        range: Range,
        body: Vec<Stmt>,
    },

    /// Grouping block; no scoping or timing effect of its own.
    Box { body: Vec<Stmt> },
}

/// A gate or function call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallStmt {
    /// Callee name.
    pub name: String,
    /// Modifier clauses, outermost first.
    pub modifiers: Vec<Modifier>,
    /// Ordered quantum arguments.
    pub qargs: Vec<RegRef>,
}

/// A call modifier clause such as `ctrl`, `negctrl(2)` or `inv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    /// Modifier name.
    pub name: String,
    /// Optional repeat count.
    pub count: Option<Expression>,
}

impl Modifier {
    /// A bare modifier without a repeat count.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: None,
        }
    }

    /// A counted modifier, e.g. `ctrl(2)`.
    pub fn counted(name: impl Into<String>, count: Expression) -> Self {
        Self {
            name: name.into(),
            count: Some(count),
        }
    }
}

/// A user gate or function definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallableDef {
    /// Definition name.
    pub name: String,
    /// Formal quantum parameters.
    pub params: Vec<Param>,
    /// Body statements.
    pub body: Vec<Stmt>,
}

/// A formal quantum parameter; `size` is present for array-typed formals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Expression>,
}

impl Param {
    /// A scalar formal parameter.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
        }
    }

    /// An array-typed formal parameter.
    pub fn array(name: impl Into<String>, size: Expression) -> Self {
        Self {
            name: name.into(),
            size: Some(size),
        }
    }
}

/// Loop bounds; `end` is inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Range {
    pub start: Expression,
    pub end: Expression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Expression>,
}

/// Reference to a register, one of its elements, or a slice of it.
///
/// The same shape covers quantum registers and classical stores; the
/// trace builder decides which side it is resolving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegRef {
    /// Register name.
    pub register: String,
    /// Element selection.
    pub select: Select,
}

/// Element selection within a register reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Select {
    /// The whole register: `q`.
    All,
    /// One element: `q[i]`.
    Index(Expression),
    /// An inclusive slice: `q[a:b]`.
    Range(Expression, Expression),
}

impl RegRef {
    /// Reference to an entire register.
    pub fn whole(register: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            select: Select::All,
        }
    }

    /// Reference to a literal element.
    pub fn element(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            select: Select::Index(Expression::Int(i64::from(index))),
        }
    }

    /// Reference with a symbolic index expression.
    pub fn indexed(register: impl Into<String>, index: Expression) -> Self {
        Self {
            register: register.into(),
            select: Select::Index(index),
        }
    }

    /// Reference to an inclusive slice.
    pub fn slice(register: impl Into<String>, start: Expression, end: Expression) -> Self {
        Self {
            register: register.into(),
            select: Select::Range(start, end),
        }
    }
}

impl fmt::Display for RegRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.select {
            Select::All => write!(f, "{}", self.register),
            Select::Index(e) => write!(f, "{}[{e}]", self.register),
            Select::Range(a, b) => write!(f, "{}[{a}:{b}]", self.register),
        }
    }
}
