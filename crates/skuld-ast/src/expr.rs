//! Expressions and their source rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An arithmetic or boolean expression as it appears in the program tree.
///
/// Expressions show up in array sizes, loop bounds, register indices,
/// modifier repeat counts and `if` guards. They stay symbolic until the
/// trace builder folds them against the global constants table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// Identifier (constant, loop variable, classical symbol).
    Identifier(String),
    /// Pi constant.
    Pi,
    /// Negation.
    Neg(Box<Expression>),
    /// Binary operation.
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    /// Parenthesized expression.
    Paren(Box<Expression>),
}

impl Expression {
    /// Create an identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// Create a binary operation.
    pub fn binop(left: Expression, op: BinOp, right: Expression) -> Self {
        Expression::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Whether the given identifier occurs anywhere in this expression.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Expression::Identifier(id) => id == name,
            Expression::Neg(e) | Expression::Paren(e) => e.mentions(name),
            Expression::BinOp { left, right, .. } => left.mentions(name) || right.mentions(name),
            _ => false,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Int(v) => write!(f, "{v}"),
            Expression::Float(v) => write!(f, "{v}"),
            Expression::Identifier(name) => write!(f, "{name}"),
            Expression::Pi => write!(f, "pi"),
            Expression::Neg(e) => write!(f, "-{e}"),
            Expression::BinOp { left, op, right } => write!(f, "{left} {op} {right}"),
            Expression::Paren(e) => write!(f, "({e})"),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_binop() {
        let e = Expression::binop(Expression::ident("n"), BinOp::Sub, Expression::Int(1));
        assert_eq!(e.to_string(), "n - 1");
    }

    #[test]
    fn test_render_condition() {
        let e = Expression::binop(Expression::ident("c"), BinOp::Eq, Expression::Int(1));
        assert_eq!(e.to_string(), "c == 1");
    }

    #[test]
    fn test_mentions() {
        let e = Expression::binop(
            Expression::Paren(Box::new(Expression::ident("i"))),
            BinOp::Add,
            Expression::Int(2),
        );
        assert!(e.mentions("i"));
        assert!(!e.mentions("j"));
    }
}
