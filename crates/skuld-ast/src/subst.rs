//! Loop-variable substitution over statement subtrees.
//!
//! Unrolling a `for` duplicates its body once per iteration, replacing
//! every expression that mentions the loop variable with its folded
//! value. An expression that still does not fold after substitution is
//! left untouched, so the unroll itself never aborts.

use crate::ast::{CallStmt, CallableDef, Modifier, Param, Range, RegRef, Select, Stmt, StmtKind};
use crate::eval::{Constants, eval_i64};
use crate::expr::Expression;

/// Replace every occurrence of `var` with the literal `value`.
pub fn subst_expr(expr: &Expression, var: &str, value: i64) -> Expression {
    match expr {
        Expression::Identifier(name) if name == var => Expression::Int(value),
        Expression::Neg(e) => Expression::Neg(Box::new(subst_expr(e, var, value))),
        Expression::Paren(e) => Expression::Paren(Box::new(subst_expr(e, var, value))),
        Expression::BinOp { left, op, right } => Expression::BinOp {
            left: Box::new(subst_expr(left, var, value)),
            op: *op,
            right: Box::new(subst_expr(right, var, value)),
        },
        other => other.clone(),
    }
}

/// Substitute-and-fold a single expression slot.
///
/// Slots that do not mention the variable pass through unchanged; slots
/// that mention it but do not fold keep their original text.
fn resolve_slot(expr: &Expression, var: &str, value: i64, consts: &Constants) -> Expression {
    if !expr.mentions(var) {
        return expr.clone();
    }
    let substituted = subst_expr(expr, var, value);
    match eval_i64(&substituted, consts) {
        Ok(v) => Expression::Int(v),
        Err(_) => expr.clone(),
    }
}

fn subst_regref(r: &RegRef, var: &str, value: i64, consts: &Constants) -> RegRef {
    let select = match &r.select {
        Select::All => Select::All,
        Select::Index(e) => Select::Index(resolve_slot(e, var, value, consts)),
        Select::Range(a, b) => Select::Range(
            resolve_slot(a, var, value, consts),
            resolve_slot(b, var, value, consts),
        ),
    };
    RegRef {
        register: r.register.clone(),
        select,
    }
}

fn subst_body(body: &[Stmt], var: &str, value: i64, consts: &Constants) -> Vec<Stmt> {
    body.iter()
        .map(|s| substitute_stmt(s, var, value, consts))
        .collect()
}

fn subst_callable(def: &CallableDef, var: &str, value: i64, consts: &Constants) -> CallableDef {
    CallableDef {
        name: def.name.clone(),
        params: def
            .params
            .iter()
            .map(|p| Param {
                name: p.name.clone(),
                size: p
                    .size
                    .as_ref()
                    .map(|e| resolve_slot(e, var, value, consts)),
            })
            .collect(),
        body: subst_body(&def.body, var, value, consts),
    }
}

/// Substitute `var` throughout a statement subtree.
///
/// A nested `for` that redeclares the same variable shadows it: only
/// that loop's range is rewritten, never its body.
pub fn substitute_stmt(stmt: &Stmt, var: &str, value: i64, consts: &Constants) -> Stmt {
    let kind = match &stmt.kind {
        StmtKind::ConstDecl { name, value: v } => StmtKind::ConstDecl {
            name: name.clone(),
            value: resolve_slot(v, var, value, consts),
        },
        StmtKind::QubitDecl { name, size } => StmtKind::QubitDecl {
            name: name.clone(),
            size: size.as_ref().map(|e| resolve_slot(e, var, value, consts)),
        },
        StmtKind::LetAlias { name, target } => StmtKind::LetAlias {
            name: name.clone(),
            target: subst_regref(target, var, value, consts),
        },
        StmtKind::GateDef(def) => StmtKind::GateDef(subst_callable(def, var, value, consts)),
        StmtKind::FnDef(def) => StmtKind::FnDef(subst_callable(def, var, value, consts)),
        StmtKind::Call(call) => StmtKind::Call(CallStmt {
            name: call.name.clone(),
            modifiers: call
                .modifiers
                .iter()
                .map(|m| Modifier {
                    name: m.name.clone(),
                    count: m
                        .count
                        .as_ref()
                        .map(|e| resolve_slot(e, var, value, consts)),
                })
                .collect(),
            qargs: call
                .qargs
                .iter()
                .map(|r| subst_regref(r, var, value, consts))
                .collect(),
        }),
        StmtKind::MeasureAssign { store, target } => StmtKind::MeasureAssign {
            store: store.clone(),
            target: subst_regref(target, var, value, consts),
        },
        StmtKind::Measure { source, store } => StmtKind::Measure {
            source: subst_regref(source, var, value, consts),
            store: subst_regref(store, var, value, consts),
        },
        StmtKind::Reset { target } => StmtKind::Reset {
            target: subst_regref(target, var, value, consts),
        },
        StmtKind::Barrier { targets } => StmtKind::Barrier {
            targets: targets
                .iter()
                .map(|r| subst_regref(r, var, value, consts))
                .collect(),
        },
        StmtKind::If { condition, body } => StmtKind::If {
            condition: resolve_slot(condition, var, value, consts),
            body: subst_body(body, var, value, consts),
        },
        StmtKind::For {
            variable,
            range,
            body,
        } => {
            let range = Range {
                start: resolve_slot(&range.start, var, value, consts),
                end: resolve_slot(&range.end, var, value, consts),
                step: range
                    .step
                    .as_ref()
                    .map(|e| resolve_slot(e, var, value, consts)),
            };
            let body = if variable == var {
                body.to_vec()
            } else {
                subst_body(body, var, value, consts)
            };
            StmtKind::For {
                variable: variable.clone(),
                range,
                body,
            }
        }
        StmtKind::Box { body } => StmtKind::Box {
            body: subst_body(body, var, value, consts),
        },
    };
    Stmt::new(stmt.line, kind)
}
