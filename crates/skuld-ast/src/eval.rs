//! Constant expression folding against the global constants table.

use rustc_hash::FxHashMap;

use crate::error::{EvalError, EvalResult};
use crate::expr::{BinOp, Expression};

/// Global constants: name to numeric value.
pub type Constants = FxHashMap<String, f64>;

/// Constants table with the built-in mathematical names registered.
pub fn default_constants() -> Constants {
    let mut consts = Constants::default();
    consts.insert("pi".to_string(), std::f64::consts::PI);
    consts
}

/// Evaluate an expression to a float against the constants table.
pub fn eval_f64(expr: &Expression, consts: &Constants) -> EvalResult<f64> {
    match expr {
        #[allow(clippy::cast_precision_loss)]
        Expression::Int(v) => Ok(*v as f64),
        Expression::Float(v) => Ok(*v),
        Expression::Pi => Ok(std::f64::consts::PI),
        Expression::Identifier(name) => consts
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UnknownIdentifier(name.clone())),
        Expression::Neg(e) => Ok(-eval_f64(e, consts)?),
        Expression::Paren(e) => eval_f64(e, consts),
        Expression::BinOp { left, op, right } => {
            let l = eval_f64(left, consts)?;
            let r = eval_f64(right, consts)?;
            match op {
                BinOp::Add => Ok(l + r),
                BinOp::Sub => Ok(l - r),
                BinOp::Mul => Ok(l * r),
                BinOp::Div => Ok(l / r),
                BinOp::Mod => Ok(l % r),
                BinOp::Pow => Ok(l.powf(r)),
                _ => Err(EvalError::NotConstant(expr.to_string())),
            }
        }
    }
}

/// Evaluate to an integer; fails when the value is not integral.
#[allow(clippy::cast_possible_truncation)]
pub fn eval_i64(expr: &Expression, consts: &Constants) -> EvalResult<i64> {
    let v = eval_f64(expr, consts)?;
    if v.fract() == 0.0 && v.is_finite() {
        Ok(v as i64)
    } else {
        Err(EvalError::NotIntegral(v))
    }
}

/// Evaluate to a non-negative index or size.
pub fn eval_u32(expr: &Expression, consts: &Constants) -> EvalResult<u32> {
    let v = eval_i64(expr, consts)?;
    u32::try_from(v).map_err(|_| EvalError::NotAnIndex(v))
}

/// Fold an expression: if it evaluates to an integral constant it is
/// replaced by the literal, otherwise it is returned unchanged.
pub fn fold(expr: &Expression, consts: &Constants) -> Expression {
    match eval_i64(expr, consts) {
        Ok(v) => Expression::Int(v),
        Err(_) => expr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_arithmetic() {
        let consts = default_constants();
        let e = Expression::binop(Expression::Int(2), BinOp::Mul, Expression::Int(3));
        assert_eq!(eval_i64(&e, &consts).unwrap(), 6);
    }

    #[test]
    fn test_eval_constant_lookup() {
        let mut consts = default_constants();
        consts.insert("n".to_string(), 4.0);
        let e = Expression::binop(Expression::ident("n"), BinOp::Sub, Expression::Int(1));
        assert_eq!(eval_i64(&e, &consts).unwrap(), 3);
    }

    #[test]
    fn test_eval_pi() {
        let consts = default_constants();
        let v = eval_f64(&Expression::Pi, &consts).unwrap();
        assert!((v - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_eval_unknown_identifier() {
        let consts = default_constants();
        let e = Expression::ident("missing");
        assert!(matches!(
            eval_i64(&e, &consts),
            Err(EvalError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn test_eval_rejects_comparison() {
        let consts = default_constants();
        let e = Expression::binop(Expression::Int(1), BinOp::Eq, Expression::Int(1));
        assert!(matches!(
            eval_i64(&e, &consts),
            Err(EvalError::NotConstant(_))
        ));
    }

    #[test]
    fn test_fold_leaves_symbolic() {
        let consts = default_constants();
        let e = Expression::binop(Expression::ident("j"), BinOp::Add, Expression::Int(1));
        assert_eq!(fold(&e, &consts), e);
    }
}
