//! Numeric folding of constant sub-expressions.

use calcstep_error::Error;
use calcstep_parser::parser::{expr::Expr, literal::Literal};
use super::{
    classify::{operation, Function},
    error::{NonFiniteConstant, NotConstant},
};

/// Evaluates a constant expression, such as `2^3` or `(1+2)/4`, to a number.
///
/// Returns [`NotConstant`] if the expression contains a symbol or a function other than the
/// arithmetic operators and the two-argument `log`, and [`NonFiniteConstant`] if any intermediate
/// result is infinite or NaN.
pub fn evaluate_constant(expr: &Expr) -> Result<f64, Error> {
    let inner = expr.innermost();
    let not_constant = || Error::new(vec![inner.span()], NotConstant { expr: inner.to_string() });

    let value = match inner {
        Expr::Literal(Literal::Number(num)) => return Ok(num.value),
        Expr::Literal(Literal::Symbol(_)) | Expr::Paren(_) => return Err(not_constant()),
        _ => {
            let op = match operation(inner) {
                Some(op) => op?,
                None => return Err(not_constant()),
            };
            match (op.func, op.args.as_slice()) {
                (Function::Add, [lhs, rhs]) => evaluate_constant(lhs)? + evaluate_constant(rhs)?,
                (Function::Subtract, [lhs, rhs]) => evaluate_constant(lhs)? - evaluate_constant(rhs)?,
                (Function::Multiply, [lhs, rhs]) => evaluate_constant(lhs)? * evaluate_constant(rhs)?,
                (Function::Divide, [lhs, rhs]) => evaluate_constant(lhs)? / evaluate_constant(rhs)?,
                (Function::Pow, [lhs, rhs]) => evaluate_constant(lhs)?.powf(evaluate_constant(rhs)?),
                (Function::Negate, [operand]) => -evaluate_constant(operand)?,
                (Function::Log, [arg, base]) => evaluate_constant(arg)?.ln() / evaluate_constant(base)?.ln(),
                _ => return Err(not_constant()),
            }
        },
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::new(vec![inner.span()], NonFiniteConstant { expr: inner.to_string() }))
    }
}

/// Formats a number the way it is written in derivative text: integers without a fractional part,
/// everything else in the shortest form that reads back to the same value.
pub fn fmt_num(value: f64) -> String {
    // `-0` reads as a negation of zero, which is still zero
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Formats a number so that it can appear as the operand of an operator: negative numbers are
/// wrapped in parentheses.
pub fn fmt_num_operand(value: f64) -> String {
    if value < 0.0 {
        format!("({})", fmt_num(value))
    } else {
        fmt_num(value)
    }
}
