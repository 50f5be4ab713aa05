//! Text and LaTeX fragments shared by the differentiation rules.

use std::fmt::Display;
use calcstep_parser::parser::{expr::Expr, fmt::Latex};

/// Writes the derivative of `tex` with respect to `var`, as in `\left(x^{2}\right)_{x}^{\prime}`.
pub fn prime(tex: impl Display, var: &str) -> String {
    format!(r"\left({}\right)_{{{}}}^{{\prime}}", tex, var)
}

/// Renders a node as LaTeX.
pub fn latex(expr: &Expr) -> String {
    expr.as_display().to_string()
}

/// Renders a node as LaTeX, wrapping operations in `\left( \right)` so the result can be used as
/// a factor or an exponent base.
pub fn latex_operand(expr: &Expr) -> String {
    match expr {
        Expr::Binary(_) | Expr::Unary(_) => format!(r"\left({}\right)", latex(expr)),
        _ => latex(expr),
    }
}

/// The clause defining a substitution variable, as in `,\thinspace where\thinspace z = x^{2}`.
pub fn clause(connector: &str, sub: &str, inner_tex: &str) -> String {
    format!(r",\thinspace {}\thinspace {} = {}", connector, sub, inner_tex)
}

/// Renders a node as plain text, wrapping binary and unary operations in parentheses so the
/// result can be embedded in a larger expression.
pub fn operand_text(expr: &Expr) -> String {
    match expr {
        Expr::Binary(_) | Expr::Unary(_) => format!("({})", expr),
        _ => expr.to_string(),
    }
}

/// Parenthesizes the derivative `d` of `expr`, unless `expr` is already parenthesized (in which
/// case its derivative is too).
pub fn wrap(expr: &Expr, d: &str) -> String {
    match expr {
        Expr::Paren(_) => d.to_string(),
        _ => format!("({})", d),
    }
}

/// Renders a node as plain text, always surrounded by exactly one pair of parentheses.
pub fn grouped(expr: &Expr) -> String {
    match expr {
        Expr::Paren(_) => expr.to_string(),
        _ => format!("({})", expr),
    }
}
