use std::fmt::{Display, Formatter, Result};
use super::expr::Expr;

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Helper to format powers. Compound bases are wrapped in `\left( \right)`; the exponent is
/// written without its own parentheses, since the braces already group it.
pub fn fmt_pow(f: &mut Formatter, left: Option<&Expr>, right: Option<&Expr>) -> Result {
    if let Some(left) = left {
        let left = left.innermost();
        match left {
            Expr::Unary(_) | Expr::Binary(_) => {
                write!(f, "\\left(")?;
                left.fmt_latex(f)?;
                write!(f, "\\right)")?;
            },
            Expr::Call(call) if call.name.name == "pow" => {
                write!(f, "\\left(")?;
                left.fmt_latex(f)?;
                write!(f, "\\right)")?;
            },
            _ => left.fmt_latex(f)?,
        }
    }
    write!(f, "^{{")?;
    if let Some(right) = right {
        right.innermost().fmt_latex(f)?;
    }
    write!(f, "}}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::parser::Parser;

    fn latex(input: &str) -> String {
        let mut parser = Parser::new(input);
        let expr = parser.try_parse_full::<Expr>().unwrap();
        expr.as_display().to_string()
    }

    fn plain(input: &str) -> String {
        let mut parser = Parser::new(input);
        let expr = parser.try_parse_full::<Expr>().unwrap();
        expr.to_string()
    }

    #[test]
    fn fmt_display() {
        assert_eq!(plain("3x + 6"), "3*x+6");
    }

    #[test]
    fn fmt_display_keeps_parentheses() {
        assert_eq!(plain("x^(3(x + 6))^9"), "x^(3*(x+6))^9");
    }

    #[test]
    fn fmt_display_call() {
        assert_eq!(plain("log( x , 2 )"), "log(x, 2)");
    }

    #[test]
    fn fmt_display_negation() {
        assert_eq!(plain("-(x+1)"), "-(x+1)");
    }

    #[test]
    fn fmt_latex_sqrt() {
        assert_eq!(latex("sqrt(3x)^2"), "\\sqrt{3\\cdot x}^{2}");
    }

    #[test]
    fn fmt_latex_fractions() {
        assert_eq!(
            latex("1/x + 5/x^2"),
            "\\frac{1}{x}+\\frac{5}{x^{2}}",
        );
    }

    #[test]
    fn fmt_latex_compound_base() {
        assert_eq!(latex("(x+1)^2"), "\\left(x+1\\right)^{2}");
    }

    #[test]
    fn fmt_latex_functions() {
        assert_eq!(latex("sin(x)"), "\\sin\\left(x\\right)");
        assert_eq!(latex("tg(x)"), "\\operatorname{tg}\\left(x\\right)");
        assert_eq!(latex("log(x)"), "\\ln\\left(x\\right)");
        assert_eq!(latex("log(x, 2)"), "\\log_{2}\\left(x\\right)");
        assert_eq!(latex("f(x)"), "\\mathrm{ f } \\left(x\\right)");
    }
}
