use std::{fmt, ops::Range};
use super::{
    binary::Binary,
    error::Error,
    expr::{Expr, Primary},
    fmt::Latex,
    token::op::UnaryOp,
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. The only unary operator is negation, which appears to the
/// left of its operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or a primary expression if there is no unary operator.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.try_parse::<Unary>() {
            Ok(unary) => Ok(Expr::Unary(unary)),
            Err(err) if err.fatal => Err(err),
            Err(_) => input.try_parse::<Primary>().map(Into::into),
        }
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let start_span = op.span.start;

        // the operand binds everything with a higher precedence than the operator, so `-x^2` is
        // `-(x^2)`
        let operand = input.nested(|input| {
            let lhs = Unary::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())
        })?;
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-")?;
        self.operand.fmt_latex(f)
    }
}
