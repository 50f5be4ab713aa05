use std::{fmt, ops::Range};
use super::{
    expr::Expr,
    error::{kind, Error},
    fmt::{fmt_pow, Latex},
    token::op::{BinOp, BinOpKind},
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

/// Returns true if the next token can begin an operand of an implicit multiplication.
fn at_implicit_operand(input: &Parser) -> bool {
    input.peek_token().map_or(false, |token| token.kind.starts_operand())
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // before creating the `lhs op rhs` node, check the precedence of the following
            // operator, if any: `3 + 4 * 5` must not become `(3 + 4) * 5`
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
                } else {
                    // lower precedence, or equal precedence and left associativity
                    // (`1 * 2 + 3`, `1 * 2 * 3`): `lhs op rhs` is complete
                    break;
                }
            } else if precedence < Precedence::Factor && at_implicit_operand(input) {
                // `1 + 2x` is `1 + (2x)`
                rhs = Self::parse_expr(input, rhs, Precedence::Factor)?;
            } else {
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// Parses binary operators (and implicit multiplication) following `lhs`, as long as their
    /// precedence is at least `precedence`.
    pub fn parse_expr(input: &mut Parser, lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        input.nested(|input| Self::parse_chain(input, lhs, precedence))
    }

    /// The loop of [`Binary::parse_expr`]. Every operator added to the chain deepens the tree by
    /// one level.
    fn parse_chain(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            if let Ok(op) = input_ahead.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::NonFatal))
                }
            }) {
                input.set_cursor(&input_ahead);
                input.deepen()?;
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op, rhs)?;
            } else if Precedence::Factor >= precedence && at_implicit_operand(input) {
                input.deepen()?;
                let rhs = Unary::parse_or_lower(input)?;
                let op = BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: lhs.span().end..rhs.span().start,
                };
                lhs = Self::complete_rhs(input, lhs, op, rhs)?;
            } else {
                break;
            }
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => fmt_pow(f, Some(&*self.lhs), Some(&*self.rhs)),
            BinOpKind::Div => {
                write!(f, "\\frac{{")?;
                self.lhs.innermost().fmt_latex(f)?;
                write!(f, "}}{{")?;
                self.rhs.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            _ => {
                self.lhs.fmt_latex(f)?;
                self.op.fmt_latex(f)?;
                self.rhs.fmt_latex(f)
            },
        }
    }
}
