use std::{fmt, ops::Range};
use super::{
    error::{kind, Error},
    expr::Expr,
    fmt::{fmt_pow, Latex},
    literal::LitSym,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `log(x, 2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;

        let args = if input.peek_token().map(|token| token.kind) == Some(TokenKind::CloseParen) {
            Vec::new()
        } else {
            input.nested(|input| input.try_parse_delimited::<Expr>(TokenKind::Comma))?
        };

        let close_paren = input.try_parse::<CloseParen>().map_err(|_| {
            Error::new_fatal(vec![open_paren.span.clone()], kind::UnclosedParenthesis { opening: true })
        })?;

        // use `name` here before it is moved into the struct
        let span = name.span.start..close_paren.span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                write!(f, "{}, ", arg)?;
            }
            write!(f, "{}", last)?;
        }
        write!(f, ")")
    }
}

/// Writes the arguments of a call, separated by commas and wrapped in `\left( \right)`.
fn fmt_args(f: &mut fmt::Formatter, args: &[Expr]) -> fmt::Result {
    write!(f, "\\left(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        arg.innermost().fmt_latex(f)?;
    }
    write!(f, "\\right)")
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let args = self.args.as_slice();
        match (self.name.name.as_str(), args) {
            ("sqrt", [arg]) => {
                write!(f, "\\sqrt{{")?;
                arg.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            ("pow", [base, exp]) => fmt_pow(f, Some(base), Some(exp)),
            ("log" | "ln", [_]) => {
                write!(f, "\\ln")?;
                fmt_args(f, args)
            },
            ("log", [arg, base]) => {
                write!(f, "\\log_{{")?;
                base.innermost().fmt_latex(f)?;
                write!(f, "}}")?;
                fmt_args(f, std::slice::from_ref(arg))
            },
            (
                name @ ("sin" | "cos" | "tan" | "cot" | "arcsin" | "arccos" | "arctan"
                    | "sinh" | "cosh" | "tanh" | "coth"),
                _,
            ) => {
                write!(f, "\\{}", name)?;
                fmt_args(f, args)
            },
            (name @ ("tg" | "ctg" | "arctg" | "arcctg" | "arccot" | "sh" | "ch" | "th" | "cth"), _) => {
                write!(f, "\\operatorname{{{}}}", name)?;
                fmt_args(f, args)
            },
            (name, _) => {
                write!(f, "\\mathrm{{ {} }} ", name)?;
                fmt_args(f, args)
            },
        }
    }
}
