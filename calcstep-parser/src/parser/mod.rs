pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use calcstep_error::ErrorKind;
use error::{kind, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Tries each parsing expression in order, evaluating to the first successful result.
///
/// A fatal error short-circuits immediately. If every attempt fails with a non-fatal error, the
/// macro evaluates to the error of the last attempt.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($expr:expr $(,)?) => {
        $expr
    };
    ($expr:expr, $($rest:expr),+ $(,)?) => {
        match $expr {
            Ok(value) => Ok(value),
            Err(err) if err.fatal => Err(err),
            Err(_) => $crate::try_parse_catch_fatal!($($rest),+),
        }
    };
}

/// The deepest nesting the parser accepts. Each parenthesized group, call, negation, and chained
/// binary operator counts as one level, which keeps every parsed tree shallower than this.
pub const MAX_NESTING_DEPTH: usize = 1 << 7;

/// A recursive-descent parser for algebraic expressions. This is the type to use to parse a
/// piece of text into an [`expr::Expr`] tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The current nesting depth, bounded by [`MAX_NESTING_DEPTH`].
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Moves this parser to the cursor position of `other`. Used after peeking with a clone.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.is_whitespace() {
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Enters one more level of nesting, failing with a fatal error if the limit is reached.
    ///
    /// The level is held until the enclosing [`Parser::nested`] call returns.
    pub fn deepen(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_fatal(kind::TooDeep { limit: MAX_NESTING_DEPTH }));
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `f` one level of nesting deeper. The depth is restored afterwards, whether or not `f`
    /// succeeds.
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let depth = self.depth;
        let result = match self.deepen() {
            Ok(()) => f(self),
            Err(err) => Err(err),
        };
        self.depth = depth;
        result
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value using a custom parsing function, backtracking the cursor if
    /// the function fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        f(self).map_err(|err| {
            self.cursor = start;
            err
        })
    }

    /// Speculatively parses a value with a validation predicate. The value must parse
    /// successfully, **and** the predicate must return [`Ok`], otherwise the cursor is restored.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Speculatively parses one or more values separated by `delimiter`.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        self.try_parse_with_fn(|input| {
            let mut values = vec![input.try_parse::<T>()?];
            while input.peek_token().map(|token| token.kind) == Some(delimiter) {
                input.next_token()?;
                values.push(input.try_parse::<T>()?);
            }
            Ok(values)
        })
    }

    /// Parses a value from the stream. All the tokens, except trailing whitespace, must be
    /// consumed by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.peek_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                let span = token.span.clone();
                Err(Error::new_fatal(vec![span], kind::UnclosedParenthesis { opening: false }))
            },
            Some(token) => {
                let span = token.span.start..self.eof_span().end;
                Err(Error::new(vec![span], kind::ExpectedEof))
            },
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`. For unary operators, the operator appears
    /// to the left of the operand.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}
