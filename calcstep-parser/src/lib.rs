//! Parsing and rendering of single-variable algebraic expressions.
//!
//! Text is first passed through [`normalize`], then tokenized and parsed into an
//! [`parser::expr::Expr`] tree with [`parser::Parser`]. Any node can be written back out as plain
//! text with [`std::fmt::Display`], or as LaTeX with [`parser::fmt::Latex`].

pub mod normalize;
pub mod parser;
pub mod tokenizer;

pub use normalize::normalize;
