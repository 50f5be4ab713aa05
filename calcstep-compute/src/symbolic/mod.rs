//! Symbolic differentiation of parsed expressions.
//!
//! # Expression representation
//!
//! The engine works directly on the [`calcstep_parser::parser::expr::Expr`] tree produced by the
//! parser, without converting it to another representation first. Parentheses, spans and the
//! exact shape of the input are all kept, since the rules of differentiation in [`derivative`]
//! depend on how the expression was written: `(x+1)^2` is differentiated with the chain rule
//! through the parenthesized base, while `x^2` reads the power rule straight off the table.
//!
//! The [`classify`] module answers the questions the rules ask about a node ("is this a
//! constant?", "is this the variable?"), and presents calls, binary operators and negation
//! uniformly as an [`classify::Operation`].
//!
//! # Steps
//!
//! Every rule that fires records a [`step::Step`] into a [`StepCollector`]. Use a [`Vec`] to keep
//! the trace, or `()` to discard it:
//!
//! ```
//! use calcstep_compute::symbolic::{derivative::derivative, step::{Step, StepKind}};
//! use calcstep_parser::parser::{expr::Expr, Parser};
//!
//! let expr = Parser::new("x^2+x").try_parse_full::<Expr>().unwrap();
//!
//! let mut steps: Vec<Step> = Vec::new();
//! assert_eq!(derivative(&expr, "x", &mut steps).unwrap(), "2 * x^1 + 1");
//! assert_eq!(steps[0].kind, StepKind::SumOrDifference);
//!
//! assert_eq!(derivative(&expr, "x", &mut ()).unwrap(), "2 * x^1 + 1");
//! ```

pub mod classify;
pub mod derivative;
pub mod error;
pub mod fold;
pub mod rotate;
pub mod step;
pub mod step_collector;

pub use derivative::{derivative, derivative_with, differentiate, differentiate_with, Derivative};
pub use step::{RuleId, Step, StepKind};
pub use step_collector::StepCollector;
