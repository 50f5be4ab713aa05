//! Step-by-step symbolic differentiation.
//!
//! Given an expression such as `sin(x^2)` and a variable, this crate computes the derivative
//! (`cos(x^2) * (2 * x^1)`) along with the ordered list of rules applied to get there: chain rule
//! substitutions, lookups in the table of elementary derivatives, the product and quotient rules,
//! and so on. Each step carries a LaTeX formula suitable for a "show your work" presentation.
//!
//! ```
//! use calcstep_compute::symbolic::differentiate;
//!
//! let result = differentiate("x^3 + 2x", "x").unwrap();
//! assert_eq!(result.text, "3 * x^2 + 2");
//! for step in &result.steps {
//!     println!("{}", step);
//! }
//! ```
//!
//! See [`symbolic`] for the engine and [`options`] for the knobs it exposes.

pub mod options;
pub mod symbolic;

pub use options::{DiffOptions, DiffOptionsBuilder, RuleSet};
