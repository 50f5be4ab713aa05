//! Symbolic differentiation with a step-by-step trace.
//!
//! The engine walks a parsed [`Expr`] tree, and for each node picks the rule of differentiation
//! that applies to it. Every rule that fires records a [`Step`] with a LaTeX formula describing
//! its application, and contributes a piece of the derivative, written as plain text in the same
//! grammar the input was parsed from.
//!
//! ```
//! use calcstep_compute::symbolic::derivative::differentiate;
//! use calcstep_compute::symbolic::step::StepKind;
//!
//! let result = differentiate("sin(x^2)", "x").unwrap();
//! assert_eq!(result.text, "cos(x^2) * (2 * x^1)");
//! assert_eq!(result.steps[0].kind, StepKind::ChainRuleIntroduction);
//! ```
//!
//! Composite functions are split with the chain rule: `sin(x^2)` is written as `sin(z)` with the
//! substitution `z = x^2`. The name of the substitution variable is picked with
//! [`next_name`](super::rotate::next_name) so that it never collides with the variable of
//! differentiation.

mod arith;
mod fmt;
mod function;
mod power;

use calcstep_error::Error;
use calcstep_parser::{
    normalize,
    parser::{expr::Expr, Parser},
};
use log::{debug, trace, warn};
use crate::options::DiffOptions;
use super::{
    classify::{depends_on, is_constant, is_target_variable, operation, unwrap_group, Function, Operation},
    error::{InvalidVariable, RecursionLimit, UnsupportedExpression},
    rotate::next_name,
    step::{RuleId, Step, StepKind},
    step_collector::StepCollector,
};
use self::fmt::{latex, prime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The derivative of an expression given as text, along with the steps taken to compute it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Derivative {
    /// The input after normalization. Spans in the trace and in errors refer to this string.
    pub input: String,

    /// The derivative, as plain text that can be parsed again.
    pub text: String,

    /// The rules applied, in the order they were applied.
    pub steps: Vec<Step>,
}

/// Differentiates the given text with respect to `var`, with the default [`DiffOptions`].
///
/// The input is normalized with [`normalize`] and parsed before differentiation. Spans in the
/// returned errors refer to the normalized input.
pub fn differentiate(input: &str, var: &str) -> Result<Derivative, Vec<Error>> {
    differentiate_with(input, var, &DiffOptions::default())
}

/// Differentiates the given text with respect to `var`, with the given [`DiffOptions`].
pub fn differentiate_with(input: &str, var: &str, options: &DiffOptions) -> Result<Derivative, Vec<Error>> {
    let input = normalize(input);
    let expr = Parser::new(&input).try_parse_full::<Expr>().map_err(|err| vec![err])?;

    let mut steps = Vec::new();
    let text = derivative_with(&expr, var, options, &mut steps)?;
    Ok(Derivative { input, text, steps })
}

/// Differentiates an expression with respect to `var`, with the default [`DiffOptions`].
///
/// Steps are pushed into `steps` as the rules are applied. Pass `&mut ()` if the trace is not
/// needed.
pub fn derivative(
    expr: &Expr,
    var: &str,
    steps: &mut dyn StepCollector<Step>,
) -> Result<String, Vec<Error>> {
    derivative_with(expr, var, &DiffOptions::default(), steps)
}

/// Differentiates an expression with respect to `var`, with the given [`DiffOptions`].
///
/// Sub-expressions that cannot be differentiated do not stop the process: every problem in the
/// expression is collected and returned together.
pub fn derivative_with(
    expr: &Expr,
    var: &str,
    options: &DiffOptions,
    steps: &mut dyn StepCollector<Step>,
) -> Result<String, Vec<Error>> {
    if var.is_empty() || !var.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return Err(vec![Error::new(Vec::new(), InvalidVariable { name: var.to_string() })]);
    }

    let mut differentiator = Differentiator::new(var, options, steps);
    let text = differentiator.diff(expr);
    if differentiator.errors.is_empty() {
        Ok(text)
    } else {
        Err(differentiator.errors)
    }
}

/// State of a single differentiation.
struct Differentiator<'a, 's> {
    /// The variable of differentiation.
    var: &'a str,

    /// The name of the substitution variable used in chain rule steps.
    sub: &'static str,

    options: &'a DiffOptions,
    steps: &'s mut dyn StepCollector<Step>,

    /// Errors found so far.
    errors: Vec<Error>,

    /// Current nesting depth.
    depth: usize,

    /// Set once the recursion limit has been reported.
    exhausted: bool,
}

impl<'a, 's> Differentiator<'a, 's> {
    fn new(var: &'a str, options: &'a DiffOptions, steps: &'s mut dyn StepCollector<Step>) -> Self {
        Self {
            var,
            sub: next_name(var),
            options,
            steps,
            errors: Vec::new(),
            depth: 0,
            exhausted: false,
        }
    }

    /// Records a step that does not read the rule table.
    fn step(&mut self, kind: StepKind, formula: String) {
        trace!("step {:?}: {}", kind, formula);
        self.steps.push(Step::new(kind, formula));
    }

    /// Records an error. The failing sub-expression contributes nothing to the derivative.
    fn error(&mut self, err: Error) -> String {
        warn!("{:?} at {:?}", err.kind, err.spans);
        self.errors.push(err);
        String::new()
    }

    /// Returns the derivative of the node as text.
    fn diff(&mut self, expr: &Expr) -> String {
        if self.depth >= self.options.max_depth {
            if !self.exhausted {
                self.exhausted = true;
                return self.error(Error::new(vec![expr.span()], RecursionLimit {
                    depth: self.options.max_depth,
                }));
            }
            return String::new();
        }

        self.depth += 1;
        let result = self.diff_node(expr);
        self.depth -= 1;
        result
    }

    fn diff_node(&mut self, expr: &Expr) -> String {
        if self.folds_to_zero(expr) {
            return self.constant_zero(expr);
        }

        match operation(expr) {
            Some(Ok(op)) => self.diff_operation(expr, op),
            Some(Err(err)) => self.error(err),
            None => match expr {
                Expr::Paren(paren) => format!("({})", self.diff(&paren.expr)),
                _ if is_target_variable(expr, self.var) => {
                    let formula = format!("{} = 1", prime(latex(expr), self.var));
                    self.step(StepKind::IdentityVariable, formula);
                    "1".to_string()
                },
                _ => self.constant_zero(expr),
            },
        }
    }

    /// Returns true if the node is a compound constant whose derivative is a single `0` step. Under
    /// the literal rules, a quotient of constants is left to the divide rule instead.
    fn folds_to_zero(&self, expr: &Expr) -> bool {
        if !is_constant(expr) {
            return false;
        }
        self.options.rules.is_corrected()
            || !matches!(operation(unwrap_group(expr)), Some(Ok(op)) if op.func == Function::Divide)
    }

    fn diff_operation(&mut self, expr: &Expr, op: Operation) -> String {
        debug!("applying the {:?} rule to `{}`", op.func, expr);
        match (op.func, op.args.as_slice()) {
            (Function::Pow, [base, exp]) => self.pow(expr, base, exp),
            (Function::Sqrt, [arg]) => self.sqrt(expr, arg),
            (Function::Log, [arg]) => self.ln(expr, arg),
            (Function::Log, [arg, base]) => self.log(expr, arg, base),
            (Function::Multiply, [lhs, rhs]) => self.multiply(expr, lhs, rhs),
            (Function::Divide, [lhs, rhs]) => self.divide(expr, lhs, rhs),
            (Function::Add, [lhs, rhs]) => self.sum(expr, lhs, rhs, false),
            (Function::Subtract, [lhs, rhs]) => self.sum(expr, lhs, rhs, true),
            (Function::Negate, [operand]) => self.negate(expr, operand),
            (func, [arg]) => self.elementary(expr, func, arg),
            _ => self.independent_or_unsupported(expr),
        }
    }

    /// Records the derivative of a constant, `0`.
    fn constant_zero(&mut self, expr: &Expr) -> String {
        let formula = format!("{} = 0", prime(latex(expr), self.var));
        self.step(StepKind::ConstantZero, formula);
        "0".to_string()
    }

    /// Handles a node no rule matched: its derivative is `0` if it does not contain the variable,
    /// and it is an error otherwise.
    fn independent_or_unsupported(&mut self, expr: &Expr) -> String {
        if depends_on(expr, self.var) {
            self.error(Error::new(vec![expr.span()], UnsupportedExpression { expr: expr.to_string() }))
        } else {
            trace!("`{}` does not depend on `{}`", expr, self.var);
            self.constant_zero(expr)
        }
    }

    /// Records a chain rule step splitting `whole` into the outer function `outer` (LaTeX, written
    /// in terms of the substitution variable) and the inner expression `inner`.
    fn chain(&mut self, whole: &Expr, outer: &str, inner: &Expr) {
        let inner_tex = latex(inner);
        let formula = format!(
            r"{} = {}\cdot {}{}",
            prime(latex(whole), self.var),
            prime(outer, self.sub),
            prime(&inner_tex, self.var),
            fmt::clause(&self.options.connector, self.sub, &inner_tex),
        );
        self.step(StepKind::ChainRuleIntroduction, formula);
    }

    /// Records a table step. With `inner`, the step is written in terms of the substitution
    /// variable standing for `inner`; otherwise it is written in terms of the variable.
    fn table(&mut self, outer: &str, result: &str, rule: RuleId, inner: Option<&Expr>) {
        let formula = match inner {
            Some(inner) => format!(
                "{} = {}{}",
                prime(outer, self.sub),
                result,
                fmt::clause(&self.options.connector, self.sub, &latex(inner)),
            ),
            None => format!("{} = {}", prime(outer, self.var), result),
        };
        trace!("table step {:?}: {}", rule, formula);
        self.steps.push(Step::table(StepKind::TableLookup, formula, rule));
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_absolute_error_msg, afe_is_absolute_eq, assert_float_absolute_eq};
    use pretty_assertions::assert_eq;
    use crate::options::{DiffOptionsBuilder, RuleSet};
    use crate::symbolic::error::UnknownFunction;
    use calcstep_parser::parser::error::kind::TooDeep;
    use super::*;

    fn corrected() -> DiffOptions {
        DiffOptionsBuilder::new().rules(RuleSet::Corrected).build()
    }

    fn kinds(steps: &[Step]) -> Vec<StepKind> {
        steps.iter().map(|step| step.kind).collect()
    }

    /// Evaluates an expression at the given value of `x`. Only used to check derivatives
    /// numerically.
    fn eval(expr: &Expr, x: f64) -> f64 {
        use calcstep_parser::parser::literal::Literal;

        match operation(expr) {
            Some(op) => {
                let op = op.unwrap();
                let args = op.args.iter().map(|arg| eval(arg, x)).collect::<Vec<_>>();
                match (op.func, args.as_slice()) {
                    (Function::Pow, [a, b]) => a.powf(*b),
                    (Function::Multiply, [a, b]) => a * b,
                    (Function::Divide, [a, b]) => a / b,
                    (Function::Add, [a, b]) => a + b,
                    (Function::Subtract, [a, b]) => a - b,
                    (Function::Negate, [a]) => -a,
                    (Function::Sqrt, [a]) => a.sqrt(),
                    (Function::Log, [a]) => a.ln(),
                    (Function::Log, [a, b]) => a.ln() / b.ln(),
                    (Function::Sin, [a]) => a.sin(),
                    (Function::Cos, [a]) => a.cos(),
                    (Function::Tg, [a]) => a.tan(),
                    (Function::Ctg, [a]) => 1.0 / a.tan(),
                    (Function::Arcsin, [a]) => a.asin(),
                    (Function::Arccos, [a]) => a.acos(),
                    (Function::Arctg, [a]) => a.atan(),
                    (Function::Arcctg, [a]) => std::f64::consts::FRAC_PI_2 - a.atan(),
                    (Function::Sh, [a]) => a.sinh(),
                    (Function::Ch, [a]) => a.cosh(),
                    (Function::Th, [a]) => a.tanh(),
                    (Function::Cth, [a]) => 1.0 / a.tanh(),
                    other => panic!("cannot evaluate {:?}", other),
                }
            },
            None => match expr {
                Expr::Paren(paren) => eval(&paren.expr, x),
                Expr::Literal(Literal::Number(num)) => num.value,
                Expr::Literal(Literal::Symbol(sym)) if sym.name == "x" => x,
                Expr::Literal(Literal::Symbol(sym)) if sym.name == "e" => std::f64::consts::E,
                other => panic!("cannot evaluate {}", other),
            },
        }
    }

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    /// Checks the derivative against a central finite difference at `x`.
    fn assert_numerically_correct(input: &str, x: f64) {
        let result = differentiate_with(input, "x", &corrected()).unwrap();
        let derivative = parse(&result.text);
        let expr = parse(&result.input);

        let h = 1e-6;
        let numeric = (eval(&expr, x + h) - eval(&expr, x - h)) / (2.0 * h);
        let symbolic = eval(&derivative, x);
        assert_float_absolute_eq!(symbolic, numeric, 1e-4 * (1.0 + numeric.abs()));
    }

    #[test]
    fn constant() {
        for input in ["2", "0.5", "a", "e"] {
            let result = differentiate(input, "x").unwrap();
            assert_eq!(result.text, "0");
            assert_eq!(kinds(&result.steps), vec![StepKind::ConstantZero]);
        }
    }

    #[test]
    fn compound_constant() {
        for input in ["2*3", "1+2", "-1", "(2)", "2^3", "log(8, 2)", "((4-1))", "-(2*3)"] {
            for options in [DiffOptions::default(), corrected()] {
                let result = differentiate_with(input, "x", &options).unwrap();
                assert_eq!(result.text, "0", "{}", input);
                assert_eq!(kinds(&result.steps), vec![StepKind::ConstantZero], "{}", input);
            }
        }
    }

    #[test]
    fn variable() {
        let result = differentiate("x", "x").unwrap();
        assert_eq!(result.text, "1");
        assert_eq!(result.steps, vec![Step::new(StepKind::IdentityVariable, r"\left(x\right)_{x}^{\prime} = 1")]);
    }

    #[test]
    fn power() {
        let result = differentiate("x^5", "x").unwrap();
        assert_eq!(result.text, "5 * x^4");
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].kind, StepKind::TableLookup);
        assert_eq!(result.steps[0].rule, Some(RuleId::Power));
    }

    #[test]
    fn sum_step_order() {
        let result = differentiate("x^2+x^3", "x").unwrap();
        assert_eq!(result.text, "2 * x^1 + 3 * x^2");
        assert_eq!(kinds(&result.steps), vec![
            StepKind::SumOrDifference,
            StepKind::TableLookup,
            StepKind::TableLookup,
        ]);
        assert!(result.steps[1].formula.contains("x^{2}"));
        assert!(result.steps[2].formula.contains("x^{3}"));
    }

    #[test]
    fn chain_rule() {
        let result = differentiate("sin(x^2)", "x").unwrap();
        assert_eq!(result.text, "cos(x^2) * (2 * x^1)");
        assert_eq!(kinds(&result.steps), vec![
            StepKind::ChainRuleIntroduction,
            StepKind::TableLookup,
            StepKind::TableLookup,
        ]);
        assert_eq!(
            result.steps[0].formula,
            r"\left(\sin\left(x^{2}\right)\right)_{x}^{\prime} = \left(\sin\left(z\right)\right)_{z}^{\prime}\cdot \left(x^{2}\right)_{x}^{\prime},\thinspace where\thinspace z = x^{2}",
        );
        assert_eq!(result.steps[1].rule, Some(RuleId::Sin));
        assert_eq!(result.steps[2].rule, Some(RuleId::Power));
    }

    #[test]
    fn connector_and_substitution_name() {
        let options = DiffOptionsBuilder::new().connector("где").build();
        let result = differentiate_with("sin(z^2)", "z", &options).unwrap();
        assert_eq!(result.text, "cos(z^2) * (2 * z^1)");
        assert!(result.steps[0].formula.ends_with(r",\thinspace где\thinspace t = z^{2}"));
    }

    #[test]
    fn product() {
        let result = differentiate("sin(x)*cos(x)", "x").unwrap();
        assert_eq!(result.text, "(cos(x))*cos(x) + sin(x)*(-sin(x))");
        assert_eq!(kinds(&result.steps), vec![
            StepKind::Product,
            StepKind::TableLookup,
            StepKind::TableLookup,
        ]);
    }

    #[test]
    fn quotient() {
        let result = differentiate("sin(x)/x", "x").unwrap();
        assert_eq!(result.text, "((cos(x))*x - sin(x)*(1))/(x)^2");
        assert_eq!(kinds(&result.steps), vec![
            StepKind::Quotient,
            StepKind::TableLookup,
            StepKind::IdentityVariable,
        ]);
    }

    #[test]
    fn results_parse() {
        for input in [
            "x^2+x+1", "sin(x)*cos(x)", "sqrt(x^2+1)", "2^x", "e^(2x)", "log(x^2+1)", "log(x, 2)",
            "tg(3x)", "(x+1)^3", "x^3/(x+1)", "-cos(x)", "a^2", "x*x", "(2)/(3)", "ch(2x)",
        ] {
            for options in [DiffOptions::default(), corrected()] {
                let result = differentiate_with(input, "x", &options).unwrap();
                assert!(Parser::new(&result.text).try_parse_full::<Expr>().is_ok(), "{} -> {}", input, result.text);
            }
        }
    }

    #[test]
    fn finite_differences() {
        for input in [
            "x^2+x+1", "sin(x)*cos(x)", "sin(x)/x", "sin(x^2)", "sqrt(x^2+1)", "2^x", "e^(2x)",
            "log(x^2+1)", "ln(x)", "log(x, 2)", "tg(3x)", "arctg(x^2)", "sh(x)*x", "ch(2x)",
            "x^3/(x+1)", "-cos(x)", "x*sin(x)", "(x+1)^3", "cth(x)", "arcctg(x)", "3^(x^2)",
            "log(sin(x), e)", "th(x)", "ctg(x)", "arcsin(x)", "x*x", "sqrt(x)", "1/x", "x/4",
            "2*x^3-5x", "(x^2+1)*(x-3)", "cos(x)^2", "e^x", "x^0.5",
        ] {
            assert_numerically_correct(input, 0.7);
        }
        assert_numerically_correct("arccos(x/2)", 0.5);
    }

    #[test]
    fn deeply_nested_input() {
        let input = "(".repeat(10_000) + "x" + &")".repeat(10_000);
        let errs = differentiate(&input, "x").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].fatal);
        assert!(errs[0].downcast_ref::<TooDeep>().is_some());

        let chain = "x+".repeat(5_000) + "x";
        assert!(differentiate(&chain, "x").is_err());
    }

    #[test]
    fn unsupported_expression() {
        let errs = differentiate("x^x", "x").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].downcast_ref(), Some(&UnsupportedExpression { expr: "x^x".to_string() }));
        assert_eq!(errs[0].spans, vec![0..3]);
    }

    #[test]
    fn all_errors_reported() {
        let errs = differentiate("x^x + sinn(x)", "x").unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(errs[0].downcast_ref::<UnsupportedExpression>().is_some());
        let unknown = errs[1].downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(unknown.name, "sinn");
        assert_eq!(errs[1].spans, vec![4..8]);
    }

    #[test]
    fn recursion_limit() {
        let options = DiffOptionsBuilder::new().max_depth(3).build();
        let errs = differentiate_with("sin(sin(sin(sin(sin(x)))))", "x", &options).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].downcast_ref(), Some(&RecursionLimit { depth: 3 }));
    }

    #[test]
    fn invalid_variable() {
        for var in ["", "x1", "x y", "+"] {
            let errs = differentiate("x", var).unwrap_err();
            assert_eq!(errs[0].downcast_ref(), Some(&InvalidVariable { name: var.to_string() }));
            assert!(errs[0].spans.is_empty());
        }
    }

    #[test]
    fn parse_error() {
        let errs = differentiate("sin(x", "x").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].fatal);
    }

    #[test]
    fn discarding_steps() {
        let expr = parse("x^3");
        assert_eq!(derivative(&expr, "x", &mut ()).unwrap(), "3 * x^2");
    }

    #[test]
    fn normalized_input() {
        let result = differentiate("3 × ln(x)", "x").unwrap();
        assert_eq!(result.input, "3*log(x)");
        assert_eq!(result.text, "3 * (1/(x))");
    }
}
