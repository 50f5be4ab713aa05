use ariadne::Fmt;
use calcstep_attrs::ErrorKind;
use calcstep_error::EXPR;

/// No rule applies to this shape of expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}`", expr),
    labels = ["no rule applies to this expression"],
    help = "the variable may only appear in the base of a power with a constant exponent, or in the exponent of a power with a constant base",
)]
pub struct UnsupportedExpression {
    /// The expression, as plain text.
    pub expr: String,
}

/// The function is not in the rule table.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function is not supported", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "supported functions are sqrt, pow, log, ln, sin, cos, tg, ctg, arcsin, arccos, arctg, arcctg, sh, ch, th and cth".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|name| format!("`{}`", name.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// Supported functions with a similar name.
    pub suggestions: Vec<String>,
}

/// The function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments for the `{}` function", name),
    labels = [format!("this call has {} argument{}", given, if *given == 1 { "" } else { "s" })],
    help = format!("`{}` takes {} argument{}", name, expected, if *expected == "1" { "" } else { "s" }),
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The accepted number of arguments, in words.
    pub expected: &'static str,

    /// The number of arguments given.
    pub given: usize,
}

/// A numeric value was requested from an expression that has none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a constant", expr),
    labels = ["this expression must evaluate to a number"],
)]
pub struct NotConstant {
    /// The expression, as plain text.
    pub expr: String,
}

/// A constant evaluated to infinity or NaN, for example because of a division by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not evaluate to a finite number", expr),
    labels = ["this expression"],
    help = "check for a division by zero or the logarithm of a non-positive number",
)]
pub struct NonFiniteConstant {
    /// The expression, as plain text.
    pub expr: String,
}

/// The expression is nested too deeply.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "maximum nesting depth exceeded",
    labels = [format!("this expression is nested more than {} levels deep", depth)],
    help = "split the expression into smaller parts",
)]
pub struct RecursionLimit {
    /// The configured limit.
    pub depth: usize,
}

/// The variable of differentiation is not a plain identifier.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be used as the variable of differentiation", name),
    help = format!("use a name made of letters, such as {}", "x".fg(EXPR)),
)]
pub struct InvalidVariable {
    /// The rejected name.
    pub name: String,
}
