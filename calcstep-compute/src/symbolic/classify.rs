//! Predicates describing the shape of an expression node.
//!
//! Calls (`sin(x)`), binary operators (`x^2`) and negation (`-x`) are all presented uniformly as
//! an [`Operation`]: a [`Function`] tag applied to one or two argument nodes.

use calcstep_error::Error;
use calcstep_parser::parser::{
    expr::Expr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use levenshtein::levenshtein;
use super::error::{UnknownFunction, WrongArgumentCount};

/// The operations the engine has rules for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Pow,
    Multiply,
    Divide,
    Add,
    Subtract,
    Negate,
    Sqrt,
    Log,
    Sin,
    Cos,
    Tg,
    Ctg,
    Arcsin,
    Arccos,
    Arctg,
    Arcctg,
    Sh,
    Ch,
    Th,
    Cth,
}

/// Every function name accepted in a call, including aliases.
const NAMES: [(&str, Function); 24] = [
    ("pow", Function::Pow),
    ("sqrt", Function::Sqrt),
    ("log", Function::Log),
    ("ln", Function::Log),
    ("sin", Function::Sin),
    ("cos", Function::Cos),
    ("tg", Function::Tg),
    ("tan", Function::Tg),
    ("ctg", Function::Ctg),
    ("cot", Function::Ctg),
    ("arcsin", Function::Arcsin),
    ("arccos", Function::Arccos),
    ("arctg", Function::Arctg),
    ("arctan", Function::Arctg),
    ("arcctg", Function::Arcctg),
    ("arccot", Function::Arcctg),
    ("sh", Function::Sh),
    ("sinh", Function::Sh),
    ("ch", Function::Ch),
    ("cosh", Function::Ch),
    ("th", Function::Th),
    ("tanh", Function::Th),
    ("cth", Function::Cth),
    ("coth", Function::Cth),
];

impl Function {
    /// Looks up a function by the name used in a call.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, func)| *func)
    }

    /// Returns the callable function names that are similar to the given name.
    pub fn similar_names(name: &str) -> Vec<String> {
        NAMES
            .iter()
            .filter(|(n, _)| levenshtein(n, name) < 2)
            .map(|(n, _)| n.to_string())
            .collect()
    }

    /// Returns the number of arguments the function accepts, in words.
    pub fn arity(self) -> &'static str {
        match self {
            Function::Log => "1 or 2",
            Function::Pow | Function::Multiply | Function::Divide | Function::Add | Function::Subtract => "2",
            _ => "1",
        }
    }

    /// Returns true if the function accepts the given number of arguments.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Function::Log => count == 1 || count == 2,
            Function::Pow | Function::Multiply | Function::Divide | Function::Add | Function::Subtract => count == 2,
            _ => count == 1,
        }
    }
}

/// An operation node, seen as a function applied to its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation<'a> {
    /// The function being applied.
    pub func: Function,

    /// The arguments, in order. For binary operators these are the left and right operands.
    pub args: Vec<&'a Expr>,
}

/// Returns the operation view of the node, or [`None`] for literals and parenthesized
/// expressions.
///
/// Calls to unknown functions, or with the wrong number of arguments, produce an error.
pub fn operation(expr: &Expr) -> Option<Result<Operation<'_>, Error>> {
    match expr {
        Expr::Binary(binary) => {
            let func = match binary.op.kind {
                BinOpKind::Exp => Function::Pow,
                BinOpKind::Mul => Function::Multiply,
                BinOpKind::Div => Function::Divide,
                BinOpKind::Add => Function::Add,
                BinOpKind::Sub => Function::Subtract,
            };
            Some(Ok(Operation { func, args: vec![&*binary.lhs, &*binary.rhs] }))
        },
        Expr::Unary(unary) => match unary.op.kind {
            UnaryOpKind::Neg => Some(Ok(Operation { func: Function::Negate, args: vec![&*unary.operand] })),
        },
        Expr::Call(call) => {
            let name = call.name.name.as_str();
            let Some(func) = Function::from_name(name) else {
                return Some(Err(Error::new(vec![call.name.span.clone()], UnknownFunction {
                    name: name.to_string(),
                    suggestions: Function::similar_names(name),
                })));
            };

            if !func.accepts(call.args.len()) {
                return Some(Err(Error::new(vec![call.span()], WrongArgumentCount {
                    name: name.to_string(),
                    expected: func.arity(),
                    given: call.args.len(),
                })));
            }

            Some(Ok(Operation { func, args: call.args.iter().collect() }))
        },
        Expr::Literal(_) | Expr::Paren(_) => None,
    }
}

/// Returns true if the node is a call, a binary operation or a negation.
pub fn is_operator_call(expr: &Expr) -> bool {
    matches!(expr, Expr::Call(_) | Expr::Binary(_) | Expr::Unary(_))
}

/// Returns true if the node is a bare symbol.
pub fn is_symbol(expr: &Expr) -> bool {
    matches!(expr, Expr::Literal(Literal::Symbol(_)))
}

/// Returns true if the node is the symbol `e`, Euler's number.
pub fn is_euler_constant(expr: &Expr) -> bool {
    matches!(expr, Expr::Literal(Literal::Symbol(sym)) if sym.name == "e")
}

/// Returns true if the node is a parenthesized expression.
pub fn is_group(expr: &Expr) -> bool {
    matches!(expr, Expr::Paren(_))
}

/// Strips one level of parentheses, returning the content of a parenthesized expression.
pub fn unwrap_group(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => &paren.expr,
        _ => expr,
    }
}

/// Returns true if the node is a number, or an operation on numbers only, such as `2*3`, `(4)`
/// or `-1`. Symbols, including `e`, are never constant.
pub fn is_constant(expr: &Expr) -> bool {
    let inner = unwrap_group(expr);
    match inner {
        Expr::Literal(Literal::Number(_)) => true,
        Expr::Unary(unary) => is_constant(&unary.operand),
        Expr::Binary(_) | Expr::Call(_) => match operation(inner) {
            Some(Ok(op)) => op.args.len() == 2 && op.args.iter().all(|arg| is_constant(arg)),
            _ => false,
        },
        Expr::Literal(Literal::Symbol(_)) | Expr::Paren(_) => false,
    }
}

/// Returns true if the node is the variable `var`, possibly wrapped in one pair of parentheses.
pub fn is_target_variable(expr: &Expr, var: &str) -> bool {
    matches!(unwrap_group(expr), Expr::Literal(Literal::Symbol(sym)) if sym.name == var)
}

/// Returns true if the variable `var` occurs anywhere in the node.
pub fn depends_on(expr: &Expr, var: &str) -> bool {
    match expr {
        Expr::Literal(Literal::Symbol(sym)) => sym.name == var,
        Expr::Literal(Literal::Number(_)) => false,
        Expr::Paren(paren) => depends_on(&paren.expr, var),
        Expr::Call(call) => call.args.iter().any(|arg| depends_on(arg, var)),
        Expr::Unary(unary) => depends_on(&unary.operand, var),
        Expr::Binary(binary) => depends_on(&binary.lhs, var) || depends_on(&binary.rhs, var),
    }
}

#[cfg(test)]
mod tests {
    use calcstep_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn constants() {
        for input in ["2", "(2)", "2*3", "(2^3)", "-1", "log(8, 2)", "pow(2, 3)", "(1+2)/4"] {
            assert!(is_constant(&parse(input)), "{}", input);
        }
        for input in ["x", "e", "a", "2*x", "sin(2)", "((2))", "f(1, 2)"] {
            assert!(!is_constant(&parse(input)), "{}", input);
        }
    }

    #[test]
    fn target_variable() {
        assert!(is_target_variable(&parse("x"), "x"));
        assert!(is_target_variable(&parse("(x)"), "x"));
        assert!(!is_target_variable(&parse("((x))"), "x"));
        assert!(!is_target_variable(&parse("y"), "x"));
        assert!(is_target_variable(&parse("t"), "t"));
    }

    #[test]
    fn shapes() {
        assert!(is_operator_call(&parse("sin(x)")));
        assert!(is_operator_call(&parse("x+1")));
        assert!(is_operator_call(&parse("-x")));
        assert!(!is_operator_call(&parse("(x+1)")));
        assert!(is_group(&parse("(x+1)")));
        assert!(is_symbol(&parse("a")));
        assert!(!is_symbol(&parse("(a)")));
        assert!(is_euler_constant(&parse("e")));
        assert!(!is_euler_constant(&parse("ex")));
    }

    #[test]
    fn dependence() {
        assert!(depends_on(&parse("sin(2*(x+1))"), "x"));
        assert!(!depends_on(&parse("sin(2*(y+1))"), "x"));
    }

    #[test]
    fn operation_views() {
        let expr = parse("x^2");
        let op = operation(&expr).unwrap().unwrap();
        assert_eq!(op.func, Function::Pow);
        assert_eq!(op.args.len(), 2);

        let expr = parse("pow(x, 2)");
        assert_eq!(operation(&expr).unwrap().unwrap().func, Function::Pow);

        let expr = parse("arctan(x)");
        assert_eq!(operation(&expr).unwrap().unwrap().func, Function::Arctg);

        assert!(operation(&parse("(x)")).is_none());
        assert!(operation(&parse("x")).is_none());
    }

    #[test]
    fn unknown_function_suggestions() {
        let expr = parse("sinn(x)");
        let err = operation(&expr).unwrap().unwrap_err();
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.suggestions, vec!["sin".to_string(), "sinh".to_string()]);
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn wrong_argument_count() {
        let expr = parse("sin(x, 2)");
        let err = operation(&expr).unwrap().unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&WrongArgumentCount {
            name: "sin".to_string(),
            expected: "1",
            given: 2,
        }));

        assert!(operation(&parse("log(x, 2)")).unwrap().is_ok());
        assert!(operation(&parse("log(x, 2, 3)")).unwrap().is_err());
    }
}
