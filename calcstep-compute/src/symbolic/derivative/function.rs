//! Derivatives of the trigonometric and hyperbolic functions, and their inverses.

use calcstep_parser::parser::expr::Expr;
use crate::options::RuleSet;
use crate::symbolic::{
    classify::{depends_on, is_group, is_operator_call, is_target_variable, unwrap_group, Function},
    step::{RuleId, StepKind},
};
use super::{
    fmt::{latex, prime},
    Differentiator,
};

/// Returns the rule table entry of a function of one argument, or [`None`] if the function is
/// not one of the elementary functions handled here.
fn rule(func: Function) -> Option<RuleId> {
    Some(match func {
        Function::Sin => RuleId::Sin,
        Function::Cos => RuleId::Cos,
        Function::Tg => RuleId::Tg,
        Function::Ctg => RuleId::Ctg,
        Function::Arcsin => RuleId::Arcsin,
        Function::Arccos => RuleId::Arccos,
        Function::Arctg => RuleId::Arctg,
        Function::Arcctg => RuleId::Arcctg,
        Function::Sh => RuleId::Sh,
        Function::Ch => RuleId::Ch,
        Function::Th => RuleId::Th,
        Function::Cth => RuleId::Cth,
        _ => return None,
    })
}

fn is_hyperbolic(func: Function) -> bool {
    matches!(func, Function::Sh | Function::Ch | Function::Th | Function::Cth)
}

/// The LaTeX command naming the function.
fn latex_name(func: Function) -> &'static str {
    match func {
        Function::Sin => r"\sin",
        Function::Cos => r"\cos",
        Function::Tg => r"\operatorname{tg}",
        Function::Ctg => r"\operatorname{ctg}",
        Function::Arcsin => r"\arcsin",
        Function::Arccos => r"\arccos",
        Function::Arctg => r"\operatorname{arctg}",
        Function::Arcctg => r"\operatorname{arcctg}",
        Function::Sh => r"\operatorname{sh}",
        Function::Ch => r"\operatorname{ch}",
        Function::Th => r"\operatorname{th}",
        _ => r"\operatorname{cth}",
    }
}

/// The derivative of the function at `a`, as LaTeX.
fn derivative_latex(func: Function, a: &str, rules: RuleSet) -> String {
    let corrected = rules.is_corrected();
    match func {
        Function::Sin => format!(r"\cos\left({}\right)", a),
        Function::Cos => format!(r"-\sin\left({}\right)", a),
        Function::Tg => format!(r"\frac{{1}}{{\cos^2\left({}\right)}}", a),
        Function::Ctg if corrected => format!(r"-\frac{{1}}{{\sin^2\left({}\right)}}", a),
        Function::Ctg => format!(r"\frac{{1}}{{\cos^2\left({}\right)}}", a),
        Function::Arcsin => format!(r"\frac{{1}}{{\sqrt{{1-\left({}\right)^{{2}}}}}}", a),
        Function::Arccos => format!(r"-\frac{{1}}{{\sqrt{{1-\left({}\right)^{{2}}}}}}", a),
        Function::Arctg => format!(r"\frac{{1}}{{1+\left({}\right)^{{2}}}}", a),
        Function::Arcctg => format!(r"-\frac{{1}}{{1+\left({}\right)^{{2}}}}", a),
        Function::Sh => format!(r"\operatorname{{ch}}\left({}\right)", a),
        Function::Ch if corrected => format!(r"\operatorname{{sh}}\left({}\right)", a),
        Function::Ch => format!(r"-\operatorname{{sh}}\left({}\right)", a),
        Function::Th => format!(r"\frac{{1}}{{\operatorname{{ch}}^2\left({}\right)}}", a),
        Function::Cth if corrected => format!(r"-\frac{{1}}{{\operatorname{{sh}}^2\left({}\right)}}", a),
        _ => format!(r"\frac{{1}}{{\operatorname{{sh}}^2\left({}\right)}}", a),
    }
}

/// The derivative of the function at `a`, as text.
fn derivative_text(func: Function, a: &str, rules: RuleSet) -> String {
    match func {
        Function::Sin => format!("cos({})", a),
        Function::Cos => format!("-sin({})", a),
        Function::Tg => format!("1/(cos({})^2)", a),
        Function::Ctg => format!("-1/(sin({})^2)", a),
        Function::Arcsin => format!("1/sqrt(1-({})^2)", a),
        Function::Arccos => format!("-1/sqrt(1-({})^2)", a),
        Function::Arctg => format!("1/(1+({})^2)", a),
        Function::Arcctg => format!("-1/(1+({})^2)", a),
        Function::Sh => format!("ch({})", a),
        Function::Ch if rules.is_corrected() => format!("sh({})", a),
        Function::Ch => format!("-sh({})", a),
        Function::Th => format!("1/(ch({})^2)", a),
        _ => format!("-1/(sh({})^2)", a),
    }
}

impl Differentiator<'_, '_> {
    /// A trigonometric or hyperbolic function, or one of their inverses, applied to `arg`.
    pub(super) fn elementary(&mut self, expr: &Expr, func: Function, arg: &Expr) -> String {
        let Some(rule) = rule(func) else {
            return self.independent_or_unsupported(expr);
        };
        if !depends_on(arg, self.var) {
            return self.constant_zero(expr);
        }

        let rules = self.options.rules;
        if is_target_variable(arg, self.var) {
            let result = derivative_latex(func, self.var, rules);
            self.table(&latex(expr), &result, rule, None);
            return derivative_text(func, self.var, rules);
        }

        if !is_operator_call(arg) && !is_group(arg) {
            return self.independent_or_unsupported(expr);
        }

        let inner = unwrap_group(arg);
        if is_hyperbolic(func) && !rules.is_corrected() {
            // written in terms of the variable, without a substitution
            let whole = prime(latex(expr), self.var);
            let formula = format!(r"{} = {}\cdot {}", whole, whole, prime(latex(inner), self.var));
            self.step(StepKind::ChainRuleIntroduction, formula);
            self.table(&latex(expr), &derivative_latex(func, &latex(inner), rules), rule, None);
        } else {
            let outer = format!(r"{}\left({}\right)", latex_name(func), self.sub);
            self.chain(expr, &outer, inner);
            self.table(&outer, &derivative_latex(func, self.sub, rules), rule, Some(inner));
        }

        let d = self.diff(inner);
        format!("{} * ({})", derivative_text(func, &inner.to_string(), rules), d)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::options::{DiffOptions, DiffOptionsBuilder, RuleSet};
    use crate::symbolic::{
        derivative::{differentiate_with, Derivative},
        step::{RuleId, StepKind},
    };

    fn literal(input: &str) -> Derivative {
        differentiate_with(input, "x", &DiffOptions::default()).unwrap()
    }

    fn corrected(input: &str) -> Derivative {
        let options = DiffOptionsBuilder::new().rules(RuleSet::Corrected).build();
        differentiate_with(input, "x", &options).unwrap()
    }

    #[test]
    fn table_entries() {
        for (input, text, rule) in [
            ("sin(x)", "cos(x)", RuleId::Sin),
            ("cos(x)", "-sin(x)", RuleId::Cos),
            ("tg(x)", "1/(cos(x)^2)", RuleId::Tg),
            ("tan(x)", "1/(cos(x)^2)", RuleId::Tg),
            ("ctg(x)", "-1/(sin(x)^2)", RuleId::Ctg),
            ("arcsin(x)", "1/sqrt(1-(x)^2)", RuleId::Arcsin),
            ("arccos(x)", "-1/sqrt(1-(x)^2)", RuleId::Arccos),
            ("arctg(x)", "1/(1+(x)^2)", RuleId::Arctg),
            ("arcctg(x)", "-1/(1+(x)^2)", RuleId::Arcctg),
            ("sh(x)", "ch(x)", RuleId::Sh),
            ("ch(x)", "-sh(x)", RuleId::Ch),
            ("th(x)", "1/(ch(x)^2)", RuleId::Th),
            ("cth(x)", "-1/(sh(x)^2)", RuleId::Cth),
        ] {
            let result = literal(input);
            assert_eq!(result.text, text);
            assert_eq!(result.steps.len(), 1);
            assert_eq!(result.steps[0].rule, Some(rule));
        }
    }

    #[test]
    fn hyperbolic_cosine() {
        assert_eq!(literal("ch(x)").text, "-sh(x)");
        assert_eq!(corrected("ch(x)").text, "sh(x)");
    }

    #[test]
    fn cotangent_table_formula() {
        assert_eq!(
            literal("ctg(x)").steps[0].formula,
            r"\left(\operatorname{ctg}\left(x\right)\right)_{x}^{\prime} = \frac{1}{\cos^2\left(x\right)}",
        );
        assert_eq!(
            corrected("ctg(x)").steps[0].formula,
            r"\left(\operatorname{ctg}\left(x\right)\right)_{x}^{\prime} = -\frac{1}{\sin^2\left(x\right)}",
        );
        assert!(literal("cth(x)").steps[0].formula.ends_with(r"= \frac{1}{\operatorname{sh}^2\left(x\right)}"));
        assert!(corrected("cth(x)").steps[0].formula.ends_with(r"= -\frac{1}{\operatorname{sh}^2\left(x\right)}"));
    }

    #[test]
    fn chain_rule() {
        let result = literal("tg(3x)");
        assert_eq!(result.text, "1/(cos(3*x)^2) * (3)");
        assert_eq!(result.steps[1].formula, r"\left(\operatorname{tg}\left(z\right)\right)_{z}^{\prime} = \frac{1}{\cos^2\left(z\right)},\thinspace where\thinspace z = 3\cdot x");
    }

    #[test]
    fn hyperbolic_chain_without_substitution() {
        let result = literal("sh(x^2)");
        assert_eq!(result.text, "ch(x^2) * (2 * x^1)");
        assert_eq!(result.steps[0].kind, StepKind::ChainRuleIntroduction);
        assert!(!result.steps[0].formula.contains("thinspace"));
        assert_eq!(result.steps[1].formula, r"\left(\operatorname{sh}\left(x^{2}\right)\right)_{x}^{\prime} = \operatorname{ch}\left(x^{2}\right)");

        let result = corrected("sh(x^2)");
        assert!(result.steps[0].formula.ends_with(r",\thinspace where\thinspace z = x^{2}"));
        assert!(result.steps[1].formula.starts_with(r"\left(\operatorname{sh}\left(z\right)\right)_{z}^{\prime}"));
    }

    #[test]
    fn constant_argument() {
        let result = literal("sin(2)");
        assert_eq!(result.text, "0");
        assert_eq!(result.steps[0].kind, StepKind::ConstantZero);
        assert_eq!(literal("cos(a+1)").text, "0");
    }

    #[test]
    fn grouped_argument() {
        assert_eq!(literal("sin((x+1))").text, "cos(x+1) * (1 + 0)");
    }
}
