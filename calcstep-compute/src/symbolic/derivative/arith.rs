//! Sums, differences, products, quotients and negation.

use calcstep_parser::parser::expr::Expr;
use crate::symbolic::{
    classify::{
        depends_on,
        is_constant,
        is_group,
        is_operator_call,
        is_symbol,
        is_target_variable,
        unwrap_group,
    },
    fold::{evaluate_constant, fmt_num, fmt_num_operand},
    step::{RuleId, StepKind},
};
use super::{
    fmt::{grouped, latex, operand_text, prime, wrap},
    Differentiator,
};

impl Differentiator<'_, '_> {
    /// Records a constant factor step, `(expr)' = formula`.
    fn constant_factor(&mut self, expr: &Expr, formula: String) {
        let formula = format!("{} = {}", prime(latex(expr), self.var), formula);
        self.step(StepKind::ConstantFactor, formula);
    }

    /// `c*u`, where `factor` is the constant factor `c` and `other` is `u`.
    fn scaled(&mut self, expr: &Expr, factor: &Expr, other: &Expr) -> String {
        let formula = format!(r"{}\cdot {}", latex(factor), prime(latex(other), self.var));
        self.constant_factor(expr, formula);
        let d = self.diff(other);
        format!("{} * {}", operand_text(factor), wrap(other, &d))
    }

    pub(super) fn multiply(&mut self, expr: &Expr, u: &Expr, v: &Expr) -> String {
        let var = self.var;
        let corrected = self.options.rules.is_corrected();
        let (ut, vt) = (is_target_variable(u, var), is_target_variable(v, var));
        let (uc, vc) = (is_constant(u), is_constant(v));
        let u_composite = is_operator_call(u) || is_group(u);

        if ut {
            if vc {
                self.constant_factor(expr, latex(v));
                return operand_text(v);
            }
            if is_symbol(v) && !(corrected && vt) {
                self.constant_factor(expr, format!(r"1\cdot {}", latex(v)));
                return format!("1 * {}", v);
            }
            if !corrected && is_operator_call(v) {
                self.constant_factor(expr, format!(r"1\cdot {}", prime(latex(v), var)));
                let d = self.diff(v);
                return format!("1 * {}", wrap(v, &d));
            }
            if corrected && !depends_on(v, var) {
                self.constant_factor(expr, latex(v));
                return operand_text(v);
            }
        } else if uc && vt {
            self.constant_factor(expr, latex(u));
            return operand_text(u);
        } else if uc || is_symbol(u) {
            return self.scaled(expr, u, v);
        } else if u_composite && ((is_symbol(v) && !vt) || vc) {
            return self.scaled(expr, v, u);
        } else if u_composite && vt && !corrected {
            return self.scaled(expr, v, u);
        }

        self.product(expr, u, v)
    }

    /// The product rule, `(u*v)' = u'*v + u*v'`.
    fn product(&mut self, expr: &Expr, u: &Expr, v: &Expr) -> String {
        let (inner_u, inner_v) = (unwrap_group(u), unwrap_group(v));
        let (u_tex, v_tex) = (latex(inner_u), latex(inner_v));
        let formula = format!(
            r"{} = {}\cdot\left({}\right) + \left({}\right)\cdot {}",
            prime(latex(expr), self.var),
            prime(&u_tex, self.var),
            v_tex,
            u_tex,
            prime(&v_tex, self.var),
        );
        self.step(StepKind::Product, formula);

        let du = self.diff(inner_u);
        let dv = self.diff(inner_v);
        format!("({})*{} + {}*({})", du, operand_text(v), operand_text(u), dv)
    }

    pub(super) fn divide(&mut self, expr: &Expr, u: &Expr, v: &Expr) -> String {
        let var = self.var;
        let corrected = self.options.rules.is_corrected();
        let (uc, vc) = (is_constant(u), is_constant(v));

        if corrected && uc && vc {
            return self.constant_zero(expr);
        }

        if is_target_variable(u, var) && vc {
            return match evaluate_constant(v) {
                Ok(n) => {
                    self.constant_factor(expr, format!(r"\frac{{1}}{{{}}}", fmt_num(n)));
                    format!("1/{}", fmt_num_operand(n))
                },
                Err(err) => self.error(err),
            };
        }

        if uc && is_target_variable(v, var) {
            return match evaluate_constant(u) {
                Ok(c) => self.reciprocal(expr, c, var),
                Err(err) => self.error(err),
            };
        }

        if !corrected {
            if let (Expr::Paren(_), Expr::Paren(paren)) = (u, v) {
                if uc && (vc || is_symbol(&paren.expr)) {
                    let denominator = match evaluate_constant(v) {
                        Ok(n) => fmt_num(n),
                        Err(_) => paren.expr.to_string(),
                    };
                    return match evaluate_constant(u) {
                        Ok(c) => self.reciprocal(expr, c, &denominator),
                        Err(err) => self.error(err),
                    };
                }
            }
        }

        if depends_on(u, var) || depends_on(v, var) {
            return self.quotient(expr, u, v);
        }

        if !corrected && uc && vc {
            return format!("{} / {}", operand_text(u), operand_text(v));
        }

        self.constant_zero(expr)
    }

    /// `c/a`, read off the power rule as `-c/a^2`.
    fn reciprocal(&mut self, expr: &Expr, c: f64, denominator: &str) -> String {
        let result = format!(r"-\frac{{{}}}{{{}^{{2}}}}", fmt_num(c), denominator);
        self.table(&latex(expr), &result, RuleId::Power, None);
        format!("-({}/{}^2)", fmt_num_operand(c), denominator)
    }

    /// The quotient rule, `(u/v)' = (u'*v - u*v')/v^2`.
    fn quotient(&mut self, expr: &Expr, u: &Expr, v: &Expr) -> String {
        let (inner_u, inner_v) = (unwrap_group(u), unwrap_group(v));
        let (u_tex, v_tex) = (latex(inner_u), latex(inner_v));
        let formula = format!(
            r"{} = \frac{{{}\cdot \left({}\right) - \left({}\right)\cdot {}}}{{\left({}\right)^{{2}}}}",
            prime(latex(expr), self.var),
            prime(&u_tex, self.var),
            v_tex,
            u_tex,
            prime(&v_tex, self.var),
            v_tex,
        );
        self.step(StepKind::Quotient, formula);

        let du = self.diff(inner_u);
        let dv = self.diff(inner_v);
        format!("(({})*{} - {}*({}))/{}^2", du, operand_text(v), operand_text(u), dv, grouped(v))
    }

    /// `u + v` or `u - v`.
    pub(super) fn sum(&mut self, expr: &Expr, u: &Expr, v: &Expr, difference: bool) -> String {
        let sign = if difference { "-" } else { "+" };
        let formula = format!(
            "{} = {} {} {}",
            prime(latex(expr), self.var),
            prime(latex(u), self.var),
            sign,
            prime(latex(v), self.var),
        );
        self.step(StepKind::SumOrDifference, formula);

        let du = self.diff(u);
        let dv = self.diff(v);
        if difference {
            format!("{} - ({})", du, dv)
        } else {
            format!("{} + {}", du, dv)
        }
    }

    /// `-u`.
    pub(super) fn negate(&mut self, expr: &Expr, operand: &Expr) -> String {
        self.constant_factor(expr, format!("-{}", prime(latex(operand), self.var)));
        let d = self.diff(operand);
        format!("-{}", wrap(operand, &d))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::options::{DiffOptions, DiffOptionsBuilder, RuleSet};
    use crate::symbolic::{
        derivative::differentiate_with,
        step::{RuleId, StepKind},
    };

    fn literal(input: &str) -> String {
        differentiate_with(input, "x", &DiffOptions::default()).unwrap().text
    }

    fn corrected(input: &str) -> String {
        let options = DiffOptionsBuilder::new().rules(RuleSet::Corrected).build();
        differentiate_with(input, "x", &options).unwrap().text
    }

    fn kinds(input: &str) -> Vec<StepKind> {
        differentiate_with(input, "x", &DiffOptions::default())
            .unwrap()
            .steps
            .iter()
            .map(|step| step.kind)
            .collect()
    }

    #[test]
    fn constant_factors() {
        assert_eq!(literal("x*3"), "3");
        assert_eq!(literal("3*x"), "3");
        assert_eq!(literal("3x^2"), "3 * (2 * x^1)");
        assert_eq!(literal("a*x^2"), "a * (2 * x^1)");
        assert_eq!(literal("x^2*a"), "a * (2 * x^1)");
        assert_eq!(literal("x^2*4"), "4 * (2 * x^1)");
        assert_eq!(literal("x*a"), "1 * a");
        assert_eq!(kinds("3x^2"), vec![StepKind::ConstantFactor, StepKind::TableLookup]);
    }

    #[test]
    fn variable_times_expression() {
        assert_eq!(literal("x*x"), "1 * x");
        assert_eq!(corrected("x*x"), "(1)*x + x*(1)");

        assert_eq!(literal("x*sin(x)"), "1 * (cos(x))");
        assert_eq!(corrected("x*sin(x)"), "(1)*sin(x) + x*(cos(x))");

        assert_eq!(literal("sin(x)*x"), "x * (cos(x))");
        assert_eq!(corrected("sin(x)*x"), "(cos(x))*x + sin(x)*(1)");

        assert_eq!(corrected("x*sin(a)"), "sin(a)");
    }

    #[test]
    fn product_rule() {
        assert_eq!(literal("sin(x)*cos(x)"), "(cos(x))*cos(x) + sin(x)*(-sin(x))");
        assert_eq!(literal("(x+1)*(x-1)"), "(1 + 0)*(x-1) + (x+1)*(1 - (0))");
        assert_eq!(kinds("sin(x)*cos(x)"), vec![StepKind::Product, StepKind::TableLookup, StepKind::TableLookup]);
    }

    #[test]
    fn quotient_by_constant() {
        assert_eq!(literal("x/4"), "1/4");
        assert_eq!(literal("x/(2-4)"), "1/(-2)");
        assert_eq!(kinds("x/4"), vec![StepKind::ConstantFactor]);
    }

    #[test]
    fn constant_over_variable() {
        let result = differentiate_with("2/x", "x", &DiffOptions::default()).unwrap();
        assert_eq!(result.text, "-(2/x^2)");
        assert_eq!(result.steps[0].rule, Some(RuleId::Power));
        assert_eq!(result.steps[0].formula, r"\left(\frac{2}{x}\right)_{x}^{\prime} = -\frac{2}{x^{2}}");
    }

    #[test]
    fn grouped_constants() {
        assert_eq!(literal("(2)/(3)"), "-(2/3^2)");
        assert_eq!(literal("(2)/(a)"), "-(2/a^2)");
        assert_eq!(corrected("(2)/(3)"), "0");
        assert_eq!(corrected("(2)/(a)"), "0");
    }

    #[test]
    fn constant_quotient() {
        assert_eq!(literal("4/2"), "4 / 2");
        assert_eq!(kinds("4/2"), vec![]);
        assert_eq!(corrected("4/2"), "0");
        assert_eq!(literal("a/b"), "0");
    }

    #[test]
    fn compound_constant_terms() {
        assert_eq!(literal("x+2*3"), "1 + 0");
        assert_eq!(literal("x-(-1)"), "1 - (0)");
        for input in ["x+2*3", "x-(-1)", "x+(1+2)^2"] {
            let zeros = kinds(input).into_iter().filter(|kind| *kind == StepKind::ConstantZero).count();
            assert_eq!(zeros, 1, "{}", input);
        }
    }

    #[test]
    fn quotient_rule() {
        assert_eq!(literal("sin(x)/x"), "((cos(x))*x - sin(x)*(1))/(x)^2");
        assert_eq!(literal("x/(x+1)"), "((1)*(x+1) - x*(1 + 0))/(x+1)^2");
        assert_eq!(kinds("x/(x+1)"), vec![
            StepKind::Quotient,
            StepKind::IdentityVariable,
            StepKind::SumOrDifference,
            StepKind::IdentityVariable,
            StepKind::ConstantZero,
        ]);
    }

    #[test]
    fn sums() {
        assert_eq!(literal("x^2+x+1"), "2 * x^1 + 1 + 0");
        assert_eq!(literal("x-sin(x)"), "1 - (cos(x))");
    }

    #[test]
    fn negation() {
        assert_eq!(literal("-cos(x)"), "-(-sin(x))");
        assert_eq!(literal("-(x^2)"), "-(2 * x^1)");
        assert_eq!(kinds("-x"), vec![StepKind::ConstantFactor, StepKind::IdentityVariable]);
    }
}
