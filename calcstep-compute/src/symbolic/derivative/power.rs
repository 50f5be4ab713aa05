//! Powers, roots, exponentials and logarithms.

use calcstep_parser::parser::expr::Expr;
use crate::symbolic::{
    classify::{
        depends_on,
        is_constant,
        is_euler_constant,
        is_group,
        is_operator_call,
        is_symbol,
        is_target_variable,
        unwrap_group,
    },
    fold::{evaluate_constant, fmt_num, fmt_num_operand},
    step::RuleId,
};
use super::{
    fmt::{grouped, latex, latex_operand, operand_text, wrap},
    Differentiator,
};

/// The pieces of the power rule `(u^n)' = n*u^(n-1)` for an exponent `n`.
struct PowerExponent {
    /// `n`, as text.
    coef: String,

    /// `n-1`, as text.
    reduced: String,

    /// `n`, as LaTeX, for use as a factor.
    coef_tex: String,

    /// `n`, as LaTeX, for use as an exponent.
    exp_tex: String,

    /// `n-1`, as LaTeX.
    reduced_tex: String,
}

impl Differentiator<'_, '_> {
    /// Splits an exponent that does not depend on the variable into the pieces of the power rule.
    /// Constant exponents are folded to a number.
    fn power_exponent(&mut self, exp: &Expr) -> Option<PowerExponent> {
        if !is_constant(exp) {
            return Some(PowerExponent {
                coef: operand_text(exp),
                reduced: format!("({}-1)", exp),
                coef_tex: latex_operand(exp),
                exp_tex: latex(exp.innermost()),
                reduced_tex: format!("{}-1", latex(exp)),
            });
        }

        match evaluate_constant(exp) {
            Ok(n) => Some(PowerExponent {
                coef: fmt_num(n),
                reduced: fmt_num_operand(n - 1.0),
                coef_tex: fmt_num(n),
                exp_tex: fmt_num(n),
                reduced_tex: fmt_num(n - 1.0),
            }),
            Err(err) => {
                self.error(err);
                None
            },
        }
    }

    pub(super) fn pow(&mut self, expr: &Expr, base: &Expr, exp: &Expr) -> String {
        let var = self.var;
        let exp_depends = depends_on(exp, var);

        if is_target_variable(base, var) && !exp_depends {
            let Some(n) = self.power_exponent(exp) else {
                return String::new();
            };
            let result = format!(r"{}\cdot {}^{{{}}}", n.coef_tex, var, n.reduced_tex);
            self.table(&latex(expr), &result, RuleId::Power, None);
            return format!("{} * {}^{}", n.coef, var, n.reduced);
        }

        if exp_depends && !depends_on(base, var) {
            return self.exponential(expr, base, exp);
        }

        if !exp_depends && (is_group(base) || is_operator_call(base)) {
            return self.power_of_composite(expr, base, exp);
        }

        if is_symbol(base) && !is_target_variable(base, var) && is_constant(exp) {
            if self.options.rules.is_corrected() {
                return self.constant_zero(expr);
            }
            return expr.to_string();
        }

        self.independent_or_unsupported(expr)
    }

    /// `a^u`, where the base does not depend on the variable. The base may be any expression, such
    /// as `2`, `a`, `(a+1)` or `sin(1)`.
    fn exponential(&mut self, expr: &Expr, base: &Expr, exp: &Expr) -> String {
        let natural = is_euler_constant(unwrap_group(base));
        let (rule, ln_text, ln_tex) = if natural {
            (RuleId::NaturalExponential, String::new(), String::new())
        } else {
            (
                RuleId::Exponential,
                format!(" * ln({})", base.innermost()),
                format!(r"\ln{{{}}}", latex(base.innermost())),
            )
        };
        let base_text = operand_text(base);
        let base_tex = latex_operand(base);

        if is_target_variable(exp, self.var) {
            let result = format!("{}^{{{}}}{}", base_tex, self.var, ln_tex);
            self.table(&latex(expr), &result, rule, None);
            return format!("{}^{}{}", base_text, self.var, ln_text);
        }

        let inner = unwrap_group(exp);
        let outer = format!("{}^{{{}}}", base_tex, self.sub);
        self.chain(expr, &outer, inner);
        self.table(&outer, &format!("{}{}", outer, ln_tex), rule, Some(inner));

        let d = self.diff(exp);
        format!("{}^{}{} * {}", base_text, operand_text(exp), ln_text, wrap(exp, &d))
    }

    /// `u^n`, where `u` is an operation or a parenthesized expression, and `n` does not depend on
    /// the variable.
    fn power_of_composite(&mut self, expr: &Expr, base: &Expr, exp: &Expr) -> String {
        let Some(n) = self.power_exponent(exp) else {
            return String::new();
        };

        let inner = unwrap_group(base);
        let outer = format!("{}^{{{}}}", self.sub, n.exp_tex);
        self.chain(expr, &outer, inner);
        let result = format!(r"{}\cdot {}^{{{}}}", n.coef_tex, self.sub, n.reduced_tex);
        self.table(&outer, &result, RuleId::Power, Some(inner));

        let d = self.diff(base);
        format!("{} * {}^{} * {}", n.coef, operand_text(base), n.reduced, wrap(base, &d))
    }

    pub(super) fn sqrt(&mut self, expr: &Expr, arg: &Expr) -> String {
        if !depends_on(arg, self.var) {
            return self.constant_zero(expr);
        }

        if is_target_variable(arg, self.var) {
            let result = format!(r"\frac{{1}}{{2\sqrt{{{}}}}}", self.var);
            self.table(&latex(expr), &result, RuleId::Root, None);
            return format!("1 / (2*sqrt({}))", self.var);
        }

        if is_operator_call(arg) || is_group(arg) {
            let inner = unwrap_group(arg);
            let outer = format!(r"\sqrt{{{}}}", self.sub);
            self.chain(expr, &outer, inner);
            let result = format!(r"\frac{{1}}{{2\sqrt{{{}}}}}", self.sub);
            self.table(&outer, &result, RuleId::Root, Some(inner));

            let d = self.diff(inner);
            return format!("1 / (2*sqrt({})) * ({})", inner, d);
        }

        self.independent_or_unsupported(expr)
    }

    /// The natural logarithm, `log(u)`.
    pub(super) fn ln(&mut self, expr: &Expr, arg: &Expr) -> String {
        if !depends_on(arg, self.var) {
            return self.constant_zero(expr);
        }

        let corrected = self.options.rules.is_corrected();
        let table_result = |a: &str| if corrected {
            format!(r"\frac{{1}}{{{}}}", a)
        } else {
            format!(r"\frac{{1}}{{\ln\left({}\right)}}", a)
        };

        if is_target_variable(arg, self.var) {
            self.table(&latex(expr), &table_result(self.var), RuleId::NaturalLogarithm, None);
            return format!("1/({})", self.var);
        }

        let inner = unwrap_group(arg);
        let outer = format!(r"\ln\left({}\right)", self.sub);
        self.chain(expr, &outer, inner);
        self.table(&outer, &table_result(self.sub), RuleId::NaturalLogarithm, Some(inner));

        let d = self.diff(inner);
        format!("1/{} * ({})", grouped(arg), d)
    }

    /// The logarithm with an explicit base, `log(u, b)`.
    pub(super) fn log(&mut self, expr: &Expr, arg: &Expr, base: &Expr) -> String {
        if depends_on(base, self.var) {
            return self.independent_or_unsupported(expr);
        }
        if !depends_on(arg, self.var) {
            return self.constant_zero(expr);
        }

        let target = is_target_variable(arg, self.var);
        let (u_text, u_tex) = if target {
            (self.var.to_string(), self.var.to_string())
        } else {
            (operand_text(arg), latex_operand(arg))
        };

        let result = format!(r"\frac{{1}}{{{}\cdot\ln{{{}}}}}", u_tex, latex(base.innermost()));
        self.table(&latex(expr), &result, RuleId::Logarithm, None);

        let text = if is_euler_constant(base) {
            format!("1/{}", u_text)
        } else {
            format!("1/({}*ln({}))", u_text, base)
        };

        if target {
            text
        } else {
            let d = self.diff(arg);
            format!("{} * {}", text, wrap(arg, &d))
        }
    }
}
