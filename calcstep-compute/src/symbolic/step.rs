//! The entries of a differentiation trace.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What kind of rule a [`Step`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StepKind {
    /// An elementary derivative was read off the rule table.
    TableLookup,

    /// A composite function was split into an outer function of a substitution variable and the
    /// inner expression it stands for.
    ChainRuleIntroduction,

    /// A constant factor was pulled out of the derivative.
    ConstantFactor,

    /// The derivative of a sum or difference was split into the derivatives of its terms.
    SumOrDifference,

    /// The product rule was applied.
    Product,

    /// The quotient rule was applied.
    Quotient,

    /// The derivative of the variable itself, `x' = 1`.
    IdentityVariable,

    /// The derivative of a constant, `c' = 0`.
    ConstantZero,
}

impl StepKind {
    /// Returns true for steps that read an entry of the rule table, which are exactly the steps
    /// that carry a [`RuleId`].
    pub fn is_table(self) -> bool {
        self == StepKind::TableLookup
    }
}

/// Identifies an entry of the rule table of elementary derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RuleId {
    Power,
    Root,
    Exponential,
    NaturalExponential,
    Logarithm,
    NaturalLogarithm,
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

impl RuleId {
    /// Every entry of the rule table, in catalog order.
    pub const ALL: [RuleId; 18] = [
        RuleId::Power,
        RuleId::Root,
        RuleId::Exponential,
        RuleId::NaturalExponential,
        RuleId::Logarithm,
        RuleId::NaturalLogarithm,
        RuleId::Sin,
        RuleId::Cos,
        RuleId::Tg,
        RuleId::Ctg,
        RuleId::Arcsin,
        RuleId::Arccos,
        RuleId::Arctg,
        RuleId::Arcctg,
        RuleId::Sh,
        RuleId::Ch,
        RuleId::Th,
        RuleId::Cth,
    ];

    /// A short human-readable name for the rule.
    pub fn name(self) -> &'static str {
        match self {
            RuleId::Power => "power rule",
            RuleId::Root => "square root",
            RuleId::Exponential => "exponential function",
            RuleId::NaturalExponential => "natural exponential function",
            RuleId::Logarithm => "logarithm",
            RuleId::NaturalLogarithm => "natural logarithm",
            RuleId::Sin => "sine",
            RuleId::Cos => "cosine",
            RuleId::Tg => "tangent",
            RuleId::Ctg => "cotangent",
            RuleId::Arcsin => "arcsine",
            RuleId::Arccos => "arccosine",
            RuleId::Arctg => "arctangent",
            RuleId::Arcctg => "arccotangent",
            RuleId::Sh => "hyperbolic sine",
            RuleId::Ch => "hyperbolic cosine",
            RuleId::Th => "hyperbolic tangent",
            RuleId::Cth => "hyperbolic cotangent",
        }
    }

    /// The table entry as LaTeX, written for a variable `x` and constants `a` and `n`.
    pub fn template(self) -> &'static str {
        match self {
            RuleId::Power => r"\left(x^{n}\right)^{\prime} = n\cdot x^{n-1}",
            RuleId::Root => r"\left(\sqrt{x}\right)^{\prime} = \frac{1}{2\sqrt{x}}",
            RuleId::Exponential => r"\left(a^{x}\right)^{\prime} = a^{x}\ln{a}",
            RuleId::NaturalExponential => r"\left(e^{x}\right)^{\prime} = e^{x}",
            RuleId::Logarithm => r"\left(\log_{a}{x}\right)^{\prime} = \frac{1}{x\ln{a}}",
            RuleId::NaturalLogarithm => r"\left(\ln{x}\right)^{\prime} = \frac{1}{x}",
            RuleId::Sin => r"\left(\sin{x}\right)^{\prime} = \cos{x}",
            RuleId::Cos => r"\left(\cos{x}\right)^{\prime} = -\sin{x}",
            RuleId::Tg => r"\left(\operatorname{tg}{x}\right)^{\prime} = \frac{1}{\cos^2{x}}",
            RuleId::Ctg => r"\left(\operatorname{ctg}{x}\right)^{\prime} = -\frac{1}{\sin^2{x}}",
            RuleId::Arcsin => r"\left(\arcsin{x}\right)^{\prime} = \frac{1}{\sqrt{1-x^{2}}}",
            RuleId::Arccos => r"\left(\arccos{x}\right)^{\prime} = -\frac{1}{\sqrt{1-x^{2}}}",
            RuleId::Arctg => r"\left(\operatorname{arctg}{x}\right)^{\prime} = \frac{1}{1+x^{2}}",
            RuleId::Arcctg => r"\left(\operatorname{arcctg}{x}\right)^{\prime} = -\frac{1}{1+x^{2}}",
            RuleId::Sh => r"\left(\operatorname{sh}{x}\right)^{\prime} = \operatorname{ch}{x}",
            RuleId::Ch => r"\left(\operatorname{ch}{x}\right)^{\prime} = \operatorname{sh}{x}",
            RuleId::Th => r"\left(\operatorname{th}{x}\right)^{\prime} = \frac{1}{\operatorname{ch}^2{x}}",
            RuleId::Cth => r"\left(\operatorname{cth}{x}\right)^{\prime} = -\frac{1}{\operatorname{sh}^2{x}}",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry of a differentiation trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// The kind of rule that was applied.
    pub kind: StepKind,

    /// The application of the rule, as LaTeX.
    pub formula: String,

    /// The table entry that was used, for [`StepKind::TableLookup`] steps.
    pub rule: Option<RuleId>,
}

impl Step {
    /// Creates a step that does not read the rule table.
    pub fn new(kind: StepKind, formula: impl Into<String>) -> Self {
        Self { kind, formula: formula.into(), rule: None }
    }

    /// Creates a step that reads the given entry of the rule table.
    pub fn table(kind: StepKind, formula: impl Into<String>, rule: RuleId) -> Self {
        Self { kind, formula: formula.into(), rule: Some(rule) }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.rule {
            Some(rule) => write!(f, "[{:?}: {}] {}", self.kind, rule, self.formula),
            None => write!(f, "[{:?}] {}", self.kind, self.formula),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_complete() {
        for rule in RuleId::ALL {
            assert!(!rule.name().is_empty());
            assert!(rule.template().contains(r"^{\prime} = "), "{:?}", rule);
        }
    }

    #[test]
    fn table_kinds() {
        assert!(StepKind::TableLookup.is_table());
        assert!(!StepKind::IdentityVariable.is_table());
        assert!(!StepKind::ChainRuleIntroduction.is_table());
        assert!(!StepKind::ConstantZero.is_table());
    }

    #[test]
    fn display() {
        let step = Step::table(StepKind::TableLookup, r"\cos{x}", RuleId::Sin);
        assert_eq!(step.to_string(), r"[TableLookup: sine] \cos{x}");
    }
}
