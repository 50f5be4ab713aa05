//! Configuration of the differentiation engine.

/// The maximum nesting depth the engine will descend into before giving up.
pub const MAX_RECURSION_DEPTH: usize = 1 << 9;

/// Which version of the rule table to apply.
///
/// A handful of branches in the classic rule table produce results that a calculus reference
/// disagrees with (for example, `a^2` with a symbol `a` other than the variable is returned
/// unchanged instead of differentiating to `0`). [`RuleSet::Literal`] reproduces that table exactly,
/// so traces match the worked examples students have seen before; [`RuleSet::Corrected`] resolves
/// those branches against the textbook rules.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// Follow the classic rule table as-is.
    ///
    /// This is the default option.
    #[default]
    Literal,

    /// Replace the branches of the classic table that produce incorrect results.
    Corrected,
}

impl RuleSet {
    /// Utility function to create a new [`DiffOptions`] with the same options as the given
    /// [`DiffOptions`], but with the rule set set to this value.
    pub fn inside(self, options: DiffOptions) -> DiffOptions {
        DiffOptions {
            rules: self,
            ..options
        }
    }

    /// Returns true if this is [`RuleSet::Corrected`].
    pub fn is_corrected(self) -> bool {
        self == RuleSet::Corrected
    }
}

/// Options controlling how a derivative and its step trace are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// The rule table to apply. See [`RuleSet`].
    pub rules: RuleSet,

    /// The word joining a chain rule step to the definition of its substitution variable, as in
    /// `(sin(z))'·(x^2)', where z = x^2`.
    ///
    /// The default is `where`. The word is inserted into LaTeX verbatim, surrounded by thin spaces.
    pub connector: String,

    /// The maximum nesting depth of the expression. Deeper expressions report a recursion limit
    /// error instead of exhausting the stack.
    pub max_depth: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            connector: "where".to_string(),
            max_depth: MAX_RECURSION_DEPTH,
        }
    }
}

impl DiffOptions {
    /// Wraps the given [`DiffOptions`] into a builder for further customization.
    pub fn into_builder(self) -> DiffOptionsBuilder {
        DiffOptionsBuilder(self)
    }
}

/// Helper struct to build a [`DiffOptions`] struct.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffOptionsBuilder(DiffOptions);

impl DiffOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule table. See [`RuleSet`] for more information.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.0.rules = rules;
        self
    }

    /// Sets the connector word used in substitution clauses.
    pub fn connector(mut self, connector: impl Into<String>) -> Self {
        self.0.connector = connector.into();
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.0.max_depth = max_depth;
        self
    }

    /// Builds the [`DiffOptions`] struct.
    pub fn build(self) -> DiffOptions {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn defaults() {
        let options = DiffOptions::default();
        assert_eq!(options.rules, RuleSet::Literal);
        assert_eq!(options.connector, "where");
        assert_eq!(options.max_depth, MAX_RECURSION_DEPTH);
    }

    #[test]
    fn builder_overrides() {
        let options = DiffOptionsBuilder::new()
            .rules(RuleSet::Corrected)
            .connector("где")
            .max_depth(8)
            .build();

        assert_eq!(options, DiffOptions {
            rules: RuleSet::Corrected,
            connector: "где".to_string(),
            max_depth: 8,
        });
        assert_eq!(RuleSet::Literal.inside(options.clone()).into_builder().build(), DiffOptions {
            rules: RuleSet::Literal,
            ..options
        });
    }
}
