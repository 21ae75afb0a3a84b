use regex::Regex;

/// The pattern a filter falls back to when the caller supplies none.
const MATCH_ALL: &str = ".*";

/// A name predicate built from an ordered list of regular expressions.
///
/// A name is accepted if any pattern matches it starting at the beginning of
/// the name. The pattern does not need to span the whole name: `test_a`
/// accepts both `test_a` and `test_abc`, while `test_a$` accepts only
/// `test_a`. Matches that start past the first character are ignored, so
/// `case` does not accept `test_case`.
#[derive(Debug, Clone)]
pub struct NameFilter {
    patterns: Vec<Regex>,
}

impl NameFilter {
    /// Compiles a filter from an ordered pattern list.
    ///
    /// An empty list is treated as "no selection was made" and compiles to a
    /// filter that accepts every name.
    pub fn new(patterns: &[String]) -> Result<Self, FilterError> {
        if patterns.is_empty() {
            return Ok(Self::match_all());
        }

        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// A filter that accepts every name.
    #[must_use]
    pub fn match_all() -> Self {
        Self {
            patterns: vec![Regex::new(MATCH_ALL).expect("`.*` is a valid pattern")],
        }
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.find(name).is_some_and(|m| m.start() == 0))
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::match_all()
    }
}

/// The three independent filters applied at module, class, and method
/// granularity.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    modules: NameFilter,
    classes: NameFilter,
    methods: NameFilter,
}

impl FilterSet {
    pub fn new(
        modules: &[String],
        classes: &[String],
        methods: &[String],
    ) -> Result<Self, FilterError> {
        Ok(Self {
            modules: NameFilter::new(modules)?,
            classes: NameFilter::new(classes)?,
            methods: NameFilter::new(methods)?,
        })
    }

    #[must_use]
    pub const fn modules(&self) -> &NameFilter {
        &self.modules
    }

    #[must_use]
    pub const fn classes(&self) -> &NameFilter {
        &self.classes
    }

    #[must_use]
    pub const fn methods(&self) -> &NameFilter {
        &self.methods
    }

    #[must_use]
    pub fn with_methods(mut self, methods: NameFilter) -> Self {
        self.methods = methods;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid filter pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn filter(patterns: &[&str]) -> NameFilter {
        let patterns: Vec<String> = patterns.iter().map(ToString::to_string).collect();
        NameFilter::new(&patterns).unwrap()
    }

    #[rstest]
    #[case(&["test_a"], "test_a", true)]
    #[case(&["test_a"], "test_abc", true)]
    #[case(&["test_a$"], "test_abc", false)]
    #[case(&["test_a$"], "test_a", true)]
    #[case(&["case"], "test_case", false)]
    #[case(&["test_b"], "test_a", false)]
    #[case(&["test_b", "test_a"], "test_a", true)]
    #[case(&["t.st_[ab]"], "test_b_extra", true)]
    #[case(&[".*"], "anything at all", true)]
    fn test_prefix_anchored_matching(
        #[case] patterns: &[&str],
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(filter(patterns).matches(name), expected);
    }

    #[test]
    fn test_empty_pattern_list_accepts_everything() {
        let filter = NameFilter::new(&[]).unwrap();

        assert!(filter.matches("tests.pkg.test_module"));
        assert!(filter.matches(""));
    }

    #[test]
    fn test_default_filter_accepts_everything() {
        assert!(NameFilter::default().matches("Foo"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NameFilter::new(&["[unclosed".to_string()]).unwrap_err();

        assert!(err.to_string().contains("[unclosed"));
    }

    #[test]
    fn test_filter_set_defaults() {
        let filters = FilterSet::new(&[], &[], &[]).unwrap();

        assert!(filters.modules().matches("any.module"));
        assert!(filters.classes().matches("AnyClass"));
        assert!(filters.methods().matches("test_anything"));
    }
}
