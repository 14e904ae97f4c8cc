/// An ordered keyword table: each rule maps a set of substrings to a value.
///
/// Matching is case-insensitive on the haystack (keywords are stored in
/// lowercase) and always walks the rules in definition order, so earlier
/// rules take priority.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub keywords: &'static [&'static str],
    pub value: T,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleTable<T: 'static> {
    rules: &'static [KeywordRule<T>],
}

impl<T> RuleTable<T> {
    pub const fn new(rules: &'static [KeywordRule<T>]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [KeywordRule<T>] {
        self.rules
    }

    /// Value of the first rule with any keyword contained in `text`.
    pub fn first_match(&self, text: &str) -> Option<&'static T> {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| contains_any(&haystack, rule.keywords))
            .map(|rule| &rule.value)
    }

    /// Value of the rule with the most keyword hits in `text`.
    ///
    /// Only a strictly higher count replaces the current best, so ties go to
    /// the rule defined first. Returns `None` when no rule scores at all.
    pub fn best_scoring(&self, text: &str) -> Option<&'static T> {
        let haystack = text.to_lowercase();
        let mut best: Option<(&'static T, usize)> = None;

        for rule in self.rules {
            let score = rule
                .keywords
                .iter()
                .filter(|keyword| haystack.contains(*keyword))
                .count();
            let best_score = best.map(|(_, s)| s).unwrap_or(0);
            if score > best_score {
                best = Some((&rule.value, score));
            }
        }

        best.map(|(value, _)| value)
    }
}

/// `true` when the (already lowercased) haystack contains any keyword.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// First keyword, in list order, contained in the lowercased text.
pub fn first_keyword<'a>(text: &str, keywords: &[&'a str]) -> Option<&'a str> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .find(|keyword| haystack.contains(*keyword))
        .copied()
}
