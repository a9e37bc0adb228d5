use std::collections::BTreeSet;

/// Case-insensitive keywords whose presence in a result title disqualifies it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    keywords: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Sorted, lowercase.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn matches(&self, title: &str) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let title = title.to_lowercase();
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }

    /// Search-engine negation terms, e.g. `-cover -"screen guard"`.
    pub fn negated_terms(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| {
                if k.contains(char::is_whitespace) {
                    format!("-\"{k}\"")
                } else {
                    format!("-{k}")
                }
            })
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitive_substring() {
        let set = ExclusionSet::new(["Cover"]);
        assert!(set.matches("Shoe cover for your new Sneakers"));
        assert!(set.matches("DISCOVERY kit"));
        assert!(!set.matches("Running Sneakers"));
    }

    #[test]
    fn test_blank_keywords_dropped() {
        let set = ExclusionSet::new(["", "  ", "case"]);
        assert_eq!(set.len(), 1);
        assert!(!ExclusionSet::default().matches("anything"));
    }

    #[test]
    fn test_negated_terms_sorted_and_quoted() {
        let set: ExclusionSet = ["strap", "Screen Guard", "case"].into_iter().collect();
        assert_eq!(
            set.negated_terms(),
            vec!["-case", "-\"screen guard\"", "-strap"]
        );
    }
}
