//! Filter extraction from raw query text
//!
//! Best-effort derivation of structured constraints (category, difficulty)
//! from the question. An empty result is a normal outcome, not a failure.

use regex::Regex;

use crate::types::FilterSet;

/// Vocabulary entry: pattern matched against the lowercased query, and the
/// canonical attribute value it maps to.
const CATEGORY_TERMS: &[(&str, &str)] = &[
    (r"\bdesserts?\b|\bsweets?\b|\bpastry\b|\bpastries\b", "dessert"),
    (r"\bbreakfasts?\b|\bbrunch\b", "breakfast"),
    (r"\bsoups?\b|\bbroths?\b|\bstews?\b", "soup"),
    (r"\bsalads?\b", "salad"),
    (r"\bvegetarian\b|\bveggie\b|\bmeatless\b", "vegetarian"),
    (r"\bsnacks?\b|\bappetizers?\b", "snack"),
    (r"\bdrinks?\b|\bbeverages?\b|\bsmoothies?\b", "drink"),
];

const DIFFICULTY_TERMS: &[(&str, &str)] = &[
    (r"\beasy\b|\bsimple\b|\bbeginner\b|\bquick\b", "easy"),
    (r"\bmedium\b|\bintermediate\b|\bmoderate\b", "medium"),
    (r"\bhard\b|\bdifficult\b|\badvanced\b|\bchallenging\b", "hard"),
];

/// Extracts structured constraints from query text.
///
/// Pure function of the query: never consults retrieval state, never fails.
pub struct FilterExtractor {
    categories: Vec<(Regex, &'static str)>,
    difficulties: Vec<(Regex, &'static str)>,
}

impl FilterExtractor {
    /// Build the extractor from the static vocabularies
    pub fn new() -> Self {
        Self {
            categories: compile(CATEGORY_TERMS),
            difficulties: compile(DIFFICULTY_TERMS),
        }
    }

    /// Derive a filter set from the query text.
    ///
    /// Returns an empty set when no recognizable constraint is present.
    pub fn extract(&self, query: &str) -> FilterSet {
        let mut filters = FilterSet::new();
        let lowered = query.to_lowercase();

        for (pattern, value) in &self.categories {
            if pattern.is_match(&lowered) {
                filters.insert("category", *value);
                break;
            }
        }

        for (pattern, value) in &self.difficulties {
            if pattern.is_match(&lowered) {
                filters.insert("difficulty", *value);
                break;
            }
        }

        filters
    }
}

impl Default for FilterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(terms: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    terms
        .iter()
        .map(|(pattern, value)| {
            let re = Regex::new(pattern).expect("static filter pattern is valid");
            (re, *value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_category_and_difficulty() {
        let extractor = FilterExtractor::new();
        let filters = extractor.extract("easy dishes under category dessert");

        assert_eq!(filters.get("category"), Some("dessert"));
        assert_eq!(filters.get("difficulty"), Some("easy"));
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_unconstrained_query_yields_empty_set() {
        let extractor = FilterExtractor::new();
        assert!(extractor.extract("steamed fish").is_empty());
        assert!(extractor.extract("how long to marinate pork belly").is_empty());
    }

    #[test]
    fn test_malformed_input_yields_empty_set() {
        let extractor = FilterExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("???!!! \u{0} \t\n").is_empty());
    }

    #[test]
    fn test_word_boundaries_prevent_partial_matches() {
        let extractor = FilterExtractor::new();
        // "hardy" must not match the "hard" difficulty
        assert!(extractor.extract("hardy winter greens").is_empty());
    }

    #[test]
    fn test_single_attribute_extraction() {
        let extractor = FilterExtractor::new();
        let filters = extractor.extract("any good soup for a cold evening?");

        assert_eq!(filters.get("category"), Some("soup"));
        assert_eq!(filters.get("difficulty"), None);
    }
}
