//! Stopword filtering
//!
//! English stopwords from the `stop-words` crate, used to keep function words
//! out of sentence vectors.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A case-insensitive stopword filter
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// English stopword list
    pub fn english() -> Self {
        let stopwords = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self { stopwords }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords: FxHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::english();
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(!filter.is_stopword("emissions"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_custom_list() {
        let mut filter = StopwordFilter::from_list(&["Foo"]);
        assert!(filter.is_stopword("foo"));
        filter.add_stopwords(&["bar"]);
        assert!(filter.is_stopword("BAR"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();
        assert!(!filter.is_stopword("the"));
        assert!(filter.is_empty());
    }
}
