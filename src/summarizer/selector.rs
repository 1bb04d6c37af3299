//! Top-number-claims selection
//!
//! Per theme: drop overlong sentences, order the rest by salience, then
//! stable-sort by how many quantitative tokens they carry and keep the
//! first few.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{SalienceScores, Theme, ThemeMetricsMap, ThemeSummary, ThemeSummaryMap};

/// Numeric literals (decimals included) and the `tCO2e` / `GJ` unit markers.
static QUANTITATIVE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?|\d+%|tCO2e|GJ").expect("static regex"));

/// Number of quantitative tokens in a sentence.
pub fn count_quantitative_tokens(sentence: &str) -> usize {
    QUANTITATIVE_TOKEN.find_iter(sentence).count()
}

/// Configuration for top-claim selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    /// Longer sentences (in characters) are treated as extraction noise
    pub max_sentence_chars: usize,
    /// Number of claims kept per theme
    pub top_n: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_sentence_chars: 250,
            top_n: 5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NumberClaimSelector {
    config: SelectorConfig,
}

impl NumberClaimSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    pub fn with_max_sentence_chars(mut self, chars: usize) -> Self {
        self.config.max_sentence_chars = chars;
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select the top claims of one theme.
    ///
    /// `sentences` is the theme's claims in insertion order. Sentences are
    /// first ordered by descending salience (missing scores count as equal,
    /// ties keep insertion order), then stable-sorted by descending
    /// quantitative-token count.
    pub fn select(&self, sentences: &[String], salience: &SalienceScores) -> Vec<String> {
        let mut candidates: Vec<&String> = sentences
            .iter()
            .filter(|s| s.chars().count() <= self.config.max_sentence_chars)
            .collect();

        candidates.sort_by(|a, b| {
            let sa = salience.get(a).unwrap_or(0.0);
            let sb = salience.get(b).unwrap_or(0.0);
            sb.partial_cmp(&sa).unwrap_or(Ordering::Equal)
        });
        candidates.sort_by_key(|s| std::cmp::Reverse(count_quantitative_tokens(s)));

        candidates
            .into_iter()
            .take(self.config.top_n)
            .cloned()
            .collect()
    }

    /// Build the summary artifact for every theme in `metrics`.
    ///
    /// Counts and densities are carried over unchanged.
    pub fn summarize(
        &self,
        groups: &BTreeMap<Theme, Vec<String>>,
        metrics: &ThemeMetricsMap,
    ) -> ThemeSummaryMap {
        metrics
            .iter()
            .map(|(theme, m)| {
                let sentences = groups.get(theme).map(Vec::as_slice).unwrap_or_default();
                let top_number_claims = self.select(sentences, &m.salience_scores);
                debug!(
                    theme = theme.name(),
                    candidates = sentences.len(),
                    selected = top_number_claims.len(),
                    "theme summarized"
                );
                (
                    *theme,
                    ThemeSummary {
                        claim_count: m.claim_count,
                        claim_density_percent: m.claim_density_percent,
                        top_number_claims,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ThemeMetrics;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_count_quantitative_tokens() {
        assert_eq!(count_quantitative_tokens("No numbers here"), 0);
        assert_eq!(count_quantitative_tokens("Cut 12.5% of 40 tonnes"), 2);
        assert_eq!(count_quantitative_tokens("Saved 300 GJ and 25 tCO2e in 2023"), 5);
        // unit markers are case-sensitive
        assert_eq!(count_quantitative_tokens("gj and tco2e"), 0);
    }

    #[test]
    fn test_sorts_by_number_count_stably() {
        let sentences = owned(&["one 1", "none", "three 1 2 3", "also one 9"]);
        let top = NumberClaimSelector::new().select(&sentences, &SalienceScores::new());
        assert_eq!(top, owned(&["three 1 2 3", "one 1", "also one 9", "none"]));
    }

    #[test]
    fn test_ties_follow_salience_order() {
        let sentences = owned(&["low 1", "high 2", "mid 3"]);
        let salience = SalienceScores::from([
            ("low 1".to_string(), 0.2),
            ("high 2".to_string(), 0.5),
            ("mid 3".to_string(), 0.3),
        ]);
        let top = NumberClaimSelector::new().select(&sentences, &salience);
        assert_eq!(top, owned(&["high 2", "mid 3", "low 1"]));
    }

    #[test]
    fn test_overlong_sentences_dropped() {
        let long = format!("{} 1 2 3", "x".repeat(250));
        let sentences = vec![long, "short 1".to_string()];
        let top = NumberClaimSelector::new().select(&sentences, &SalienceScores::new());
        assert_eq!(top, owned(&["short 1"]));
    }

    #[test]
    fn test_length_limit_counts_characters() {
        // 250 two-byte characters stay within the limit
        let sentence = "é".repeat(250);
        let top = NumberClaimSelector::new().select(&[sentence.clone()], &SalienceScores::new());
        assert_eq!(top, vec![sentence]);
    }

    #[test]
    fn test_top_n_limit() {
        let sentences: Vec<String> = (0..8).map(|i| format!("claim {i}")).collect();
        let top = NumberClaimSelector::new().select(&sentences, &SalienceScores::new());
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], "claim 0");

        let top = NumberClaimSelector::new().with_top_n(2).select(&sentences, &SalienceScores::new());
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_all_filtered_gives_empty_list() {
        let sentences = vec!["y".repeat(300)];
        let selector = NumberClaimSelector::new();
        assert!(selector.select(&sentences, &SalienceScores::new()).is_empty());
    }

    #[test]
    fn test_summarize_carries_metrics() {
        let groups = BTreeMap::from([(Theme::WaterEffluents, owned(&["We reused 40% of water."]))]);
        let metrics = ThemeMetricsMap::from([(
            Theme::WaterEffluents,
            ThemeMetrics {
                claim_count: 1,
                claim_density_percent: 100.0,
                salience_scores: SalienceScores::new(),
            },
        )]);

        let summaries = NumberClaimSelector::new().summarize(&groups, &metrics);
        let water = &summaries[&Theme::WaterEffluents];
        assert_eq!(water.claim_count, 1);
        assert_eq!(water.claim_density_percent, 100.0);
        assert_eq!(water.top_number_claims, owned(&["We reused 40% of water."]));
    }
}
