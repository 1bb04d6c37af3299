//! Claim filter: threshold policy over the external classifier.
//!
//! A sentence is accepted when the classifier probability reaches the
//! threshold. A classifier failure excludes that sentence only; the failure
//! is logged with the sentence and recorded as an [`Exclusion`].

use std::collections::HashMap;
use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::error::{CapabilityError, Error, Result};
use crate::nlp::tokenizer::normalize_whitespace;
use crate::pipeline::observer::STAGE_FILTER;
use crate::pipeline::traits::{ClaimClassifier, Classification};
use crate::types::{round_to, AcceptedClaim, Exclusion};

/// Default acceptance threshold on the classifier probability.
pub const DEFAULT_CLAIM_THRESHOLD: f64 = 0.6;

const CAPABILITY: &str = "claim_classifier";

/// Result of filtering a batch of candidate sentences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    /// Accepted claims in source order, unique by sentence.
    pub accepted: Vec<AcceptedClaim>,
    /// Sentences classified below the threshold.
    pub rejected: usize,
    /// Sentences dropped because classification failed.
    pub excluded: Vec<Exclusion>,
}

/// Threshold policy over a [`ClaimClassifier`].
#[derive(Debug, Clone, Copy)]
pub struct ClaimFilter {
    threshold: f64,
}

impl Default for ClaimFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CLAIM_THRESHOLD)
    }
}

impl ClaimFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify every candidate and keep the claims, preserving order.
    ///
    /// Blank candidates are skipped; a repeated sentence is accepted once.
    pub fn filter<C, S>(&self, classifier: &C, sentences: &[S]) -> FilterOutcome
    where
        C: ClaimClassifier + ?Sized,
        S: AsRef<str>,
    {
        let mut outcome = FilterOutcome::default();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for candidate in sentences {
            let sentence = candidate.as_ref().trim();
            if sentence.is_empty() {
                continue;
            }
            if seen.contains(sentence) {
                debug!(sentence, "duplicate claim sentence skipped");
                continue;
            }

            match classifier.classify(sentence).and_then(check_output) {
                Ok(c) if c.probability >= self.threshold => {
                    seen.insert(sentence.to_string());
                    outcome.accepted.push(AcceptedClaim {
                        sentence: sentence.to_string(),
                        confidence: round_to(c.probability, 3),
                    });
                }
                Ok(_) => outcome.rejected += 1,
                Err(err) => {
                    warn!(
                        sentence,
                        error = %err,
                        code = err.code(),
                        "claim classification failed; sentence excluded"
                    );
                    outcome
                        .excluded
                        .push(Exclusion::new(STAGE_FILTER, sentence, &err));
                }
            }
        }

        debug!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected,
            excluded = outcome.excluded.len(),
            threshold = self.threshold,
            "claim filter finished"
        );
        outcome
    }
}

fn check_output(c: Classification) -> std::result::Result<Classification, CapabilityError> {
    if c.probability.is_finite() && (0.0..=1.0).contains(&c.probability) {
        Ok(c)
    } else {
        Err(CapabilityError::invalid_output(
            CAPABILITY,
            format!("probability {} outside [0, 1]", c.probability),
        ))
    }
}

// ============================================================================
// ScoreTableClassifier
// ============================================================================

/// Classifier backed by a precomputed `{sentence: probability}` table, as
/// exported by an offline model run.
///
/// Keys are whitespace-normalized. A sentence missing from the table is a
/// capability failure.
#[derive(Debug, Clone, Default)]
pub struct ScoreTableClassifier {
    scores: HashMap<String, f64>,
    decision_threshold: f64,
}

impl ScoreTableClassifier {
    pub fn from_map(scores: HashMap<String, f64>) -> Self {
        let scores = scores
            .into_iter()
            .map(|(sentence, p)| (normalize_whitespace(&sentence), p))
            .collect();
        Self {
            scores,
            decision_threshold: 0.5,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let scores: HashMap<String, f64> = serde_json::from_str(json)?;
        Ok(Self::from_map(scores))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ClaimClassifier for ScoreTableClassifier {
    fn classify(&self, sentence: &str) -> std::result::Result<Classification, CapabilityError> {
        let key = normalize_whitespace(sentence);
        match self.scores.get(&key) {
            Some(&probability) => Ok(Classification {
                is_claim: probability >= self.decision_threshold,
                probability,
            }),
            None => Err(CapabilityError::failed(
                CAPABILITY,
                "no score recorded for sentence",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, f64)]) -> ScoreTableClassifier {
        ScoreTableClassifier::from_map(
            entries
                .iter()
                .map(|(s, p)| (s.to_string(), *p))
                .collect(),
        )
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let classifier = table(&[("at threshold", 0.6), ("below", 0.5999)]);
        let outcome = ClaimFilter::default().filter(&classifier, &["at threshold", "below"]);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.accepted[0].sentence, "at threshold");
        assert_eq!(outcome.rejected, 1);
    }

    #[test]
    fn test_preserves_source_order_and_rounds_confidence() {
        let classifier = table(&[("b", 0.91234), ("a", 0.77777), ("c", 0.1)]);
        let outcome = ClaimFilter::new(0.6).filter(&classifier, &["b", "c", "a"]);
        let accepted: Vec<_> = outcome
            .accepted
            .iter()
            .map(|c| (c.sentence.as_str(), c.confidence))
            .collect();
        assert_eq!(accepted, vec![("b", 0.912), ("a", 0.778)]);
    }

    #[test]
    fn test_failures_exclude_only_that_sentence() {
        let classifier = table(&[("known", 0.9)]);
        let outcome = ClaimFilter::default().filter(&classifier, &["unknown", "known"]);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.excluded.len(), 1);
        assert_eq!(outcome.excluded[0].input, "unknown");
        assert_eq!(outcome.excluded[0].stage, STAGE_FILTER);
    }

    #[test]
    fn test_out_of_range_probability_is_excluded() {
        let classifier = table(&[("weird", 1.7)]);
        let outcome = ClaimFilter::default().filter(&classifier, &["weird"]);
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.excluded.len(), 1);
        assert!(outcome.excluded[0].reason.contains("invalid output"));
    }

    #[test]
    fn test_duplicates_accepted_once() {
        let classifier = table(&[("same claim", 0.8)]);
        let outcome =
            ClaimFilter::default().filter(&classifier, &["same claim", "  same claim ", ""]);
        assert_eq!(outcome.accepted.len(), 1);
    }

    #[test]
    fn test_score_table_normalizes_whitespace() {
        let classifier = table(&[("We cut\nemissions  by 10%.", 0.9)]);
        let result = classifier.classify("We cut emissions by 10%.").unwrap();
        assert!(result.is_claim);
        assert_eq!(result.probability, 0.9);
    }

    #[test]
    fn test_score_table_from_json() {
        let classifier = ScoreTableClassifier::from_json_str(r#"{"a claim": 0.75}"#).unwrap();
        assert_eq!(classifier.len(), 1);
        assert!(ScoreTableClassifier::from_json_str("[1, 2]").is_err());
    }
}
