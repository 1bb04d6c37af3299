//! Assertiveness scoring and claim typing.
//!
//! Both annotations depend only on the sentence text and the classifier
//! confidence. Term lists are matched case-insensitively on whole words and
//! every occurrence counts.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::lexical::phrase_regex;
use crate::types::{round_to, AcceptedClaim, Claim, ClaimType};

/// Total-commitment language.
pub const ABSOLUTE_TERMS: &[&str] = &[
    "100%", "zero", "eliminated", "achieved", "fully",
    "complete", "guarantee", "always", "never", "no impact",
];

/// Hedging and qualifying language.
pub const QUALIFIER_TERMS: &[&str] = &[
    "aim", "aims", "target", "targeting", "plan", "plans",
    "working towards", "seek", "seeks", "may", "could",
    "expected", "aspire", "aspirational",
];

/// Weight of the classifier confidence in the assertiveness score.
pub const CONFIDENCE_WEIGHT: f64 = 0.6;

/// Weight of the language-strength signal in the assertiveness score.
pub const LANGUAGE_WEIGHT: f64 = 0.4;

static ABSOLUTE_MATCHERS: Lazy<Vec<Regex>> =
    Lazy::new(|| ABSOLUTE_TERMS.iter().map(|t| phrase_regex(t)).collect());

static QUALIFIER_MATCHERS: Lazy<Vec<Regex>> =
    Lazy::new(|| QUALIFIER_TERMS.iter().map(|t| phrase_regex(t)).collect());

/// Quantitative markers: percentages, 4-digit numbers (years), physical
/// units, currency amounts and million/billion multipliers.
static PERFORMANCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
          \d+(?:\.\d+)?\s?%
        | \d{4}
        | \b(?:tonnes?|tco2e|kg|mt)\b
        | \b(?:gj|mj|kwh|mwh)\b
        | [€$₹£]\s?\d+
        | \d+(?:\.\d+)?\s?(?:million|billion)
        ",
    )
    .expect("static regex")
});

/// Forward-looking vocabulary: will, by, aim, target, commit, plan,
/// ambition, roadmap, expect, aspire (with their inflections).
static FUTURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:
            will | by
          | aim(?:s|ing|ed)?
          | target(?:s|ing|ed)?
          | commit(?:s|ted|ting|ment|ments)?
          | plan(?:s|ned|ning)?
          | ambitions? | ambitious
          | roadmaps?
          | expect(?:s|ed|ing)?
          | aspir(?:e|es|ed|ing|ation|ations|ational)
        )\b
        ",
    )
    .expect("static regex")
});

fn count_hits(matchers: &[Regex], text: &str) -> usize {
    matchers.iter().map(|re| re.find_iter(text).count()).sum()
}

/// Absolute-term hits minus qualifier hits, clamped to [-2, 2] and mapped
/// onto [0, 1].
pub fn language_strength(sentence: &str) -> f64 {
    let absolute = count_hits(&ABSOLUTE_MATCHERS, sentence) as i64;
    let qualifier = count_hits(&QUALIFIER_MATCHERS, sentence) as i64;
    let clamped = (absolute - qualifier).clamp(-2, 2);
    (clamped + 2) as f64 / 4.0
}

/// `round(0.6 * confidence + 0.4 * language_strength, 3)`.
pub fn assertiveness_score(sentence: &str, confidence: f64) -> f64 {
    round_to(
        CONFIDENCE_WEIGHT * confidence + LANGUAGE_WEIGHT * language_strength(sentence),
        3,
    )
}

/// Fixed priority: performance, then future, then qualitative.
pub fn classify_claim_type(sentence: &str) -> ClaimType {
    if PERFORMANCE_PATTERN.is_match(sentence) {
        ClaimType::Performance
    } else if FUTURE_PATTERN.is_match(sentence) {
        ClaimType::Future
    } else {
        ClaimType::Qualitative
    }
}

/// Turns accepted claims into annotated [`Claim`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimAnnotator;

impl ClaimAnnotator {
    /// Annotate one accepted claim.
    ///
    /// A confidence outside [0, 1] is clamped (NaN becomes 0) so the record
    /// always satisfies the score-range invariant.
    pub fn annotate(&self, accepted: &AcceptedClaim) -> Claim {
        let confidence = sanitize_confidence(&accepted.sentence, accepted.confidence);
        Claim {
            sentence: accepted.sentence.clone(),
            confidence,
            assertiveness_score: assertiveness_score(&accepted.sentence, confidence),
            claim_type: classify_claim_type(&accepted.sentence),
        }
    }

    pub fn annotate_all(&self, accepted: &[AcceptedClaim]) -> Vec<Claim> {
        accepted.iter().map(|a| self.annotate(a)).collect()
    }
}

fn sanitize_confidence(sentence: &str, confidence: f64) -> f64 {
    if confidence.is_nan() {
        warn!(sentence, "NaN claim confidence replaced with 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&confidence) {
        warn!(sentence, confidence, "claim confidence clamped to [0, 1]");
    }
    confidence.clamp(0.0, 1.0)
}
