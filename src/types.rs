//! Core data model shared by every pipeline stage.
//!
//! All artifact types serialize with snake_case keys; theme-indexed maps are
//! keyed by the theme's display name and ordered by [`Theme`] declaration
//! order.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Round `value` to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A sentence accepted by the claim filter, before annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedClaim {
    pub sentence: String,
    /// Classifier probability, rounded to 3 decimals.
    pub confidence: f64,
}

/// Claim category, assigned by fixed priority: performance, then future,
/// then qualitative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// Carries a quantitative marker (percentage, year, unit, currency...).
    Performance,
    /// Forward-looking without quantities.
    Future,
    /// Neither of the above.
    Qualitative,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Future => "future",
            Self::Qualitative => "qualitative",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An annotated claim. Immutable once built by the annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub sentence: String,
    pub confidence: f64,
    pub assertiveness_score: f64,
    pub claim_type: ClaimType,
}

/// Environmental theme.
///
/// Declaration order is part of the contract: it breaks keyword-score ties
/// (first declared wins) and orders every theme-indexed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Climate Change & Net Zero")]
    ClimateChange,
    #[serde(rename = "GHG Emissions")]
    GhgEmissions,
    #[serde(rename = "Energy & Renewables")]
    EnergyRenewables,
    #[serde(rename = "Water & Effluents")]
    WaterEffluents,
    #[serde(rename = "Waste & Circularity")]
    WasteCircularity,
    #[serde(rename = "Biodiversity & Natural Capital")]
    Biodiversity,
    /// Fallback when no theme keyword matches.
    #[serde(rename = "Other Environmental")]
    Other,
}

impl Theme {
    /// The six keyword-scored themes in tie-break order (fallback excluded).
    pub const SCORED: [Theme; 6] = [
        Theme::ClimateChange,
        Theme::GhgEmissions,
        Theme::EnergyRenewables,
        Theme::WaterEffluents,
        Theme::WasteCircularity,
        Theme::Biodiversity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ClimateChange => "Climate Change & Net Zero",
            Self::GhgEmissions => "GHG Emissions",
            Self::EnergyRenewables => "Energy & Renewables",
            Self::WaterEffluents => "Water & Effluents",
            Self::WasteCircularity => "Waste & Circularity",
            Self::Biodiversity => "Biodiversity & Natural Capital",
            Self::Other => "Other Environmental",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A claim together with its theme. Assignment augments the claim record
/// rather than mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedClaim {
    #[serde(flatten)]
    pub claim: Claim,
    pub theme: Theme,
}

/// Sentence -> salience, kept in graph node order (the theme's claim order).
///
/// Serializes as a JSON object whose keys appear in that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalienceScores {
    entries: Vec<(String, f64)>,
}

impl SalienceScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, sentence: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == sentence)
            .map(|&(_, score)| score)
    }

    /// Set a sentence's score. A new sentence goes last.
    pub fn insert(&mut self, sentence: String, score: f64) {
        match self.entries.iter_mut().find(|(s, _)| *s == sentence) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((sentence, score)),
        }
    }

    pub fn remove(&mut self, sentence: &str) -> Option<f64> {
        let pos = self.entries.iter().position(|(s, _)| s == sentence)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(s, score)| (s.as_str(), *score))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|&(_, score)| score)
    }
}

impl FromIterator<(String, f64)> for SalienceScores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (sentence, score) in iter {
            scores.insert(sentence, score);
        }
        scores
    }
}

impl<const N: usize> From<[(String, f64); N]> for SalienceScores {
    fn from(entries: [(String, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for SalienceScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (sentence, score) in &self.entries {
            map.serialize_entry(sentence, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SalienceScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = SalienceScores;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of sentence to salience score")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = SalienceScores::new();
                while let Some((sentence, score)) = access.next_entry::<String, f64>()? {
                    scores.insert(sentence, score);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Per-theme metrics, recomputed wholesale on every run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeMetrics {
    pub claim_count: usize,
    pub claim_density_percent: f64,
    /// Sentence -> salience (4 decimals). Empty for single-claim themes.
    #[serde(alias = "textrank_scores")]
    pub salience_scores: SalienceScores,
}

/// Terminal per-theme artifact of the core pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub claim_count: usize,
    pub claim_density_percent: f64,
    pub top_number_claims: Vec<String>,
}

/// Vague-language sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VagueScore {
    pub vague_terms_found: usize,
    pub total_words: usize,
    /// Rounded to 5 decimals.
    pub vague_density: f64,
    /// 0..=100
    pub vague_words_score: u32,
}

/// Readability sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadabilityScore {
    pub flesch_reading_ease: f64,
    pub avg_sentence_length: f64,
    pub difficult_words: usize,
    /// 0..=100
    pub difficulty_to_read_score: u32,
}

/// Document-level lexical risk scores, independent of claim extraction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LexicalRiskScores {
    #[serde(flatten)]
    pub vague: VagueScore,
    #[serde(flatten)]
    pub readability: ReadabilityScore,
}

/// An input dropped from the results because a capability call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub stage: String,
    /// The offending sentence, or theme name for theme-level exclusions.
    pub input: String,
    pub reason: String,
}

impl Exclusion {
    pub fn new(stage: &str, input: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            stage: stage.to_string(),
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

/// Theme-indexed metrics map.
pub type ThemeMetricsMap = BTreeMap<Theme, ThemeMetrics>;

/// Theme-indexed summary map.
pub type ThemeSummaryMap = BTreeMap<Theme, ThemeSummary>;
