//! Rule-based validation engine.
//!
//! The engine runs all registered [`ValidationRule`]s against a target and
//! collects every diagnostic into a [`ValidationReport`]. It never
//! short-circuits on the first error, so users see all problems at once.
//!
//! Three rule sets ship with the crate:
//!
//! - [`ValidationEngine::with_defaults`] checks a [`PipelineConfig`];
//! - [`ValidationEngine::claim_rules`] checks an annotated claims list;
//! - [`ValidationEngine::theme_rules`] checks the theme metrics and
//!   summaries against the claims they were derived from.
//!
//! ```rust,ignore
//! let report = ValidationEngine::claim_rules().validate(claims.as_slice());
//! report.ensure_valid("claims")?;
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::config::{PipelineConfig, CONFIG_VERSION};
use super::errors::{ErrorCode, RuleViolation};
use crate::error::{Error, Result};
use crate::themes::metrics::ThemeGroups;
use crate::types::{Claim, ThemeMetricsMap, ThemeSummaryMap};

/// Allowed distance of the density total from 100.
pub const DENSITY_TOLERANCE: f64 = 0.1;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub violation: RuleViolation,
}

impl ValidationDiagnostic {
    pub fn error(violation: RuleViolation) -> Self {
        Self {
            severity: Severity::Error,
            violation,
        }
    }

    pub fn warning(violation: RuleViolation) -> Self {
        Self {
            severity: Severity::Warning,
            violation,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &RuleViolation> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.violation)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &RuleViolation> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.violation)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Turn errors into [`Error::MalformedArtifact`] naming every violation.
    pub fn ensure_valid(&self, artifact: &'static str) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let violation = self
            .errors()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::MalformedArtifact {
            artifact,
            violation,
        })
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a `T` and returns zero or more
/// diagnostics.
pub trait ValidationRule<T: ?Sized>: Send + Sync {
    /// Short, stable identifier for this rule.
    fn name(&self) -> &str;

    fn validate(&self, target: &T) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

pub struct ValidationEngine<T: ?Sized> {
    rules: Vec<Box<dyn ValidationRule<T>>>,
}

impl<T: ?Sized> ValidationEngine<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule<T>>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, target: &T) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(target));
        }
        report
    }
}

impl<T: ?Sized> Default for ValidationEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine<PipelineConfig> {
    /// Engine pre-loaded with the configuration rules.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(RangesRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }
}

impl ValidationEngine<[Claim]> {
    /// Engine pre-loaded with the claims-list invariants.
    pub fn claim_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(ClaimScoresRule));
        engine.add_rule(Box::new(ClaimSentencesRule));
        engine
    }
}

/// The theme-stage artifacts plus what they must agree with.
#[derive(Debug, Clone, Copy)]
pub struct ThemeArtifacts<'a> {
    pub total_claims: usize,
    pub groups: &'a ThemeGroups,
    pub metrics: &'a ThemeMetricsMap,
    pub summaries: &'a ThemeSummaryMap,
    pub top_n: usize,
}

impl<'a> ValidationEngine<ThemeArtifacts<'a>> {
    /// Engine pre-loaded with the theme-artifact invariants.
    pub fn theme_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(ClaimCountRule));
        engine.add_rule(Box::new(DensityRule));
        engine.add_rule(Box::new(SalienceCoverageRule));
        engine.add_rule(Box::new(SummaryConsistencyRule));
        engine.add_rule(Box::new(TopClaimsRule));
        engine
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Configuration rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Version ─────────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule<PipelineConfig> for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        if config.v == CONFIG_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            RuleViolation::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported configuration version {}", config.v),
            )
            .with_hint(format!("Set \"v\" to {CONFIG_VERSION}")),
        )]
    }
}

// ─── 2. Numeric ranges ──────────────────────────────────────────────────────

struct RangesRule;

impl RangesRule {
    fn out_of_range(path: &str, message: String) -> ValidationDiagnostic {
        ValidationDiagnostic::error(RuleViolation::new(ErrorCode::OutOfRange, path, message))
    }
}

impl ValidationRule<PipelineConfig> for RangesRule {
    fn name(&self) -> &str {
        "ranges"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if !(0.0..=1.0).contains(&config.claim_threshold) {
            out.push(Self::out_of_range(
                "/claim_threshold",
                format!("claim_threshold {} must be in [0, 1]", config.claim_threshold),
            ));
        }

        let damping = config.salience.damping;
        if !(damping > 0.0 && damping < 1.0) {
            out.push(Self::out_of_range(
                "/salience/damping",
                format!("damping {damping} must be in (0, 1)"),
            ));
        }

        let tolerance = config.salience.tolerance;
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            out.push(Self::out_of_range(
                "/salience/tolerance",
                format!("tolerance {tolerance} must be positive"),
            ));
        }

        let positives: &[(&str, u64)] = &[
            ("/salience/max_iterations", config.salience.max_iterations as u64),
            ("/summary/max_sentence_chars", config.summary.max_sentence_chars as u64),
            ("/summary/top_n", config.summary.top_n as u64),
        ];
        for &(path, value) in positives {
            if value == 0 {
                out.push(Self::out_of_range(path, format!("{path} must be greater than 0")));
            }
        }

        if config.capability_timeout_ms == Some(0) {
            out.push(ValidationDiagnostic::error(
                RuleViolation::new(
                    ErrorCode::OutOfRange,
                    "/capability_timeout_ms",
                    "capability_timeout_ms must be greater than 0",
                )
                .with_hint("Remove capability_timeout_ms to disable the deadline"),
            ));
        }

        out
    }
}

// ─── 3. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    RuleViolation::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule<PipelineConfig> for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &config.unknown_fields, config.strict));
        out.extend(Self::check_unknowns(
            "/salience",
            &config.salience.unknown_fields,
            config.strict,
        ));
        out.extend(Self::check_unknowns(
            "/summary",
            &config.summary.unknown_fields,
            config.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Claims-list rules
// ═══════════════════════════════════════════════════════════════════════════

fn in_unit_range(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

struct ClaimScoresRule;

impl ValidationRule<[Claim]> for ClaimScoresRule {
    fn name(&self) -> &str {
        "claim_scores"
    }

    fn validate(&self, claims: &[Claim]) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        for (i, claim) in claims.iter().enumerate() {
            let scores = [
                ("confidence", claim.confidence),
                ("assertiveness_score", claim.assertiveness_score),
            ];
            for (field, value) in scores {
                if !in_unit_range(value) {
                    out.push(ValidationDiagnostic::error(RuleViolation::new(
                        ErrorCode::ScoreOutOfRange,
                        format!("/{i}/{field}"),
                        format!("{field} {value} outside [0, 1]"),
                    )));
                }
            }
        }
        out
    }
}

struct ClaimSentencesRule;

impl ValidationRule<[Claim]> for ClaimSentencesRule {
    fn name(&self) -> &str {
        "claim_sentences"
    }

    fn validate(&self, claims: &[Claim]) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        for (i, claim) in claims.iter().enumerate() {
            if claim.sentence.trim().is_empty() {
                out.push(ValidationDiagnostic::error(RuleViolation::new(
                    ErrorCode::EmptySentence,
                    format!("/{i}/sentence"),
                    "claim sentence is empty",
                )));
            } else if !seen.insert(claim.sentence.as_str()) {
                out.push(ValidationDiagnostic::error(
                    RuleViolation::new(
                        ErrorCode::DuplicateClaim,
                        format!("/{i}/sentence"),
                        format!("duplicate claim sentence \"{}\"", claim.sentence),
                    )
                    .with_hint("Claims are unique by sentence text"),
                ));
            }
        }
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Theme-artifact rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── Claim counts add up ────────────────────────────────────────────────────

struct ClaimCountRule;

impl<'a> ValidationRule<ThemeArtifacts<'a>> for ClaimCountRule {
    fn name(&self) -> &str {
        "claim_count"
    }

    fn validate(&self, a: &ThemeArtifacts<'a>) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let sum: usize = a.metrics.values().map(|m| m.claim_count).sum();
        if sum != a.total_claims {
            out.push(ValidationDiagnostic::error(RuleViolation::new(
                ErrorCode::CountMismatch,
                "/theme_metrics",
                format!("theme claim counts sum to {sum}, expected {}", a.total_claims),
            )));
        }

        for (theme, m) in a.metrics {
            let members = a.groups.get(theme).map_or(0, Vec::len);
            if m.claim_count != members {
                out.push(ValidationDiagnostic::error(RuleViolation::new(
                    ErrorCode::CountMismatch,
                    format!("/theme_metrics/{theme}/claim_count"),
                    format!("claim_count {} but theme has {members} claims", m.claim_count),
                )));
            }
        }

        out
    }
}

// ─── Densities add up to 100 ────────────────────────────────────────────────

struct DensityRule;

impl<'a> ValidationRule<ThemeArtifacts<'a>> for DensityRule {
    fn name(&self) -> &str {
        "claim_density"
    }

    fn validate(&self, a: &ThemeArtifacts<'a>) -> Vec<ValidationDiagnostic> {
        if a.total_claims == 0 {
            return vec![];
        }
        let sum: f64 = a.metrics.values().map(|m| m.claim_density_percent).sum();
        if (sum - 100.0).abs() <= DENSITY_TOLERANCE {
            return vec![];
        }
        vec![ValidationDiagnostic::error(RuleViolation::new(
            ErrorCode::DensityMismatch,
            "/theme_metrics",
            format!("claim densities sum to {sum}, expected 100 ± {DENSITY_TOLERANCE}"),
        ))]
    }
}

// ─── Salience maps are empty or complete ───────────────────────────────────

struct SalienceCoverageRule;

impl<'a> ValidationRule<ThemeArtifacts<'a>> for SalienceCoverageRule {
    fn name(&self) -> &str {
        "salience_coverage"
    }

    fn validate(&self, a: &ThemeArtifacts<'a>) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        for (theme, m) in a.metrics {
            if m.salience_scores.is_empty() {
                continue;
            }
            let members: BTreeSet<&str> = a
                .groups
                .get(theme)
                .map(|g| g.iter().map(String::as_str).collect())
                .unwrap_or_default();
            let scored: BTreeSet<&str> = m.salience_scores.keys().collect();
            if members != scored {
                out.push(ValidationDiagnostic::error(RuleViolation::new(
                    ErrorCode::SalienceCoverage,
                    format!("/theme_metrics/{theme}/salience_scores"),
                    format!(
                        "salience map has {} sentences but theme has {}",
                        scored.len(),
                        members.len()
                    ),
                )));
            }
        }
        out
    }
}

// ─── Summaries agree with metrics ───────────────────────────────────────────

struct SummaryConsistencyRule;

impl<'a> ValidationRule<ThemeArtifacts<'a>> for SummaryConsistencyRule {
    fn name(&self) -> &str {
        "summary_consistency"
    }

    fn validate(&self, a: &ThemeArtifacts<'a>) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let metric_themes: BTreeSet<_> = a.metrics.keys().collect();
        let summary_themes: BTreeSet<_> = a.summaries.keys().collect();
        if metric_themes != summary_themes {
            out.push(ValidationDiagnostic::error(RuleViolation::new(
                ErrorCode::SummaryMismatch,
                "/theme_summaries",
                "summaries and metrics cover different themes",
            )));
        }

        for (theme, s) in a.summaries {
            let Some(m) = a.metrics.get(theme) else {
                continue;
            };
            if s.claim_count != m.claim_count || s.claim_density_percent != m.claim_density_percent {
                out.push(ValidationDiagnostic::error(RuleViolation::new(
                    ErrorCode::SummaryMismatch,
                    format!("/theme_summaries/{theme}"),
                    "claim_count or claim_density_percent differs from theme metrics",
                )));
            }
        }

        out
    }
}

// ─── Top claims are few and belong to the theme ────────────────────────────

struct TopClaimsRule;

impl<'a> ValidationRule<ThemeArtifacts<'a>> for TopClaimsRule {
    fn name(&self) -> &str {
        "top_claims"
    }

    fn validate(&self, a: &ThemeArtifacts<'a>) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        for (theme, s) in a.summaries {
            let members: &[String] = a.groups.get(theme).map(Vec::as_slice).unwrap_or_default();
            let limit = a.top_n.min(members.len());

            if s.top_number_claims.len() > limit {
                out.push(ValidationDiagnostic::error(RuleViolation::new(
                    ErrorCode::TopClaimsOverflow,
                    format!("/theme_summaries/{theme}/top_number_claims"),
                    format!(
                        "{} top claims exceed the limit of {limit}",
                        s.top_number_claims.len()
                    ),
                )));
            }

            for (i, claim) in s.top_number_claims.iter().enumerate() {
                if !members.contains(claim) {
                    out.push(ValidationDiagnostic::error(RuleViolation::new(
                        ErrorCode::TopClaimNotMember,
                        format!("/theme_summaries/{theme}/top_number_claims/{i}"),
                        format!("\"{claim}\" is not a claim of this theme"),
                    )));
                }
            }
        }
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClaimType, SalienceScores, Theme, ThemeMetrics, ThemeSummary};

    fn config(json: &str) -> PipelineConfig {
        serde_json::from_str(json).unwrap()
    }

    fn claim(sentence: &str, confidence: f64, assertiveness: f64) -> Claim {
        Claim {
            sentence: sentence.to_string(),
            confidence,
            assertiveness_score: assertiveness,
            claim_type: ClaimType::Qualitative,
        }
    }

    // ─── Configuration ─────────────────────────────────────────────────

    #[test]
    fn test_default_config_is_valid() {
        let report = ValidationEngine::with_defaults().validate(&PipelineConfig::default());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_all_range_errors_reported() {
        let report = ValidationEngine::with_defaults().validate(&config(
            r#"{
                "v": 2,
                "claim_threshold": -0.1,
                "salience": { "damping": 1.0, "tolerance": 0, "max_iterations": 0 },
                "summary": { "top_n": 0 },
                "capability_timeout_ms": 0
            }"#,
        ));
        let codes: Vec<_> = report.errors().map(|e| e.code).collect();
        assert_eq!(codes.iter().filter(|c| **c == ErrorCode::UnsupportedVersion).count(), 1);
        assert_eq!(codes.iter().filter(|c| **c == ErrorCode::OutOfRange).count(), 6);
    }

    #[test]
    fn test_unknown_fields_warn_unless_strict() {
        let lenient = ValidationEngine::with_defaults()
            .validate(&config(r#"{ "extra": 1, "salience": { "alpha": 2 } }"#));
        assert!(lenient.is_valid());
        assert_eq!(lenient.warnings().count(), 2);
        let paths: Vec<_> = lenient.warnings().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["/extra", "/salience/alpha"]);

        let strict = ValidationEngine::with_defaults()
            .validate(&config(r#"{ "extra": 1, "strict": true }"#));
        assert!(strict.has_errors());
    }

    #[test]
    fn test_rule_names() {
        let engine = ValidationEngine::with_defaults();
        assert_eq!(engine.rule_names(), vec!["version", "ranges", "unknown_fields"]);
    }

    // ─── Claims ────────────────────────────────────────────────────────

    #[test]
    fn test_valid_claims_pass() {
        let claims = vec![claim("a", 0.9, 0.8), claim("b", 0.6, 0.4)];
        let report = ValidationEngine::claim_rules().validate(claims.as_slice());
        assert!(report.ensure_valid("claims").is_ok());
    }

    #[test]
    fn test_claim_violations_name_the_invariant() {
        let claims = vec![
            claim("a", 1.2, 0.8),
            claim("a", 0.9, f64::NAN),
            claim("  ", 0.9, 0.5),
        ];
        let report = ValidationEngine::claim_rules().validate(claims.as_slice());
        assert_eq!(report.errors().count(), 4);

        let err = report.ensure_valid("claims").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("malformed claims artifact"));
        assert!(message.contains("score_out_of_range"));
        assert!(message.contains("duplicate_claim"));
        assert!(message.contains("empty_sentence"));
    }

    // ─── Theme artifacts ───────────────────────────────────────────────

    struct Fixture {
        groups: ThemeGroups,
        metrics: ThemeMetricsMap,
        summaries: ThemeSummaryMap,
    }

    impl Fixture {
        fn new() -> Self {
            let groups = ThemeGroups::from([
                (Theme::GhgEmissions, vec!["g1 10%".to_string(), "g2".to_string()]),
                (Theme::Other, vec!["o1".to_string()]),
            ]);
            let metrics = ThemeMetricsMap::from([
                (
                    Theme::GhgEmissions,
                    ThemeMetrics {
                        claim_count: 2,
                        claim_density_percent: 66.67,
                        salience_scores: SalienceScores::from([
                            ("g1 10%".to_string(), 0.5),
                            ("g2".to_string(), 0.5),
                        ]),
                    },
                ),
                (
                    Theme::Other,
                    ThemeMetrics {
                        claim_count: 1,
                        claim_density_percent: 33.33,
                        salience_scores: SalienceScores::new(),
                    },
                ),
            ]);
            let summaries = metrics
                .iter()
                .map(|(theme, m)| {
                    (
                        *theme,
                        ThemeSummary {
                            claim_count: m.claim_count,
                            claim_density_percent: m.claim_density_percent,
                            top_number_claims: groups[theme].clone(),
                        },
                    )
                })
                .collect();
            Self {
                groups,
                metrics,
                summaries,
            }
        }

        fn validate(&self, total_claims: usize, top_n: usize) -> ValidationReport {
            ValidationEngine::theme_rules().validate(&ThemeArtifacts {
                total_claims,
                groups: &self.groups,
                metrics: &self.metrics,
                summaries: &self.summaries,
                top_n,
            })
        }
    }

    #[test]
    fn test_consistent_theme_artifacts_pass() {
        let report = Fixture::new().validate(3, 5);
        assert!(report.is_empty(), "{:?}", report.diagnostics);
    }

    #[test]
    fn test_count_mismatch_detected() {
        let report = Fixture::new().validate(4, 5);
        assert!(report.errors().any(|e| e.code == ErrorCode::CountMismatch));
    }

    #[test]
    fn test_density_mismatch_detected() {
        let mut fixture = Fixture::new();
        fixture.metrics.get_mut(&Theme::Other).unwrap().claim_density_percent = 40.0;
        let report = fixture.validate(3, 5);
        assert!(report.errors().any(|e| e.code == ErrorCode::DensityMismatch));
        assert!(report.errors().any(|e| e.code == ErrorCode::SummaryMismatch));
    }

    #[test]
    fn test_partial_salience_map_detected() {
        let mut fixture = Fixture::new();
        fixture
            .metrics
            .get_mut(&Theme::GhgEmissions)
            .unwrap()
            .salience_scores
            .remove("g2");
        let report = fixture.validate(3, 5);
        assert!(report.errors().any(|e| e.code == ErrorCode::SalienceCoverage));
    }

    #[test]
    fn test_top_claims_limits_and_membership() {
        let report = Fixture::new().validate(3, 1);
        assert!(report.errors().any(|e| e.code == ErrorCode::TopClaimsOverflow));

        let mut fixture = Fixture::new();
        fixture
            .summaries
            .get_mut(&Theme::Other)
            .unwrap()
            .top_number_claims = vec!["g2".to_string()];
        let report = fixture.validate(3, 5);
        assert!(report.errors().any(|e| e.code == ErrorCode::TopClaimNotMember));
    }
}
