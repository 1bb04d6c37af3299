//! Pipeline configuration.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "claim_threshold": 0.6,
//!   "salience": { "damping": 0.85, "max_iterations": 100, "tolerance": 1e-6 },
//!   "summary": { "max_sentence_chars": 250, "top_n": 5 },
//!   "capability_timeout_ms": 30000,
//!   "strict": false
//! }
//! ```
//!
//! Every field is optional. Unrecognized fields are captured and reported by
//! the [`ValidationEngine`](super::validation::ValidationEngine).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validation::{ValidationEngine, ValidationReport};
use crate::claims::filter::DEFAULT_CLAIM_THRESHOLD;
use crate::error::{Error, Result};
use crate::pagerank::standard::{
    StandardPageRank, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use crate::summarizer::selector::SelectorConfig;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "ESG_SALIENCE_CONFIG";

/// Current configuration version.
pub const CONFIG_VERSION: u32 = 1;

/// Top-level pipeline configuration (v1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub v: u32,

    /// Minimum classifier probability for a sentence to count as a claim.
    pub claim_threshold: f64,

    pub salience: SalienceConfig,

    pub summary: SummaryConfig,

    /// Per-call deadline for external capabilities; `None` means unbounded.
    pub capability_timeout_ms: Option<u64>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    pub strict: bool,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            v: CONFIG_VERSION,
            claim_threshold: DEFAULT_CLAIM_THRESHOLD,
            salience: SalienceConfig::default(),
            summary: SummaryConfig::default(),
            capability_timeout_ms: None,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

/// PageRank settings for salience ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalienceConfig {
    pub damping: f64,
    pub max_iterations: usize,
    /// Per-node L1 convergence tolerance.
    pub tolerance: f64,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for SalienceConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Top-number-claims selection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub max_sentence_chars: usize,
    pub top_n: usize,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        let selector = SelectorConfig::default();
        Self {
            max_sentence_chars: selector.max_sentence_chars,
            top_n: selector.top_n,
            unknown_fields: HashMap::new(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&raw)
    }

    /// Load from `explicit`, else from [`CONFIG_ENV`], else defaults; then
    /// validate.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading pipeline configuration");
                Self::from_path(&path)?
            }
            None => Self::default(),
        };
        config.validated()
    }

    /// Run the default validation rules.
    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::with_defaults().validate(self)
    }

    /// Log warnings and fail on errors.
    pub fn validated(self) -> Result<Self> {
        let report = self.validate();
        for warning in report.warnings() {
            warn!(%warning, "configuration warning");
        }
        if report.has_errors() {
            let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
            return Err(Error::Config(messages.join("; ")));
        }
        Ok(self)
    }

    pub fn pagerank(&self) -> StandardPageRank {
        StandardPageRank::new()
            .with_damping(self.salience.damping)
            .with_max_iterations(self.salience.max_iterations)
            .with_tolerance(self.salience.tolerance)
    }

    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            max_sentence_chars: self.summary.max_sentence_chars,
            top_n: self.summary.top_n,
        }
    }

    pub fn capability_timeout(&self) -> Option<Duration> {
        self.capability_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.claim_threshold, 0.6);
        assert_eq!(config.salience.damping, 0.85);
        assert_eq!(config.summary.top_n, 5);
        assert!(config.capability_timeout().is_none());
    }

    #[test]
    fn test_partial_nested_sections() {
        let config = PipelineConfig::from_json_str(
            r#"{ "salience": { "damping": 0.9 }, "capability_timeout_ms": 1500 }"#,
        )
        .unwrap();
        assert_eq!(config.salience.damping, 0.9);
        assert_eq!(config.salience.max_iterations, 100);
        assert_eq!(config.capability_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.pagerank().damping, 0.9);
    }

    #[test]
    fn test_unknown_fields_are_captured() {
        let config =
            PipelineConfig::from_json_str(r#"{ "thresold": 0.5, "summary": { "topn": 3 } }"#)
                .unwrap();
        assert!(config.unknown_fields.contains_key("thresold"));
        assert!(config.summary.unknown_fields.contains_key("topn"));
    }

    #[test]
    fn test_validated_rejects_bad_values() {
        let config = PipelineConfig::from_json_str(r#"{ "claim_threshold": 1.5 }"#).unwrap();
        let err = config.validated().unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("claim_threshold")));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "summary": { "top_n": 3 } }"#).unwrap();

        let config = PipelineConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.selector_config().top_n, 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PipelineConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
