//! Structured findings reported by the validation engine.

use std::fmt;

use serde::Serialize;

/// Stable machine-readable code of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Configuration version is not supported.
    UnsupportedVersion,
    /// A numeric setting is outside its allowed range.
    OutOfRange,
    /// A field is not part of the schema.
    UnknownField,
    /// A claim score lies outside [0, 1].
    ScoreOutOfRange,
    /// A claim sentence is empty.
    EmptySentence,
    /// Two claims share the same sentence.
    DuplicateClaim,
    /// Theme claim counts do not add up to the number of claims.
    CountMismatch,
    /// Theme densities do not add up to 100.
    DensityMismatch,
    /// A salience map neither is empty nor covers its theme.
    SalienceCoverage,
    /// A summary disagrees with its theme metrics.
    SummaryMismatch,
    /// Too many top claims for a theme.
    TopClaimsOverflow,
    /// A top claim does not belong to its theme.
    TopClaimNotMember,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::OutOfRange => "out_of_range",
            Self::UnknownField => "unknown_field",
            Self::ScoreOutOfRange => "score_out_of_range",
            Self::EmptySentence => "empty_sentence",
            Self::DuplicateClaim => "duplicate_claim",
            Self::CountMismatch => "count_mismatch",
            Self::DensityMismatch => "density_mismatch",
            Self::SalienceCoverage => "salience_coverage",
            Self::SummaryMismatch => "summary_mismatch",
            Self::TopClaimsOverflow => "top_claims_overflow",
            Self::TopClaimNotMember => "top_claim_not_member",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated rule: code, JSON-pointer-like path, message and optional hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleViolation {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl RuleViolation {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_hint() {
        let v = RuleViolation::new(ErrorCode::OutOfRange, "/claim_threshold", "must be in [0, 1]")
            .with_hint("use 0.6");
        assert_eq!(
            v.to_string(),
            "[out_of_range] /claim_threshold: must be in [0, 1] (hint: use 0.6)"
        );
    }

    #[test]
    fn test_serializes_code_as_snake_case() {
        let v = RuleViolation::new(ErrorCode::DuplicateClaim, "/3", "dup");
        let value = serde_json::to_value(&v).unwrap();
        assert_eq!(value["code"], "duplicate_claim");
        assert!(value.get("hint").is_none());
    }
}
