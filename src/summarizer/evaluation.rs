//! Theme evaluation through the external [`ThemeEvaluator`] capability.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CapabilityError;
use crate::pipeline::observer::STAGE_EVALUATE;
use crate::pipeline::traits::{ThemeEvaluation, ThemeEvaluator};
use crate::types::{round_to, Exclusion, Theme, ThemeSummary, ThemeSummaryMap};

const CAPABILITY: &str = "theme_evaluator";

/// Lines expected in an evaluation summary.
pub const SUMMARY_LINES: usize = 2;

/// A theme summary with its external evaluation attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredThemeSummary {
    #[serde(flatten)]
    pub summary: ThemeSummary,
    /// Rounded to 3 decimals.
    pub theme_score: f64,
    pub theme_summary: Vec<String>,
}

pub type ScoredThemeSummaryMap = BTreeMap<Theme, ScoredThemeSummary>;

/// Evaluate every theme's top claims.
///
/// Themes without top claims get a zero score and no summary, without a
/// capability call. A failing or invalid evaluation excludes that theme.
pub fn evaluate_themes<V>(
    summaries: &ThemeSummaryMap,
    evaluator: &V,
) -> (ScoredThemeSummaryMap, Vec<Exclusion>)
where
    V: ThemeEvaluator + ?Sized,
{
    let mut scored = ScoredThemeSummaryMap::new();
    let mut excluded = Vec::new();

    for (theme, summary) in summaries {
        let claims = &summary.top_number_claims;
        let evaluation = if claims.is_empty() {
            Ok(ThemeEvaluation {
                score: 0.0,
                summary: Vec::new(),
            })
        } else {
            evaluator.score_theme(claims).and_then(check_output)
        };

        match evaluation {
            Ok(evaluation) => {
                let theme_score = round_to(evaluation.score, 3);
                info!(theme = theme.name(), theme_score, "theme evaluated");
                scored.insert(
                    *theme,
                    ScoredThemeSummary {
                        summary: summary.clone(),
                        theme_score,
                        theme_summary: evaluation.summary,
                    },
                );
            }
            Err(err) => {
                warn!(
                    theme = theme.name(),
                    claims = ?claims,
                    error = %err,
                    code = err.code(),
                    "theme evaluation failed; theme excluded"
                );
                excluded.push(Exclusion::new(STAGE_EVALUATE, theme.name(), &err));
            }
        }
    }

    (scored, excluded)
}

fn check_output(evaluation: ThemeEvaluation) -> Result<ThemeEvaluation, CapabilityError> {
    if !evaluation.score.is_finite() || !(0.0..=1.0).contains(&evaluation.score) {
        return Err(CapabilityError::invalid_output(
            CAPABILITY,
            format!("score {} outside [0, 1]", evaluation.score),
        ));
    }
    if evaluation.summary.len() != SUMMARY_LINES {
        return Err(CapabilityError::invalid_output(
            CAPABILITY,
            format!(
                "expected {SUMMARY_LINES} summary lines, got {}",
                evaluation.summary.len()
            ),
        ));
    }
    Ok(evaluation)
}
