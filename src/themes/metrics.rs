//! Per-theme grouping, claim density and salience.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::pipeline::observer::STAGE_THEMES;
use crate::pipeline::traits::SentenceEmbedder;
use crate::summarizer::salience::SalienceRanker;
use crate::types::{
    round_to, ClassifiedClaim, Exclusion, SalienceScores, Theme, ThemeMetrics, ThemeMetricsMap,
};

/// Theme -> member sentences in insertion order.
pub type ThemeGroups = BTreeMap<Theme, Vec<String>>;

/// Group classified claims by theme. Only themes with claims appear.
pub fn group_by_theme(claims: &[ClassifiedClaim]) -> ThemeGroups {
    let mut groups = ThemeGroups::new();
    for classified in claims {
        groups
            .entry(classified.theme)
            .or_default()
            .push(classified.claim.sentence.clone());
    }
    groups
}

/// `round(count / total * 100, 2)`; zero when there are no claims.
pub fn claim_density(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 2)
}

/// Compute metrics for every theme.
///
/// Salience runs per theme in parallel; results land in a map ordered by
/// theme, so the output matches a sequential run. A theme whose salience
/// fails keeps its counts with an empty salience map and is reported as an
/// exclusion.
pub fn compute_metrics<E>(
    groups: &ThemeGroups,
    ranker: &SalienceRanker<E>,
) -> (ThemeMetricsMap, Vec<Exclusion>)
where
    E: SentenceEmbedder + Sync,
{
    let total: usize = groups.values().map(Vec::len).sum();

    let computed: Vec<(Theme, ThemeMetrics, Option<Exclusion>)> = groups
        .par_iter()
        .map(|(theme, sentences)| {
            let (salience_scores, exclusion) = match ranker.rank(sentences) {
                Ok(scores) => (scores, None),
                Err(err) => {
                    warn!(
                        theme = theme.name(),
                        claims = ?sentences,
                        error = %err,
                        "salience ranking failed; theme keeps an empty salience map"
                    );
                    (
                        SalienceScores::new(),
                        Some(Exclusion::new(STAGE_THEMES, theme.name(), &err)),
                    )
                }
            };

            let metrics = ThemeMetrics {
                claim_count: sentences.len(),
                claim_density_percent: claim_density(sentences.len(), total),
                salience_scores,
            };
            (*theme, metrics, exclusion)
        })
        .collect();

    let mut metrics = ThemeMetricsMap::new();
    let mut exclusions = Vec::new();
    for (theme, m, exclusion) in computed {
        debug!(
            theme = theme.name(),
            claim_count = m.claim_count,
            density = m.claim_density_percent,
            "theme metrics computed"
        );
        metrics.insert(theme, m);
        exclusions.extend(exclusion);
    }

    (metrics, exclusions)
}
