//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds the composed stages. [`Pipeline::run`]
//! executes them in order on one document, threading artifacts between
//! stages and notifying a [`PipelineObserver`] at each boundary:
//!
//! 1. Lexical risk scoring of the whole text
//! 2. Claim filtering through the external classifier
//! 3. Claim annotation
//! 4. Theme classification, metrics and salience
//! 5. Top-number-claims summarization
//!
//! [`Pipeline::rank_claims`] runs stages 4-5 on an already annotated claims
//! list. Capability failures exclude single sentences or themes and are
//! collected in [`PipelineOutput::exclusions`]; an artifact that breaks the
//! data-model invariants stops the run with a failed [`RunStatus`].

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::claims::{AssertivenessReport, ClaimAnnotator, ClaimFilter};
use crate::error::{Error, Result};
use crate::lexical;
use crate::nlp::tokenizer::split_sentences;
use crate::pipeline::artifacts::{self, ArtifactStore};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_ANNOTATE,
    STAGE_EVALUATE, STAGE_FILTER, STAGE_LEXICAL, STAGE_SUMMARIZE, STAGE_THEMES,
};
use crate::pipeline::traits::{ClaimClassifier, SentenceEmbedder, ThemeEvaluator};
use crate::pipeline::validation::{ThemeArtifacts, ValidationEngine};
use crate::summarizer::{
    evaluate_themes, LexicalEmbedder, NumberClaimSelector, SalienceRanker, ScoredThemeSummaryMap,
};
use crate::themes::{classify_claims, compute_metrics, group_by_theme, ThemeGroups};
use crate::types::{
    AcceptedClaim, Claim, ClassifiedClaim, Exclusion, LexicalRiskScores, ThemeMetricsMap,
    ThemeSummaryMap,
};

/// Enter a tracing span for a pipeline stage. The span closes with the
/// enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Run status
// ============================================================================

/// Outcome marker persisted as `run_status.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Complete,
    Failed { stage: String, error: String },
}

/// Run status plus every exclusion recorded during the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatusRecord {
    #[serde(flatten)]
    pub status: RunStatus,
    pub exclusions: Vec<Exclusion>,
}

// ============================================================================
// PipelineOutput
// ============================================================================

/// Everything a run produced. Stages that did not run leave `None`.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub lexical: Option<LexicalRiskScores>,
    pub claims: Option<Vec<Claim>>,
    pub assertiveness: Option<AssertivenessReport>,
    pub classified: Vec<ClassifiedClaim>,
    pub theme_metrics: Option<ThemeMetricsMap>,
    pub theme_summaries: Option<ThemeSummaryMap>,
    pub scored_summaries: Option<ScoredThemeSummaryMap>,
    pub exclusions: Vec<Exclusion>,
    pub status: RunStatus,
}

impl PipelineOutput {
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }

    fn fail(&mut self, stage: &str, err: &Error) {
        error!(stage, error = %err, "pipeline stage failed");
        self.status = RunStatus::Failed {
            stage: stage.to_string(),
            error: err.to_string(),
        };
    }

    /// Score each theme's top claims with an external evaluator.
    ///
    /// Does nothing when the run produced no theme summaries.
    pub fn evaluate<V>(&mut self, evaluator: &V, observer: &mut impl PipelineObserver)
    where
        V: ThemeEvaluator + ?Sized,
    {
        let Some(summaries) = &self.theme_summaries else {
            return;
        };

        trace_stage!(STAGE_EVALUATE);
        observer.on_stage_start(STAGE_EVALUATE);
        let clock = StageClock::start();
        let (scored, excluded) = evaluate_themes(summaries, evaluator);
        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(summaries.len())
            .items_out(scored.len())
            .excluded(excluded.len())
            .build();
        observer.on_stage_end(STAGE_EVALUATE, &report);

        self.exclusions.extend(excluded);
        self.scored_summaries = Some(scored);
    }

    pub fn status_record(&self) -> RunStatusRecord {
        RunStatusRecord {
            status: self.status.clone(),
            exclusions: self.exclusions.clone(),
        }
    }

    /// Persist every produced artifact plus the run status marker.
    pub fn write_to(&self, store: &ArtifactStore) -> Result<()> {
        if let Some(lexical) = &self.lexical {
            store.write_json(artifacts::LEXICAL_SCORES, lexical)?;
        }
        if let Some(claims) = &self.claims {
            store.write_json(artifacts::CLAIMS, claims)?;
        }
        if let Some(report) = &self.assertiveness {
            store.write_json(artifacts::CLAIM_ASSERTIVENESS, report)?;
        }
        if let Some(metrics) = &self.theme_metrics {
            store.write_json(artifacts::THEME_METRICS, metrics)?;
        }
        if let Some(summaries) = &self.theme_summaries {
            store.write_json(artifacts::THEME_SUMMARIES, summaries)?;
        }
        if let Some(scored) = &self.scored_summaries {
            store.write_json(artifacts::THEME_SUMMARIES_WITH_SCORES, scored)?;
        }
        store.write_json(artifacts::RUN_STATUS, &self.status_record())?;
        Ok(())
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// The composed claim pipeline.
///
/// Generic over the claim classifier `C` and the sentence embedder `E`
/// behind salience ranking.
#[derive(Debug, Clone)]
pub struct Pipeline<C, E = LexicalEmbedder> {
    classifier: C,
    filter: ClaimFilter,
    annotator: ClaimAnnotator,
    ranker: SalienceRanker<E>,
    selector: NumberClaimSelector,
}

impl<C: ClaimClassifier> Pipeline<C, LexicalEmbedder> {
    /// Default configuration with the lexical embedder.
    pub fn with_classifier(classifier: C) -> Self {
        Self::new(classifier, LexicalEmbedder::default(), &PipelineConfig::default())
    }
}

impl<C, E> Pipeline<C, E>
where
    C: ClaimClassifier,
    E: SentenceEmbedder + Sync,
{
    pub fn new(classifier: C, embedder: E, config: &PipelineConfig) -> Self {
        Self {
            classifier,
            filter: ClaimFilter::new(config.claim_threshold),
            annotator: ClaimAnnotator,
            ranker: SalienceRanker::new(embedder).with_pagerank(config.pagerank()),
            selector: NumberClaimSelector::with_config(config.selector_config()),
        }
    }

    /// Run every stage on one document.
    pub fn run(&self, text: &str, observer: &mut impl PipelineObserver) -> PipelineOutput {
        let mut output = PipelineOutput::default();

        output.lexical = Some(self.lexical_stage(text, observer));

        let sentences = split_sentences(text);
        let accepted = self.filter_stage(&sentences, &mut output, observer);
        let claims = self.annotate_stage(&accepted, observer);
        output.assertiveness = AssertivenessReport::from_claims(&claims);

        self.rank_into(&claims, &mut output, observer);
        output.claims = Some(claims);

        info!(
            sentences = sentences.len(),
            status = ?output.status,
            excluded = output.exclusions.len(),
            "pipeline run finished"
        );
        output
    }

    /// Run the theme and summary stages on an annotated claims list.
    pub fn rank_claims(&self, claims: &[Claim], observer: &mut impl PipelineObserver) -> PipelineOutput {
        let mut output = PipelineOutput::default();
        self.rank_into(claims, &mut output, observer);
        output
    }

    fn rank_into(
        &self,
        claims: &[Claim],
        output: &mut PipelineOutput,
        observer: &mut impl PipelineObserver,
    ) {
        let claim_report = ValidationEngine::claim_rules().validate(claims);
        if let Err(err) = claim_report.ensure_valid("claims") {
            output.fail(STAGE_THEMES, &err);
            return;
        }

        let (classified, groups, metrics) = self.theme_stage(claims, output, observer);
        let summaries = self.summarize_stage(&groups, &metrics, observer);

        let theme_report = ValidationEngine::theme_rules().validate(&ThemeArtifacts {
            total_claims: claims.len(),
            groups: &groups,
            metrics: &metrics,
            summaries: &summaries,
            top_n: self.selector.config().top_n,
        });
        if let Err(err) = theme_report.ensure_valid("theme") {
            output.fail(STAGE_SUMMARIZE, &err);
            return;
        }

        output.classified = classified;
        output.theme_metrics = Some(metrics);
        output.theme_summaries = Some(summaries);
    }

    // ─── Stages ─────────────────────────────────────────────────────────

    fn lexical_stage(&self, text: &str, observer: &mut impl PipelineObserver) -> LexicalRiskScores {
        trace_stage!(STAGE_LEXICAL);
        observer.on_stage_start(STAGE_LEXICAL);
        let clock = StageClock::start();
        let scores = lexical::score_document(text);
        observer.on_stage_end(STAGE_LEXICAL, &StageReport::new(clock.elapsed()));
        observer.on_lexical(&scores);
        scores
    }

    fn filter_stage(
        &self,
        sentences: &[String],
        output: &mut PipelineOutput,
        observer: &mut impl PipelineObserver,
    ) -> Vec<AcceptedClaim> {
        trace_stage!(STAGE_FILTER);
        observer.on_stage_start(STAGE_FILTER);
        let clock = StageClock::start();
        let outcome = self.filter.filter(&self.classifier, sentences);
        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(sentences.len())
            .items_out(outcome.accepted.len())
            .excluded(outcome.excluded.len())
            .build();
        observer.on_stage_end(STAGE_FILTER, &report);

        output.exclusions.extend(outcome.excluded);
        outcome.accepted
    }

    fn annotate_stage(
        &self,
        accepted: &[AcceptedClaim],
        observer: &mut impl PipelineObserver,
    ) -> Vec<Claim> {
        trace_stage!(STAGE_ANNOTATE);
        observer.on_stage_start(STAGE_ANNOTATE);
        let clock = StageClock::start();
        let claims = self.annotator.annotate_all(accepted);
        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(accepted.len())
            .items_out(claims.len())
            .build();
        observer.on_stage_end(STAGE_ANNOTATE, &report);
        observer.on_claims(&claims);
        claims
    }

    fn theme_stage(
        &self,
        claims: &[Claim],
        output: &mut PipelineOutput,
        observer: &mut impl PipelineObserver,
    ) -> (Vec<ClassifiedClaim>, ThemeGroups, ThemeMetricsMap) {
        trace_stage!(STAGE_THEMES);
        observer.on_stage_start(STAGE_THEMES);
        let clock = StageClock::start();
        let classified = classify_claims(claims);
        let groups = group_by_theme(&classified);
        let (metrics, excluded) = compute_metrics(&groups, &self.ranker);
        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(claims.len())
            .items_out(metrics.len())
            .excluded(excluded.len())
            .build();
        observer.on_stage_end(STAGE_THEMES, &report);
        observer.on_theme_metrics(&metrics);

        output.exclusions.extend(excluded);
        (classified, groups, metrics)
    }

    fn summarize_stage(
        &self,
        groups: &ThemeGroups,
        metrics: &ThemeMetricsMap,
        observer: &mut impl PipelineObserver,
    ) -> ThemeSummaryMap {
        trace_stage!(STAGE_SUMMARIZE);
        observer.on_stage_start(STAGE_SUMMARIZE);
        let clock = StageClock::start();
        let summaries = self.selector.summarize(groups, metrics);
        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(groups.len())
            .items_out(summaries.len())
            .build();
        observer.on_stage_end(STAGE_SUMMARIZE, &report);
        observer.on_theme_summaries(&summaries);
        summaries
    }
}

// ============================================================================
// Tests
// ============================================================================
