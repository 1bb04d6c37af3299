//! Pipeline observer: stage-boundary hooks for logging and profiling.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic: stage timings, item counts, and the artifacts each stage
//! hands to the next.

use std::time::{Duration, Instant};

use tracing::info;

use crate::types::{Claim, LexicalRiskScores, ThemeMetricsMap, ThemeSummaryMap};

// ─── Stage names ────────────────────────────────────────────────────────────

pub const STAGE_LEXICAL: &str = "lexical";
pub const STAGE_FILTER: &str = "claim_filter";
pub const STAGE_ANNOTATE: &str = "annotate";
pub const STAGE_THEMES: &str = "themes";
pub const STAGE_SUMMARIZE: &str = "summarize";
pub const STAGE_EVALUATE: &str = "evaluate";

// ─── Clock ──────────────────────────────────────────────────────────────────

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    start: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// What a stage reports when it finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    duration: Duration,
    items_in: Option<usize>,
    items_out: Option<usize>,
    excluded: Option<usize>,
}

impl StageReport {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn items_in(&self) -> Option<usize> {
        self.items_in
    }

    pub fn items_out(&self) -> Option<usize> {
        self.items_out
    }

    pub fn excluded(&self) -> Option<usize> {
        self.excluded
    }
}

/// Fluent construction of a [`StageReport`].
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn items_in(mut self, n: usize) -> Self {
        self.report.items_in = Some(n);
        self
    }

    pub fn items_out(mut self, n: usize) -> Self {
        self.report.items_out = Some(n);
        self
    }

    pub fn excluded(mut self, n: usize) -> Self {
        self.report.excluded = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ─── Observer trait ─────────────────────────────────────────────────────────

/// Stage-boundary callbacks. Every method has a no-op default.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
    fn on_lexical(&mut self, _scores: &LexicalRiskScores) {}
    fn on_claims(&mut self, _claims: &[Claim]) {}
    fn on_theme_metrics(&mut self, _metrics: &ThemeMetricsMap) {}
    fn on_theme_summaries(&mut self, _summaries: &ThemeSummaryMap) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records every stage report in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn total_duration(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.duration).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Forwards stage reports to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        info!(
            stage,
            elapsed_ms = report.duration.as_secs_f64() * 1000.0,
            items_in = report.items_in,
            items_out = report.items_out,
            excluded = report.excluded,
            "stage finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .items_in(10)
            .items_out(4)
            .excluded(1)
            .build();
        assert_eq!(report.duration(), Duration::from_millis(3));
        assert_eq!(report.items_in(), Some(10));
        assert_eq!(report.items_out(), Some(4));
        assert_eq!(report.excluded(), Some(1));
        assert_eq!(StageReport::new(Duration::ZERO).items_in(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_start(STAGE_LEXICAL);
        obs.on_stage_end(STAGE_LEXICAL, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_FILTER, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<_> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![STAGE_LEXICAL, STAGE_FILTER]);
        assert_eq!(obs.total_duration(), Duration::from_millis(3));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
