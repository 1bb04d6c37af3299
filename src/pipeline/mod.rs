//! Pipeline orchestration
//!
//! Capability traits at the boundaries, configuration, validation of
//! inter-stage artifacts, observers, the artifact store and the runner.

pub mod artifacts;
pub mod config;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod traits;
pub mod validation;

pub use artifacts::ArtifactStore;
pub use config::PipelineConfig;
pub use observer::{NoopObserver, PipelineObserver, StageTimingObserver, TracingObserver};
pub use runner::{Pipeline, PipelineOutput, RunStatus, RunStatusRecord};
pub use traits::{
    ClaimClassifier, Classification, CompanyProfileSource, Deadline, SentenceEmbedder,
    ThemeEvaluation, ThemeEvaluator,
};
pub use validation::{ValidationEngine, ValidationReport};
