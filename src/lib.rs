//! # esg-salience
//!
//! Claim scoring and thematic salience ranking for sustainability reports.
//!
//! A report's text flows through five stages:
//!
//! 1. **Lexical risk**: vague-language density and reading difficulty of the
//!    whole document ([`lexical`]).
//! 2. **Claim filter**: an external classifier decides which sentences are
//!    claims ([`claims::filter`]).
//! 3. **Annotation**: assertiveness score and claim type per claim
//!    ([`claims::annotator`]).
//! 4. **Themes**: keyword-based theme assignment, claim density, and
//!    PageRank salience over each theme's sentence-similarity graph
//!    ([`themes`], [`graph`], [`pagerank`]).
//! 5. **Summaries**: the most number-dense claims per theme
//!    ([`summarizer`]).
//!
//! ```rust,ignore
//! use esg_salience::prelude::*;
//!
//! let classifier = ScoreTableClassifier::from_path("scores.json")?;
//! let pipeline = Pipeline::with_classifier(classifier);
//! let output = pipeline.run(&text, &mut TracingObserver);
//! output.write_to(&ArtifactStore::new("out")?)?;
//! ```

pub mod claims;
pub mod error;
pub mod graph;
pub mod lexical;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod session;
pub mod summarizer;
pub mod themes;
pub mod types;

pub use error::{CapabilityError, Error, Result};
pub use types::{
    AcceptedClaim, Claim, ClaimType, ClassifiedClaim, Exclusion, LexicalRiskScores,
    SalienceScores, Theme, ThemeMetrics, ThemeSummary,
};

/// Commonly used items.
pub mod prelude {
    pub use crate::claims::{AssertivenessReport, ClaimAnnotator, ClaimFilter, ScoreTableClassifier};
    pub use crate::error::{CapabilityError, Error, Result};
    pub use crate::lexical::score_document;
    pub use crate::pipeline::{
        ArtifactStore, ClaimClassifier, Deadline, NoopObserver, Pipeline, PipelineConfig,
        PipelineObserver, PipelineOutput, RunStatus, SentenceEmbedder, ThemeEvaluator,
        TracingObserver,
    };
    pub use crate::session::{CompanyProfile, ProfileStore, SessionState};
    pub use crate::summarizer::{LexicalEmbedder, SalienceRanker, UnitVector};
    pub use crate::types::{Claim, ClaimType, Theme, ThemeMetrics, ThemeSummary};
}
