//! Claim extraction and annotation.
//!
//! - [`filter`]: keeps the sentences the external classifier calls claims
//! - [`annotator`]: assertiveness score and claim type per claim
//! - [`report`]: document-level assertiveness summary

pub mod annotator;
pub mod filter;
pub mod report;

pub use annotator::{assertiveness_score, classify_claim_type, language_strength, ClaimAnnotator};
pub use filter::{ClaimFilter, FilterOutcome, ScoreTableClassifier, DEFAULT_CLAIM_THRESHOLD};
pub use report::{AssertivenessReport, ClaimTypeDistribution};
