//! Thematic classification and per-theme metrics.

pub mod classifier;
pub mod keywords;
pub mod metrics;

pub use classifier::{classify_claims, classify_theme, score_themes};
pub use metrics::{claim_density, compute_metrics, group_by_theme, ThemeGroups};
