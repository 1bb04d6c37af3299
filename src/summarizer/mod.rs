//! Theme summarization
//!
//! Salience ranking within a theme, top-number-claims selection and the
//! optional external evaluation of each theme.

pub mod evaluation;
pub mod salience;
pub mod selector;
pub mod unit_vector;

pub use evaluation::{evaluate_themes, ScoredThemeSummary, ScoredThemeSummaryMap};
pub use salience::SalienceRanker;
pub use selector::{count_quantitative_tokens, NumberClaimSelector, SelectorConfig};
pub use unit_vector::{LexicalEmbedder, UnitVector};
