//! Lexical risk scoring over the whole document text.
//!
//! Two independent sub-scores, both on a 0..=100 scale: vague-language
//! density and reading difficulty. Neither depends on claim extraction.

pub mod readability;
pub mod vague;

use regex::Regex;
use tracing::warn;

use crate::types::LexicalRiskScores;

/// Compile a case-insensitive whole-word matcher for a literal phrase.
///
/// Word boundaries are only asserted on sides where the phrase starts or
/// ends with a word character, so terms like `100%` still match.
pub(crate) fn phrase_regex(term: &str) -> Regex {
    let starts_word = term.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_');
    let ends_word = term.chars().last().is_some_and(|c| c.is_alphanumeric() || c == '_');

    let mut pattern = String::from("(?i)");
    if starts_word {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if ends_word {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern).expect("escaped literal is a valid regex")
}

/// Score a document. Empty or whitespace-only text yields zero scores.
pub fn score_document(text: &str) -> LexicalRiskScores {
    if text.trim().is_empty() {
        warn!("empty document text; emitting zero lexical scores");
        return LexicalRiskScores::default();
    }

    LexicalRiskScores {
        vague: vague::vague_words_score(text),
        readability: readability::difficulty_score(text),
    }
}
