//! Reading difficulty: Flesch reading ease, sentence length and polysyllabic
//! vocabulary folded into one 0..=100 score.
//!
//! A word is difficult when it has at least [`DIFFICULT_SYLLABLES`]
//! syllables and is not on the Dale-Chall list of words familiar to
//! fourth-grade readers.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

use crate::nlp::tokenizer::{count_syllables, lexicon_words, sentence_count, vocabulary_words};
use crate::types::{round_to, ReadabilityScore};

/// Words with at least this many syllables count as difficult.
pub const DIFFICULT_SYLLABLES: usize = 2;

/// Dale-Chall easy words, lowercase.
static EASY_WORDS: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| include_str!("easy_words.txt").split_whitespace().collect());

/// Whether `word` (lowercase) is on the easy-word list.
pub fn is_easy_word(word: &str) -> bool {
    EASY_WORDS.contains(word)
}

/// Average sentence length (words) that maps to the maximum sentence score.
pub const LONG_SENTENCE_WORDS: f64 = 30.0;

/// Flesch reading ease: higher is easier, typically 0..100.
///
/// With no words the ratios are taken as zero, giving the formula's
/// intercept (maximally easy).
pub fn flesch_reading_ease(total_words: usize, total_sentences: usize, total_syllables: usize) -> f64 {
    let (words_per_sentence, syllables_per_word) = if total_words == 0 {
        (0.0, 0.0)
    } else {
        (
            total_words as f64 / total_sentences.max(1) as f64,
            total_syllables as f64 / total_words as f64,
        )
    };
    206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word
}

/// Number of distinct difficult words: [`DIFFICULT_SYLLABLES`] or more
/// syllables and not an easy word.
pub fn difficult_words(text: &str) -> usize {
    vocabulary_words(text)
        .filter(|w| !w.chars().any(|c| c.is_ascii_digit()))
        .filter(|w| !is_easy_word(w))
        .filter(|w| count_syllables(w) >= DIFFICULT_SYLLABLES)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Compute the readability sub-score for raw document text.
pub fn difficulty_score(text: &str) -> ReadabilityScore {
    let text = text.replace('\n', " ");

    let words = lexicon_words(&text);
    let total_words = words.len();
    let total_sentences = sentence_count(&text);
    let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let avg_sentence_length = total_words as f64 / total_sentences.max(1) as f64;
    let ease = flesch_reading_ease(total_words, total_sentences, total_syllables);
    let difficult = difficult_words(&text);

    // Negative ease (very dense prose) saturates at the hardest end.
    let readability_score = 1.0 - (ease / 100.0).clamp(0.0, 1.0);
    let sentence_score = (avg_sentence_length / LONG_SENTENCE_WORDS).min(1.0);
    let difficult_ratio = difficult as f64 / total_words.max(1) as f64;
    let difficult_score = (difficult_ratio * 200.0).min(1.0);

    let composite = 0.4 * readability_score + 0.4 * sentence_score + 0.2 * difficult_score;

    ReadabilityScore {
        flesch_reading_ease: round_to(ease, 2),
        avg_sentence_length: round_to(avg_sentence_length, 2),
        difficult_words: difficult,
        difficulty_to_read_score: (composite * 100.0).round() as u32,
    }
}
