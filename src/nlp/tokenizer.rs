//! Sentence segmentation and word-level helpers
//!
//! Extracted report text is full of hard line breaks, so every entry point
//! normalizes whitespace before segmenting. Sentence boundaries follow
//! Unicode UAX #29 via `unicode-segmentation`.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Sentence-like runs for readability statistics: text up to a terminator.
static SENTENCE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[^.!?]+[.!?]*").expect("static regex"));

/// Word tokens for vocabulary statistics, apostrophes included.
static VOCAB_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w'‘’]+").expect("static regex"));

/// Collapse every whitespace run (including line breaks) into one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split raw document text into trimmed, non-empty sentences in source order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    normalized
        .unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased Unicode words, punctuation dropped.
pub fn words_lowercase(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words().map(|w| w.to_lowercase())
}

/// Whitespace-delimited words with ASCII punctuation removed.
///
/// A token made only of punctuation is not a word.
pub fn lexicon_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.chars().filter(|c| !c.is_ascii_punctuation()).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Number of words in `text` (see [`lexicon_words`]).
pub fn lexicon_count(text: &str) -> usize {
    lexicon_words(text).len()
}

/// Number of sentences for readability purposes.
///
/// Runs of two words or fewer (headings, list bullets, page numbers) are not
/// counted. Never returns less than 1.
pub fn sentence_count(text: &str) -> usize {
    let mut total = 0usize;
    let mut ignored = 0usize;
    for run in SENTENCE_RUN.find_iter(text) {
        total += 1;
        if lexicon_count(run.as_str()) <= 2 {
            ignored += 1;
        }
    }
    total.saturating_sub(ignored).max(1)
}

/// Lowercased vocabulary tokens (letters, digits, apostrophes).
pub fn vocabulary_words(text: &str) -> impl Iterator<Item = String> + '_ {
    VOCAB_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

/// Heuristic English syllable count.
///
/// Counts vowel groups and drops a silent final `e` (but keeps consonant +
/// `le`) and a silent `-ed`. Words of three letters or fewer count as one
/// syllable; a word without letters counts as zero.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    let n = letters.len();
    if n == 0 {
        return 0;
    }
    if n <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0usize;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    let last = letters[n - 1];
    let second_last = letters[n - 2];
    let third_last = letters[n - 3];

    if last == 'e' {
        let consonant_le = second_last == 'l' && !is_vowel(third_last);
        if !consonant_le && count > 1 {
            count -= 1;
        }
    } else if last == 'd'
        && second_last == 'e'
        && !is_vowel(third_last)
        && !matches!(third_last, 't' | 'd')
        && count > 1
    {
        count -= 1;
    }

    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_joins_broken_lines() {
        let text = "We reduced emissions by 12%\nin 2023. Water use fell.\n\nWe plan more.";
        let sentences = split_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "We reduced emissions by 12% in 2023.",
                "Water use fell.",
                "We plan more."
            ]
        );
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_lexicon_words_strip_punctuation() {
        let words = lexicon_words("Scope 1, 2 - and 3 (tCO2e).");
        assert_eq!(words, vec!["Scope", "1", "2", "and", "3", "tCO2e"]);
    }

    #[test]
    fn test_sentence_count_ignores_fragments() {
        let text = "Page 4. We cut energy use sharply. Our water use also fell a lot.";
        assert_eq!(sentence_count(text), 2);
        assert_eq!(sentence_count(""), 1);
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("formed"), 1);
        assert_eq!(count_syllables("wanted"), 2);
        assert_eq!(count_syllables("environment"), 4);
        assert_eq!(count_syllables("sustainability"), 6);
        assert_eq!(count_syllables("2023"), 0);
    }

    #[test]
    fn test_words_lowercase() {
        let words: Vec<_> = words_lowercase("Net-Zero by 2050!").collect();
        assert_eq!(words, vec!["net", "zero", "by", "2050"]);
    }
}
