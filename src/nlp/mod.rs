//! Natural Language Processing components
//!
//! This module provides sentence segmentation, word tokenization, syllable
//! counting and stopword filtering.

pub mod stopwords;
pub mod tokenizer;
