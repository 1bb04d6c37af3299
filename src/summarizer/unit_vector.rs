//! Sparse unit vectors for sentence similarity.
//!
//! [`LexicalEmbedder`] is the built-in [`SentenceEmbedder`]: a stopword-free
//! term-frequency vector, L2-normalized. Any dense or model-backed embedder
//! can be plugged in through the trait instead.

use rustc_hash::FxHashMap;

use crate::error::CapabilityError;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::words_lowercase;
use crate::pipeline::traits::SentenceEmbedder;

/// A sparse unit vector representation of a sentence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitVector {
    /// Non-zero dimensions: term -> weight
    pub dimensions: FxHashMap<String, f64>,
    /// L2 norm before normalization
    pub norm: f64,
}

impl UnitVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a map of dimensions
    pub fn from_dimensions(mut dimensions: FxHashMap<String, f64>) -> Self {
        let norm = Self::compute_norm(&dimensions);
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// Create from dense components, using the index as the dimension key.
    pub fn from_dense(components: &[f64]) -> Self {
        let dimensions = components
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i.to_string(), *v))
            .collect();
        Self::from_dimensions(dimensions)
    }

    fn compute_norm(dimensions: &FxHashMap<String, f64>) -> f64 {
        dimensions.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Cosine similarity; a dot product since both sides are normalized.
    ///
    /// Iterates the smaller side, in key order, so the result is independent
    /// of map layout.
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut keys: Vec<&String> = small.dimensions.keys().collect();
        keys.sort();

        keys.into_iter()
            .filter_map(|k| Some(small.dimensions[k] * large.dimensions.get(k)?))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

/// Term-frequency embedder over lowercased, stopword-filtered words.
#[derive(Debug, Clone, Default)]
pub struct LexicalEmbedder {
    stopwords: StopwordFilter,
}

impl LexicalEmbedder {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    pub fn vectorize(&self, sentence: &str) -> UnitVector {
        let mut dimensions: FxHashMap<String, f64> = FxHashMap::default();
        for word in words_lowercase(sentence) {
            if self.stopwords.is_stopword(&word) {
                continue;
            }
            *dimensions.entry(word).or_insert(0.0) += 1.0;
        }
        UnitVector::from_dimensions(dimensions)
    }
}

impl SentenceEmbedder for LexicalEmbedder {
    fn embed(&self, sentence: &str) -> Result<UnitVector, CapabilityError> {
        Ok(self.vectorize(sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(entries: &[(&str, f64)]) -> FxHashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let v1 = UnitVector::from_dimensions(dims(&[("a", 1.0), ("b", 2.0)]));
        let v2 = UnitVector::from_dimensions(dims(&[("a", 1.0), ("b", 2.0)]));
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let v1 = UnitVector::from_dimensions(dims(&[("a", 1.0)]));
        let v2 = UnitVector::from_dimensions(dims(&[("b", 1.0)]));
        assert_eq!(v1.cosine_similarity(&v2), 0.0);
    }

    #[test]
    fn test_cosine_similarity_is_symmetric() {
        let v1 = UnitVector::from_dimensions(dims(&[("a", 1.0), ("b", 3.0), ("c", 0.5)]));
        let v2 = UnitVector::from_dimensions(dims(&[("b", 1.0), ("c", 2.0)]));
        assert_eq!(v1.cosine_similarity(&v2), v2.cosine_similarity(&v1));
    }

    #[test]
    fn test_unit_normalization() {
        let v = UnitVector::from_dimensions(dims(&[("a", 3.0), ("b", 4.0)]));
        assert_eq!(v.norm, 5.0);
        let actual: f64 = v.dimensions.values().map(|x| x * x).sum::<f64>().sqrt();
        assert!((actual - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_dense() {
        let v = UnitVector::from_dense(&[0.0, 3.0, 4.0]);
        assert_eq!(v.dimensions.len(), 2);
        assert!((v.dimensions["2"] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_lexical_embedder_drops_stopwords() {
        let embedder = LexicalEmbedder::default();
        let v = embedder.vectorize("We reduced the water use and the water waste");
        assert!(!v.dimensions.contains_key("the"));
        assert!(v.dimensions["water"] > v.dimensions["waste"]);
    }

    #[test]
    fn test_lexical_embedder_similarity() {
        let embedder = LexicalEmbedder::default();
        let a = embedder.embed("Water recycling cut freshwater withdrawal").unwrap();
        let b = embedder.embed("Recycling water reduced withdrawal").unwrap();
        let c = embedder.embed("Solar panels power our offices").unwrap();
        assert!(a.cosine_similarity(&b) > a.cosine_similarity(&c));
        assert_eq!(a.cosine_similarity(&c), 0.0);
    }

    #[test]
    fn test_only_stopwords_gives_empty_vector() {
        let v = LexicalEmbedder::default().vectorize("and the of");
        assert!(v.is_empty());
    }
}
