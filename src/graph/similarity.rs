//! All-pairs cosine similarity over sentence vectors.

use crate::summarizer::unit_vector::UnitVector;

/// Dense symmetric `n x n` similarity matrix, self-similarity included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the cosine of every pair of vectors.
    ///
    /// Only the upper triangle is computed; the lower one is mirrored so the
    /// matrix is exactly symmetric.
    pub fn from_vectors(vectors: &[UnitVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0; size * size];

        for i in 0..size {
            for j in i..size {
                let sim = vectors[i].cosine_similarity(&vectors[j]);
                values[i * size + j] = sim;
                values[j * size + i] = sim;
            }
        }

        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    /// Iterate over `(col, similarity)` for one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = row * self.size;
        self.values[start..start + self.size].iter().copied().enumerate()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn vector(entries: &[(&str, f64)]) -> UnitVector {
        let dims: FxHashMap<String, f64> =
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        UnitVector::from_dimensions(dims)
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let vectors = vec![
            vector(&[("water", 1.0), ("reuse", 1.0)]),
            vector(&[("water", 1.0)]),
            vector(&[("solar", 2.0)]),
        ];
        let matrix = SimilarityMatrix::from_vectors(&vectors);

        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert!((matrix.get(i, i) - 1.0).abs() < 1e-9);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert!((matrix.get(0, 1) - 1.0 / 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(matrix.get(0, 2), 0.0);
    }

    #[test]
    fn test_empty_vector_has_zero_self_similarity() {
        let matrix = SimilarityMatrix::from_vectors(&[UnitVector::new(), vector(&[("a", 1.0)])]);
        assert_eq!(matrix.get(0, 0), 0.0);
        assert_eq!(matrix.row(1).collect::<Vec<_>>(), vec![(0, 0.0), (1, 1.0)]);
    }

    #[test]
    fn test_no_vectors() {
        assert!(SimilarityMatrix::from_vectors(&[]).is_empty());
    }
}
