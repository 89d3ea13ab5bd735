//! Pairwise cosine similarity over unit-length sparse vectors
//!
//! Only n-grams shared by two texts contribute to their score, so the
//! computation walks an inverted index (dimension -> postings) instead of
//! dense rows. Rows run in parallel and are stored back in row order, which
//! keeps the result identical to a sequential pass.

use crate::vectorizer::FeatureVector;
use rayon::prelude::*;

/// Symmetric N×N cosine similarity matrix, stored as a packed upper triangle
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    // Row-major (i, j) for i < j
    upper: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.n);
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Score between rows `i` and `j`; the diagonal is 1
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({}, {}) out of bounds for {}", i, j, self.n);
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Less => self.upper[self.offset(i, j)],
            std::cmp::Ordering::Greater => self.upper[self.offset(j, i)],
        }
    }

    /// All `(i, j, score)` with `i < j`, ascending `i` then ascending `j`
    pub fn upper_pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.n;
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j, self.upper[self.offset(i, j)])))
    }

    /// Pairs scoring strictly above `threshold`, in canonical order
    pub fn pairs_above(&self, threshold: f64) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.upper_pairs().filter(move |&(_, _, score)| score > threshold)
    }
}

/// Compute the cosine similarity of every pair of unit-length vectors
pub fn pairwise_cosine(vectors: &[FeatureVector]) -> SimilarityMatrix {
    let n = vectors.len();
    if n == 0 {
        return SimilarityMatrix { n: 0, upper: Vec::new() };
    }

    let dims = vectors
        .iter()
        .filter_map(|v| v.indices().last())
        .max()
        .map_or(0, |&max| max as usize + 1);

    // Postings are pushed in document order and stay sorted by document
    let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); dims];
    for (doc, vector) in vectors.iter().enumerate() {
        for (dim, weight) in vector.iter() {
            postings[dim as usize].push((doc, weight));
        }
    }

    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut row = vec![0.0f64; n - i - 1];
            for (dim, weight) in vectors[i].iter() {
                let list = &postings[dim as usize];
                let start = list.partition_point(|&(doc, _)| doc <= i);
                for &(doc, other) in &list[start..] {
                    row[doc - i - 1] += weight * other;
                }
            }
            for score in &mut row {
                *score = score.clamp(0.0, 1.0);
            }
            row
        })
        .collect();

    SimilarityMatrix {
        n,
        upper: rows.into_iter().flatten().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfidfVectorizer;

    fn matrix_for(texts: &[&str]) -> SimilarityMatrix {
        pairwise_cosine(&TfidfVectorizer::new().fit_transform(texts))
    }

    #[test]
    fn test_empty() {
        let m = pairwise_cosine(&[]);
        assert!(m.is_empty());
        assert_eq!(m.upper_pairs().count(), 0);
    }

    #[test]
    fn test_single_vector() {
        let m = matrix_for(&["hello"]);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.upper_pairs().count(), 0);
    }

    #[test]
    fn test_identical_texts_score_one() {
        let m = matrix_for(&["the capital of italy is rome", "the capital of italy is rome"]);
        assert!((m.get(0, 1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let m = matrix_for(&["abc", "xyz"]);
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn test_symmetry_and_bounds() {
        let m = matrix_for(&[
            "what is the capital of italy",
            "whats the capital city of italy",
            "identify the main verb",
            "x",
        ]);
        for i in 0..m.len() {
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!((0.0..=1.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn test_matches_merge_join_dot() {
        let vectors = TfidfVectorizer::new().fit_transform(&[
            "the verb is sleeps",
            "the verb in the sentence is sleeps",
            "rome",
        ]);
        let m = pairwise_cosine(&vectors);
        for (i, j, score) in m.upper_pairs() {
            assert!((score - vectors[i].dot(&vectors[j])).abs() < 1e-12);
        }
    }

    #[test]
    fn test_canonical_pair_order() {
        let m = matrix_for(&["a", "b", "c", "d"]);
        let order: Vec<(usize, usize)> = m.upper_pairs().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_zero_vector_row() {
        let m = matrix_for(&["", "abc", "abc"]);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(0, 2), 0.0);
        assert!((m.get(1, 2) - 1.0).abs() < 1e-6);
    }
}
