//! TF-IDF vectorization over character n-grams
//!
//! The vocabulary is fitted on exactly the texts passed to
//! [`TfidfVectorizer::fit_transform`]. Dimensions are assigned in
//! lexicographic order of the n-grams, so identical inputs always produce
//! identical vectors.
//!
//! Weighting:
//! - term frequency: raw n-gram count in the text
//! - inverse document frequency: `ln((1 + n) / (1 + df)) + 1`
//! - every vector is L2-normalized, so cosine similarity is a dot product

use crate::error::{Error, Result};
use crate::normalize::collapse_whitespace;
use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default n-gram lengths: unigrams through trigrams
pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (1, 3);

/// Sparse feature vector with strictly ascending dimension indices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    indices: Vec<u32>,
    weights: Vec<f64>,
}

impl FeatureVector {
    /// Build from `(dimension, weight)` entries in any order.
    /// Entries sharing a dimension are summed and zero weights are dropped.
    #[must_use]
    pub fn from_entries(mut entries: Vec<(u32, f64)>) -> Self {
        entries.sort_unstable_by_key(|&(idx, _)| idx);

        let mut indices: Vec<u32> = Vec::with_capacity(entries.len());
        let mut weights: Vec<f64> = Vec::with_capacity(entries.len());
        for (idx, w) in entries {
            if indices.last() == Some(&idx) {
                if let Some(last) = weights.last_mut() {
                    *last += w;
                }
            } else {
                indices.push(idx);
                weights.push(w);
            }
        }

        let (indices, weights): (Vec<u32>, Vec<f64>) = indices
            .into_iter()
            .zip(weights)
            .filter(|&(_, w)| w != 0.0)
            .unzip();
        Self { indices, weights }
    }

    /// Number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.indices.iter().copied().zip(self.weights.iter().copied())
    }

    /// Weight at a dimension, zero if absent
    pub fn get(&self, index: u32) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.weights[pos],
            Err(_) => 0.0,
        }
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length. The zero vector stays zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for w in &mut self.weights {
                *w /= norm;
            }
        }
    }

    /// Sparse dot product via a merge join over the sorted indices
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                Ordering::Less => a += 1,
                Ordering::Greater => b += 1,
                Ordering::Equal => {
                    sum += self.weights[a] * other.weights[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }
}

/// Character n-gram TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    lowercase: bool,
    vocabulary: AHashMap<String, u32>,
    feature_names: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            ngram_range: DEFAULT_NGRAM_RANGE,
            lowercase: true,
            vocabulary: AHashMap::new(),
            feature_names: Vec::new(),
            idf: Vec::new(),
        }
    }

    /// Use n-grams of length `min..=max`
    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Result<Self> {
        if min == 0 || min > max {
            return Err(Error::InvalidConfig(format!(
                "n-gram range ({}, {}) must satisfy 1 <= min <= max",
                min, max
            )));
        }
        self.ngram_range = (min, max);
        Ok(self)
    }

    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    #[inline]
    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    /// Number of dimensions of the last fit
    #[inline]
    pub fn vocabulary_len(&self) -> usize {
        self.feature_names.len()
    }

    /// Dimension assigned to an n-gram by the last fit
    #[inline]
    pub fn feature_index(&self, ngram: &str) -> Option<u32> {
        self.vocabulary.get(ngram).copied()
    }

    /// N-grams of the last fit, indexed by dimension
    #[inline]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Inverse document frequencies of the last fit, indexed by dimension
    #[inline]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Character n-grams of a text, after lowercasing (if enabled) and
    /// whitespace-run collapsing
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let prepared = if self.lowercase {
            collapse_whitespace(&text.to_lowercase())
        } else {
            collapse_whitespace(text)
        };
        char_ngrams(&prepared, self.ngram_range.0, self.ngram_range.1)
    }

    /// Fit the vocabulary and IDF weights on `texts`, then return one
    /// unit-length vector per text in input order.
    pub fn fit_transform<S>(&mut self, texts: &[S]) -> Vec<FeatureVector>
    where
        S: AsRef<str> + Sync,
    {
        self.vocabulary.clear();
        self.feature_names.clear();
        self.idf.clear();

        if texts.is_empty() {
            return Vec::new();
        }

        let counts: Vec<AHashMap<String, u32>> = texts
            .par_iter()
            .map(|text| term_counts(self.analyze(text.as_ref())))
            .collect();

        let mut doc_freq: AHashMap<&str, u32> = AHashMap::new();
        for doc in &counts {
            for ngram in doc.keys() {
                *doc_freq.entry(ngram.as_str()).or_insert(0) += 1;
            }
        }

        let mut names: Vec<&str> = doc_freq.keys().copied().collect();
        names.sort_unstable();

        let n_docs = counts.len() as f64;
        self.idf = names
            .iter()
            .map(|name| {
                let df = f64::from(doc_freq[name]);
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = names
            .iter()
            .enumerate()
            .map(|(idx, name)| ((*name).to_string(), idx as u32))
            .collect();
        self.feature_names = names.into_iter().map(str::to_string).collect();

        counts
            .par_iter()
            .map(|doc| {
                let entries = doc
                    .iter()
                    .map(|(ngram, &tf)| {
                        let idx = self.vocabulary[ngram.as_str()];
                        (idx, f64::from(tf) * self.idf[idx as usize])
                    })
                    .collect();
                let mut vector = FeatureVector::from_entries(entries);
                vector.normalize();
                vector
            })
            .collect()
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Contiguous character n-grams of length `min..=max`, shortest first
pub fn char_ngrams(text: &str, min: usize, max: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut ngrams = Vec::new();
    for n in min..=max.min(chars.len()) {
        ngrams.extend(chars.windows(n).map(|w| w.iter().collect::<String>()));
    }
    ngrams
}

fn term_counts(ngrams: Vec<String>) -> AHashMap<String, u32> {
    let mut counts = AHashMap::new();
    for ngram in ngrams {
        *counts.entry(ngram).or_insert(0) += 1;
    }
    counts
}
