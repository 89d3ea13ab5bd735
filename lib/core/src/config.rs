use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default similarity cutoff
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// What a removal pass returns when no record carries text for the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCorpusPolicy {
    /// Return an empty dataset. Chained passes then see no records at all.
    #[default]
    Discard,
    /// Return the input dataset unchanged
    KeepDataset,
}

/// Settings for one duplicate-selection pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Pairs must score strictly above this value
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Apply the removal policy and return the filtered dataset
    #[serde(default)]
    pub remove_duplicates: bool,
    #[serde(default)]
    pub on_empty_corpus: EmptyCorpusPolicy,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            remove_duplicates: false,
            on_empty_corpus: EmptyCorpusPolicy::default(),
        }
    }
}

impl DedupConfig {
    #[inline]
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = remove;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_empty_corpus_policy(mut self, policy: EmptyCorpusPolicy) -> Self {
        self.on_empty_corpus = policy;
        self
    }

    /// Reject thresholds outside [0, 1] (NaN included)
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
