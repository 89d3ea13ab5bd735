//! # neardup Core
//!
//! Core library for the neardup near-duplicate detector.
//!
//! This crate provides the duplicate-detection engine:
//!
//! - [`normalize()`] - Lowercasing and punctuation stripping
//! - [`TfidfVectorizer`] - TF-IDF over character n-grams (1 to 3 by default)
//! - [`pairwise_cosine()`] - Sparse pairwise cosine similarity
//! - [`select()`] - Threshold scan and the keep/remove policy for one field
//!
//! ## Example
//!
//! ```rust
//! use neardup_core::{select, DedupConfig, Record};
//!
//! let dataset = vec![
//!     Record::new()
//!         .with_field("instruction", "What is the capital of Italy?")
//!         .with_field("output", "The capital of Italy is Rome."),
//!     Record::new()
//!         .with_field("instruction", "What's the capital city of Italy?")
//!         .with_field("output", "The capital city is Rome."),
//! ];
//!
//! let config = DedupConfig::default().with_remove_duplicates(true);
//! let selection = select(&dataset, "output", &config).unwrap();
//!
//! assert_eq!(selection.pairs.len(), 1);
//! assert_eq!(selection.dataset.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod record;
pub mod selector;
pub mod similarity;
pub mod vectorizer;

pub use config::{DedupConfig, EmptyCorpusPolicy, DEFAULT_THRESHOLD};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use record::{Dataset, Record};
pub use selector::{find_near_duplicates, removes_on, select, DuplicatePair, Selection, REMOVABLE_FIELDS};
pub use similarity::{pairwise_cosine, SimilarityMatrix};
pub use vectorizer::{FeatureVector, TfidfVectorizer, DEFAULT_NGRAM_RANGE};
