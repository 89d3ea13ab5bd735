//! # neardup
//!
//! Near-duplicate detection for instruction/input/output datasets.
//!
//! neardup compares the values of one field across all records using TF-IDF
//! weighted character n-grams (lengths 1 to 3) and cosine similarity. Pairs
//! scoring above a threshold are reported; for `input` and `output` fields
//! the later record of each pair can be removed, keeping the first record of
//! every duplicate cluster.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! neardup --input data.json --threshold 0.75 --remove-duplicates --output deduped.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use neardup::prelude::*;
//!
//! let dataset = vec![
//!     Record::new()
//!         .with_field("instruction", "What is the capital of Italy?")
//!         .with_field("input", "")
//!         .with_field("output", "The capital of Italy is Rome."),
//!     Record::new()
//!         .with_field("instruction", "What's the capital city of Italy?")
//!         .with_field("input", "")
//!         .with_field("output", "The capital city is Rome."),
//! ];
//!
//! let (filtered, pairs) = find_near_duplicates(&dataset, "output", 0.75, true).unwrap();
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(filtered.len(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! - `neardup-core` - Normalization, TF-IDF vectorization, pairwise cosine, duplicate selection
//! - `neardup-storage` - Dataset files (JSON arrays, JSON Lines)
//! - `neardup-report` - Multi-field driver and report rendering

// Re-export core types
pub use neardup_core::{
    find_near_duplicates, normalize, pairwise_cosine, removes_on, select,
    Dataset, DedupConfig, DuplicatePair, EmptyCorpusPolicy, FeatureVector,
    Record, Selection, SimilarityMatrix, TfidfVectorizer,
    Error, Result,
};

// Re-export storage
pub use neardup_storage::{load_dataset, save_dataset, DatasetFormat};

// Re-export reporting
pub use neardup_report::{render_json, render_text, FieldReport, ReportDriver, RunReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        find_near_duplicates, select,
        DedupConfig, DuplicatePair, EmptyCorpusPolicy,
        Record, Selection,
        Error, Result,
        ReportDriver, RunReport,
        load_dataset, save_dataset,
    };
}
