//! Duplicate selection for one field of a dataset
//!
//! Runs normalization, vectorization and pairwise similarity over the
//! non-empty values of a field, reports every pair above the threshold and
//! marks the later record of each pair for removal when the field is one
//! whose duplicates are redundant (`input` / `output`). Duplicated
//! instructions are reported but never removed.

use crate::config::{DedupConfig, EmptyCorpusPolicy};
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::record::Record;
use crate::similarity::pairwise_cosine;
use crate::vectorizer::TfidfVectorizer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Fields whose duplicates get removed
pub const REMOVABLE_FIELDS: [&str; 2] = ["input", "output"];

/// Whether a pass over `field` marks records for removal
#[inline]
pub fn removes_on(field: &str) -> bool {
    REMOVABLE_FIELDS.contains(&field)
}

/// Two records whose field values scored above the threshold.
/// `first_index < second_index`; both index into the pass's input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    pub first_index: usize,
    pub second_index: usize,
    pub first: Record,
    pub second: Record,
    pub score: f64,
}

/// Result of one selection pass
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Filtered dataset (the input unchanged when removal is off)
    pub dataset: Vec<Record>,
    /// Reported pairs in ascending (i, j) order
    pub pairs: Vec<DuplicatePair>,
    /// Input indices marked for removal, whether or not removal was applied
    pub removed: BTreeSet<usize>,
}

fn check_field(dataset: &[Record], field: &str) -> Result<()> {
    if field.is_empty() || (!dataset.is_empty() && !dataset.iter().any(|r| r.contains(field))) {
        return Err(Error::UnknownField(field.to_string()));
    }
    Ok(())
}

/// Find near-duplicate values of `field` across `dataset`.
///
/// Records that lack the field or hold an empty value take no part in the
/// pass and are never removed by it.
pub fn select(dataset: &[Record], field: &str, config: &DedupConfig) -> Result<Selection> {
    config.validate()?;
    check_field(dataset, field)?;

    // (input index, normalized text)
    let entries: Vec<(usize, String)> = dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.value_or_empty(field).is_empty())
        .map(|(idx, record)| (idx, normalize(record.value_or_empty(field))))
        .collect();

    if entries.iter().all(|(_, text)| text.is_empty()) {
        return Ok(empty_corpus(dataset, field, config));
    }

    let texts: Vec<&str> = entries.iter().map(|(_, text)| text.as_str()).collect();
    let mut vectorizer = TfidfVectorizer::new();
    let vectors = vectorizer.fit_transform(&texts);
    let matrix = pairwise_cosine(&vectors);

    let removing = removes_on(field);
    let mut pairs = Vec::new();
    let mut removed = BTreeSet::new();

    for (i, j, score) in matrix.pairs_above(config.threshold) {
        let (first_index, second_index) = (entries[i].0, entries[j].0);
        let first = &dataset[first_index];
        let second = &dataset[second_index];

        if first.value_or_empty(field).chars().count() <= 1
            || second.value_or_empty(field).chars().count() <= 1
        {
            continue;
        }

        pairs.push(DuplicatePair {
            first_index,
            second_index,
            first: first.clone(),
            second: second.clone(),
            score,
        });
        if removing {
            removed.insert(second_index);
        }
    }

    debug!(
        field,
        records = dataset.len(),
        texts = texts.len(),
        vocabulary = vectorizer.vocabulary_len(),
        pairs = pairs.len(),
        marked = removed.len(),
        "duplicate scan finished"
    );

    let dataset = if config.remove_duplicates {
        dataset
            .iter()
            .enumerate()
            .filter(|(idx, _)| !removed.contains(idx))
            .map(|(_, record)| record.clone())
            .collect()
    } else {
        dataset.to_vec()
    };

    Ok(Selection { dataset, pairs, removed })
}

fn empty_corpus(dataset: &[Record], field: &str, config: &DedupConfig) -> Selection {
    let dataset = match (config.remove_duplicates, config.on_empty_corpus) {
        (true, EmptyCorpusPolicy::Discard) => {
            if !dataset.is_empty() {
                warn!(
                    field,
                    records = dataset.len(),
                    "no text to compare for field; discarding dataset"
                );
            }
            Vec::new()
        }
        _ => dataset.to_vec(),
    };

    Selection {
        dataset,
        pairs: Vec::new(),
        removed: BTreeSet::new(),
    }
}

/// Shorthand for [`select`] returning `(filtered dataset, pairs)`
pub fn find_near_duplicates(
    dataset: &[Record],
    field: &str,
    threshold: f64,
    remove_duplicates: bool,
) -> Result<(Vec<Record>, Vec<DuplicatePair>)> {
    let config = DedupConfig::default()
        .with_threshold(threshold)
        .with_remove_duplicates(remove_duplicates);
    let selection = select(dataset, field, &config)?;
    Ok((selection.dataset, selection.pairs))
}
