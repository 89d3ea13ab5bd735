//! Multi-field driver
//!
//! Runs the duplicate selector once per field, in the order the fields
//! appear in the first record. The dataset is the accumulator of a fold:
//! with removal enabled each pass sees what the previous passes kept, so
//! duplicates are removed cumulatively field by field.

use anyhow::{Context, Result};
use neardup_core::{select, DedupConfig, DuplicatePair, Record};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one field's pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub field: String,
    /// Records entering this pass
    pub records_in: usize,
    /// Records leaving this pass
    pub records_out: usize,
    pub pairs: Vec<DuplicatePair>,
    /// Indices (into this pass's input) that were dropped
    pub removed: Vec<usize>,
}

impl FieldReport {
    #[inline]
    pub fn has_duplicates(&self) -> bool {
        !self.pairs.is_empty()
    }
}

/// Outcome of a full run over all fields
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Final dataset; the input unchanged when removal is off
    pub dataset: Vec<Record>,
    /// One report per analyzed field, in processing order
    pub fields: Vec<FieldReport>,
}

impl RunReport {
    /// Total number of reported pairs across fields
    pub fn pair_count(&self) -> usize {
        self.fields.iter().map(|f| f.pairs.len()).sum()
    }
}

/// Runs [`select`] over several fields of a dataset
#[derive(Debug, Clone, Default)]
pub struct ReportDriver {
    config: DedupConfig,
    fields: Option<Vec<String>>,
}

impl ReportDriver {
    pub fn new(config: DedupConfig) -> Self {
        Self { config, fields: None }
    }

    /// Analyze only these fields, in this order
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = if fields.is_empty() { None } else { Some(fields) };
        self
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Fields a run over `dataset` will analyze
    pub fn fields_for(&self, dataset: &[Record]) -> Vec<String> {
        match &self.fields {
            Some(fields) => fields.clone(),
            None => dataset
                .first()
                .map(|record| record.field_names().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    /// Analyze every field, threading the (possibly filtered) dataset forward
    pub fn run(&self, dataset: Vec<Record>) -> Result<RunReport> {
        let fields = self.fields_for(&dataset);
        if fields.is_empty() {
            info!("dataset has no fields to analyze");
            return Ok(RunReport { dataset, fields: Vec::new() });
        }

        let records_at_start = dataset.len();
        let (dataset, reports) = fields.iter().try_fold(
            (dataset, Vec::with_capacity(fields.len())),
            |(dataset, mut reports), field| -> Result<_> {
                let selection = select(&dataset, field, &self.config)
                    .with_context(|| format!("Duplicate search failed for field '{}'", field))?;

                let removed = if self.config.remove_duplicates {
                    selection.removed.iter().copied().collect()
                } else {
                    Vec::new()
                };
                debug!(
                    field = field.as_str(),
                    pairs = selection.pairs.len(),
                    removed = removed.len(),
                    "field analyzed"
                );

                reports.push(FieldReport {
                    field: field.clone(),
                    records_in: dataset.len(),
                    records_out: selection.dataset.len(),
                    pairs: selection.pairs,
                    removed,
                });
                Ok((selection.dataset, reports))
            },
        )?;

        info!(
            fields = reports.len(),
            records_in = records_at_start,
            records_out = dataset.len(),
            "duplicate search complete"
        );
        Ok(RunReport { dataset, fields: reports })
    }
}
