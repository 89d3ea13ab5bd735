//! Report renderers: the plain-text console layout and a JSON summary

use crate::driver::{FieldReport, RunReport};
use anyhow::Result;
use serde::Serialize;
use std::fmt;

const SEPARATOR_WIDTH: usize = 50;

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        writeln!(
            f,
            "\n\n{}\nSearching '{}' for duplicates...\n{}",
            separator, self.field, separator
        )?;

        if self.pairs.is_empty() {
            return writeln!(f, "No duplicates found");
        }
        for pair in &self.pairs {
            writeln!(
                f,
                "Duplicate pair found with similarity {:.2}:\n1. {}\n2. {}\n",
                pair.score,
                pair.first.value_or_empty(&self.field),
                pair.second.value_or_empty(&self.field),
            )?;
        }
        Ok(())
    }
}

/// Render every field report in processing order
pub fn render_text(report: &RunReport) -> String {
    report.fields.iter().map(|field| field.to_string()).collect()
}

#[derive(Debug, Serialize)]
struct JsonPair<'a> {
    first_index: usize,
    second_index: usize,
    score: f64,
    first: &'a str,
    second: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonField<'a> {
    field: &'a str,
    records_in: usize,
    records_out: usize,
    pairs: Vec<JsonPair<'a>>,
    removed: &'a [usize],
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    records_out: usize,
    fields: Vec<JsonField<'a>>,
}

/// Summarize a run as pretty JSON: per field, the pair texts, scores and
/// removed indices
pub fn render_json(report: &RunReport) -> Result<String> {
    let fields = report
        .fields
        .iter()
        .map(|field| JsonField {
            field: &field.field,
            records_in: field.records_in,
            records_out: field.records_out,
            pairs: field
                .pairs
                .iter()
                .map(|pair| JsonPair {
                    first_index: pair.first_index,
                    second_index: pair.second_index,
                    score: pair.score,
                    first: pair.first.value_or_empty(&field.field),
                    second: pair.second.value_or_empty(&field.field),
                })
                .collect(),
            removed: &field.removed,
        })
        .collect();

    let summary = JsonReport {
        records_out: report.dataset.len(),
        fields,
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neardup_core::{DuplicatePair, Record};

    fn pair(score: f64) -> DuplicatePair {
        DuplicatePair {
            first_index: 0,
            second_index: 1,
            first: Record::new().with_field("output", "The capital of Italy is Rome."),
            second: Record::new().with_field("output", "The capital city is Rome."),
            score,
        }
    }

    fn field(pairs: Vec<DuplicatePair>) -> FieldReport {
        FieldReport {
            field: "output".to_string(),
            records_in: 2,
            records_out: 2,
            pairs,
            removed: Vec::new(),
        }
    }

    #[test]
    fn test_no_duplicates_layout() {
        let sep = "=".repeat(50);
        let expected = format!(
            "\n\n{}\nSearching 'output' for duplicates...\n{}\nNo duplicates found\n",
            sep, sep
        );
        assert_eq!(field(Vec::new()).to_string(), expected);
    }

    #[test]
    fn test_pair_layout() {
        let text = field(vec![pair(0.8271)]).to_string();
        assert!(text.ends_with(
            "Duplicate pair found with similarity 0.83:\n\
             1. The capital of Italy is Rome.\n\
             2. The capital city is Rome.\n\n"
        ));
    }

    #[test]
    fn test_render_text_concatenates_fields() {
        let report = RunReport {
            dataset: Vec::new(),
            fields: vec![field(Vec::new()), field(vec![pair(0.9)])],
        };
        let text = render_text(&report);
        assert_eq!(text.matches("Searching 'output'").count(), 2);
        assert!(text.contains("similarity 0.90"));
    }

    #[test]
    fn test_render_json() {
        let report = RunReport {
            dataset: vec![Record::new()],
            fields: vec![FieldReport {
                removed: vec![1],
                records_out: 1,
                ..field(vec![pair(0.9)])
            }],
        };
        let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(json["records_out"], 1);
        assert_eq!(json["fields"][0]["field"], "output");
        assert_eq!(json["fields"][0]["removed"][0], 1);
        assert_eq!(json["fields"][0]["pairs"][0]["second"], "The capital city is Rome.");
        assert_eq!(json["fields"][0]["pairs"][0]["second_index"], 1);
    }
}
