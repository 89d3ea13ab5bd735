// Dataset files: JSON arrays of objects or JSON Lines
use anyhow::{anyhow, Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use neardup_core::Record;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// On-disk layout of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A single JSON array of objects
    JsonArray,
    /// One JSON object per line
    JsonLines,
}

impl DatasetFormat {
    /// Pick the format from the file extension; `.jsonl` and `.ndjson`
    /// are line-delimited, everything else is a JSON array
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") => {
                DatasetFormat::JsonLines
            }
            _ => DatasetFormat::JsonArray,
        }
    }
}

/// Parse a dataset from text
pub fn parse_dataset(text: &str, format: DatasetFormat) -> Result<Vec<Record>> {
    match format {
        DatasetFormat::JsonArray => {
            serde_json::from_str(text).map_err(|e| anyhow!("Invalid JSON dataset: {}", e))
        }
        DatasetFormat::JsonLines => text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .map_err(|e| anyhow!("Invalid record on line {}: {}", n + 1, e))
            })
            .collect(),
    }
}

/// Load a dataset, choosing the format from the extension
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {:?}", path))?;
    let records = parse_dataset(&text, DatasetFormat::from_path(path))
        .with_context(|| format!("Failed to parse dataset {:?}", path))?;
    debug!(path = ?path, records = records.len(), "dataset loaded");
    Ok(records)
}

/// Render a dataset in the given format
pub fn render_dataset(records: &[Record], format: DatasetFormat) -> Result<String> {
    match format {
        DatasetFormat::JsonArray => Ok(serde_json::to_string_pretty(records)?),
        DatasetFormat::JsonLines => {
            let mut out = String::new();
            for record in records {
                out.push_str(&serde_json::to_string(record)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Write a dataset atomically, replacing any existing file
pub fn save_dataset<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    let data = render_dataset(records, DatasetFormat::from_path(path))?;

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(data.as_bytes()))
        .map_err(|e| anyhow!("Failed to write dataset {:?}: {}", path, e))?;

    debug!(path = ?path, records = records.len(), "dataset saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new()
                .with_field("instruction", "What is the capital of Italy?")
                .with_field("input", "")
                .with_field("output", "The capital of Italy is Rome."),
            Record::new()
                .with_field("instruction", "Identify the verb.")
                .with_field("input", "The cat sleeps.")
                .with_field("output", "sleeps"),
        ]
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DatasetFormat::from_path(Path::new("a.json")), DatasetFormat::JsonArray);
        assert_eq!(DatasetFormat::from_path(Path::new("a.jsonl")), DatasetFormat::JsonLines);
        assert_eq!(DatasetFormat::from_path(Path::new("a.NDJSON")), DatasetFormat::JsonLines);
        assert_eq!(DatasetFormat::from_path(Path::new("data")), DatasetFormat::JsonArray);
    }

    #[test]
    fn test_parse_json_lines_skips_blank_lines() {
        let text = "{\"output\": \"a\"}\n\n{\"output\": \"b\"}\n";
        let records = parse_dataset(text, DatasetFormat::JsonLines).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("output"), Some("b"));
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = "{\"output\": \"a\"}\nnot json\n";
        let err = parse_dataset(text, DatasetFormat::JsonLines).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_dataset("{\"output\": \"a\"}", DatasetFormat::JsonArray).is_err());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        save_dataset(&path, &sample()).unwrap();
        assert_eq!(load_dataset(&path).unwrap(), sample());

        // Overwrite with a smaller dataset
        save_dataset(&path, &sample()[..1]).unwrap();
        assert_eq!(load_dataset(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_load_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.jsonl");

        save_dataset(&path, &sample()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(load_dataset(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
    }
}
