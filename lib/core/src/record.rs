//! Dataset records
//!
//! A [`Record`] is an ordered mapping from field name to string value.
//! Field order is kept as inserted because the report driver walks the
//! fields of the first record in order.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A dataset is an ordered sequence of records
pub type Dataset = Vec<Record>;

/// One key-value record, e.g. an instruction/input/output triple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Set a field, replacing the value in place if the name already exists
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Value of a field, `None` when the record does not carry it
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a field with a missing field read as the empty string
    #[inline]
    pub fn value_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "field '{}' holds a nested value; only scalar values are supported",
                        name
                    )));
                }
            };
            record.insert(name, text);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_is_insertion_order() {
        let record = Record::new()
            .with_field("instruction", "a")
            .with_field("input", "")
            .with_field("output", "b");
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["instruction", "input", "output"]);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut record = Record::new().with_field("output", "old");
        record.insert("output", "new");
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("output"), Some("new"));
    }

    #[test]
    fn test_missing_field_reads_empty() {
        let record = Record::new().with_field("instruction", "hi");
        assert_eq!(record.get("input"), None);
        assert_eq!(record.value_or_empty("input"), "");
    }

    #[test]
    fn test_serde_keeps_order_and_stringifies_scalars() {
        let json = r#"{"output": "x", "id": 7, "flag": true, "input": null}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["output", "id", "flag", "input"]);
        assert_eq!(record.get("id"), Some("7"));
        assert_eq!(record.get("flag"), Some("true"));
        assert_eq!(record.get("input"), Some(""));

        let back = serde_json::to_string(&record).unwrap();
        assert_eq!(back, r#"{"output":"x","id":"7","flag":"true","input":""}"#);
    }

    #[test]
    fn test_nested_value_rejected() {
        let json = r#"{"output": ["a", "b"]}"#;
        let err = serde_json::from_str::<Record>(json).unwrap_err();
        assert!(err.to_string().contains("nested value"));
    }
}
