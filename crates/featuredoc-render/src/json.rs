//! JSON rendering of scenario records.
//!
//! The output has the shape
//! `{"title": ..., "scenarios": [{"index", "tags", "tag_list", "name", "steps"}]}`
//! with `index` counting from 1, matching the row numbers of the document.

use std::io::Write;

use serde::Serialize;

use crate::title::DocumentTitle;
use featuredoc_extract::ScenarioRecord;

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    scenarios: Vec<JsonScenario<'a>>,
}

#[derive(Serialize)]
struct JsonScenario<'a> {
    index: usize,
    tags: &'a str,
    tag_list: Vec<&'a str>,
    name: &'a str,
    steps: &'a [String],
}

impl<'a> JsonReport<'a> {
    fn new(title: &'a DocumentTitle, records: &'a [ScenarioRecord]) -> Self {
        let scenarios = records
            .iter()
            .zip(1_usize..)
            .map(|(record, index)| JsonScenario {
                index,
                tags: record.tags(),
                tag_list: record.tag_list(),
                name: record.name(),
                steps: record.steps(),
            })
            .collect();
        Self {
            title: title.as_str(),
            scenarios,
        }
    }
}

/// Serialize the records into the supplied writer.
///
/// # Examples
/// ```
/// use featuredoc_render::{DocumentTitle, ScenarioRecord, json};
///
/// let records = vec![ScenarioRecord::new("@a @b", "Login", vec!["Given x".into()])];
/// let mut buffer = Vec::new();
/// json::write(&mut buffer, &DocumentTitle::new("login"), &records).unwrap();
/// let output = String::from_utf8(buffer).unwrap();
/// assert!(output.contains("\"tag_list\":[\"@a\",\"@b\"]"));
/// ```
///
/// # Errors
/// Returns an error when serialization or writing fails.
pub fn write<W: Write>(
    writer: &mut W,
    title: &DocumentTitle,
    records: &[ScenarioRecord],
) -> serde_json::Result<()> {
    serde_json::to_writer(writer, &JsonReport::new(title, records))
}

/// Produce a pretty-printed JSON string for the records.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_string_pretty(
    title: &DocumentTitle,
    records: &[ScenarioRecord],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(title, records))
}

/// Produce a JSON value for the records, suitable for embedding in responses.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_value(
    title: &DocumentTitle,
    records: &[ScenarioRecord],
) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(JsonReport::new(title, records))
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_numbers_scenarios_from_one() {
        let records = vec![
            ScenarioRecord::new("@smoke", "First", vec!["s1".to_owned()]),
            ScenarioRecord::new("", "Second", vec!["s2".to_owned(), "s3".to_owned()]),
        ];
        let value = to_value(&DocumentTitle::new("demo"), &records).expect("serializes");
        assert_eq!(
            value,
            json!({
                "title": "demo",
                "scenarios": [
                    {"index": 1, "tags": "@smoke", "tag_list": ["@smoke"], "name": "First", "steps": ["s1"]},
                    {"index": 2, "tags": "", "tag_list": [], "name": "Second", "steps": ["s2", "s3"]},
                ]
            })
        );
    }

    #[test]
    fn empty_records_render_empty_list() {
        let output = to_string_pretty(&DocumentTitle::new("none"), &[]).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(value, json!({"title": "none", "scenarios": []}));
    }
}
