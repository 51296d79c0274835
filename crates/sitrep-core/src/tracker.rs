//! Raw issue-tracker rows.
//!
//! The tracker client returns rows as an issue key plus an untyped field bag.
//! The parser's query-backed sections and the enrichment merge both read from
//! this shape, so it lives here rather than in either crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields requested by the batch lookup.
pub const LOOKUP_FIELDS: &[&str] = &["summary", "status", "priority", "assignee", "issuetype"];

/// One issue returned by a tracker search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackerRow {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl TrackerRow {
    /// A plain string field, e.g. `summary`.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// A string attribute of an object field, e.g. `status.name`.
    #[must_use]
    pub fn nested(&self, field: &str, attr: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|v| v.get(attr))
            .and_then(Value::as_str)
    }

    /// A numeric field. Numeric strings are accepted.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// A label-like field: a string, an option object (`value` or `name`),
    /// or an array of either.
    #[must_use]
    pub fn labels(&self, field: &str) -> Vec<String> {
        fn label(value: &Value) -> Option<String> {
            match value {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map
                    .get("value")
                    .or_else(|| map.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            }
        }

        match self.fields.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(label).collect(),
            Some(value) => label(value).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

/// Title/status and companions for one looked-up key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueSummary {
    pub title: String,
    pub status: String,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub issue_type: Option<String>,
}

impl From<&TrackerRow> for IssueSummary {
    fn from(row: &TrackerRow) -> Self {
        Self {
            title: row.text("summary").unwrap_or_default().to_string(),
            status: row.nested("status", "name").unwrap_or_default().to_string(),
            priority: row.nested("priority", "name").map(str::to_string),
            assignee: row.nested("assignee", "displayName").map(str::to_string),
            issue_type: row.nested("issuetype", "name").map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row() -> TrackerRow {
        serde_json::from_value(serde_json::json!({
            "key": "BEESCAD-1",
            "fields": {
                "summary": "Fix checkout",
                "status": { "name": "In Progress" },
                "priority": { "name": "High" },
                "assignee": null,
                "issuetype": { "name": "Bug" },
                "customfield_1": "12",
                "labels": ["catalog", "urgent"],
                "customfield_2": { "value": "CMS" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn summary_from_row() {
        let summary = IssueSummary::from(&row());
        assert_eq!(
            summary,
            IssueSummary {
                title: "Fix checkout".into(),
                status: "In Progress".into(),
                priority: Some("High".into()),
                assignee: None,
                issue_type: Some("Bug".into()),
            }
        );
    }

    #[test]
    fn number_accepts_numeric_strings() {
        assert_eq!(row().number("customfield_1"), Some(12.0));
        assert_eq!(row().number("summary"), None);
        assert_eq!(row().number("missing"), None);
    }

    #[test]
    fn labels_handle_arrays_and_option_objects() {
        assert_eq!(row().labels("labels"), vec!["catalog", "urgent"]);
        assert_eq!(row().labels("customfield_2"), vec!["CMS"]);
        assert!(row().labels("assignee").is_empty());
    }

    #[test]
    fn row_without_fields_deserializes() {
        let row: TrackerRow = serde_json::from_str(r#"{"key":"X-1"}"#).unwrap();
        assert!(row.fields.is_empty());
    }
}
