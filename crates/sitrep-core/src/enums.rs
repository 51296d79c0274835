//! Fixed enums for sitrep records.
//!
//! `Priority` serializes with its display label (`"High"`, `"Block 1"`) because
//! that is the form downstream consumers show verbatim. Lower-case aliases are
//! accepted on input so configuration files can write `high` or `block1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of an initiative as annotated on the page.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Priority {
    #[serde(alias = "critical")]
    Critical,
    #[serde(alias = "high")]
    High,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
    #[serde(rename = "Block 1", alias = "block1", alias = "block_1")]
    Block1,
    #[serde(rename = "Block 2", alias = "block2", alias = "block_2")]
    Block2,
}

impl Priority {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Block1 => "Block 1",
            Self::Block2 => "Block 2",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SyncState
// ---------------------------------------------------------------------------

/// Outcome of the last persisted pipeline run.
///
/// ```text
/// running → completed
///         → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Running,
    Completed,
    Failed,
}

impl SyncState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn priority_serializes_display_label() {
        assert_eq!(
            serde_json::to_string(&Priority::Block1).unwrap(),
            "\"Block 1\""
        );
        assert_eq!(Priority::High.to_string(), "High");
    }

    #[test]
    fn priority_accepts_lowercase_aliases() {
        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, Priority::High);
        let p: Priority = serde_json::from_str("\"block2\"").unwrap();
        assert_eq!(p, Priority::Block2);
    }
}
