//! Run diagnostics: non-fatal warnings and enrichment counters.
//!
//! Every stage below the orchestrator contains its own recoverable failures.
//! What it cannot deliver is recorded here as a [`Warning`] so callers can see
//! partial data for what it is.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable condition met during a run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A section's anchor pair was not found; its entity set is empty.
    MissingSection { section: String },
    /// A query-backed section was found but holds no stored query.
    MissingQuery { section: String },
    /// A tracker call failed; the stage produced no enrichment.
    EnrichmentUnavailable { stage: String, message: String },
}

impl Warning {
    #[must_use]
    pub fn missing_section(section: impl Into<String>) -> Self {
        Self::MissingSection {
            section: section.into(),
        }
    }

    #[must_use]
    pub fn missing_query(section: impl Into<String>) -> Self {
        Self::MissingQuery {
            section: section.into(),
        }
    }

    #[must_use]
    pub fn enrichment_unavailable(stage: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::EnrichmentUnavailable {
            stage: stage.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSection { section } => write!(f, "section '{section}' not found"),
            Self::MissingQuery { section } => {
                write!(f, "section '{section}' has no stored query")
            }
            Self::EnrichmentUnavailable { stage, message } => {
                write!(f, "enrichment unavailable for {stage}: {message}")
            }
        }
    }
}

/// Counters and warnings attached to a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Diagnostics {
    /// Initiatives that ended the run with a non-empty title.
    pub initiatives_titled: usize,
    /// Epics that ended the run with a non-empty title.
    pub epics_titled: usize,
    /// Batch-lookup chunks whose tracker call failed.
    pub failed_lookup_chunks: usize,
    pub warnings: Vec<Warning>,
}
