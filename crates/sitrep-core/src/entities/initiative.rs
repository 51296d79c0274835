use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Priority;

/// A prioritized initiative listed in the priorities table.
///
/// `title` and `status` stay empty until the tracker enrichment fills them;
/// every other field comes from the page and is never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Initiative {
    pub external_key: String,
    pub title: String,
    pub status: String,
    pub priority: Priority,
    /// Team label, `UNKNOWN` when the row carries none.
    pub team: String,
    /// Bracketed tag trailing the key cell, e.g. `[Delivery]`.
    pub category: Option<String>,
    pub kickoff_date: Option<String>,
    pub zone_approval: Option<String>,
    pub url: String,
}
