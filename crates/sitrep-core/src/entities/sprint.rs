use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A sprint announced on the page, e.g. `Sprint 185: January 26 - February 06`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Sprint {
    /// Display name, always `Sprint <number>`.
    pub name: String,
    pub number: u32,
    pub start_date: String,
    pub end_date: String,
    pub release_date: Option<String>,
    /// Heuristic flag; see the parser's current-sprint strategies.
    pub is_current: bool,
}
