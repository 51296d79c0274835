use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A risk or blocker returned by the risks section's stored query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Risk {
    pub external_key: String,
    pub title: String,
    pub assignee: String,
    pub status: String,
    pub priority: String,
    pub gut_score: i64,
    pub url: String,
}
