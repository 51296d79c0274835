use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A bug returned by the bugs section's stored query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Bug {
    pub external_key: String,
    pub title: String,
    pub priority: String,
    pub status: String,
    pub team: String,
    pub url: String,
}
