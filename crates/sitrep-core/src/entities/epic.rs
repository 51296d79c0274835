use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An epic row of the execution plan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Epic {
    pub external_key: String,
    /// Key of the parent initiative. Not checked against the extracted
    /// initiatives; it may be absent from them.
    pub initiative_key: Option<String>,
    pub title: String,
    pub status: String,
    /// One of the configured sizes, or empty.
    pub size: String,
    /// Sprint reference such as `SP-185`.
    pub sprint_ref: Option<String>,
    pub team: Option<String>,
    pub milestones: Option<String>,
    pub url: String,
}
