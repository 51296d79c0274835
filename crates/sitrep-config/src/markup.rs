//! Names of the macros and parameters the parser reads.

use serde::{Deserialize, Serialize};

fn default_issue_macro() -> String {
    "jira".to_string()
}

fn default_key_param() -> String {
    "key".to_string()
}

fn default_status_macro() -> String {
    "status".to_string()
}

fn default_title_param() -> String {
    "title".to_string()
}

fn default_query_param() -> String {
    "jqlQuery".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkupConfig {
    /// Macro embedding an issue reference or an issue query.
    #[serde(default = "default_issue_macro")]
    pub issue_macro: String,

    /// Parameter of `issue_macro` holding a single issue key.
    #[serde(default = "default_key_param")]
    pub key_param: String,

    /// Colored status-label macro used for team tags.
    #[serde(default = "default_status_macro")]
    pub status_macro: String,

    /// Parameter of `status_macro` holding the label text.
    #[serde(default = "default_title_param")]
    pub title_param: String,

    /// Parameter of `issue_macro` holding a stored query.
    #[serde(default = "default_query_param")]
    pub query_param: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            issue_macro: default_issue_macro(),
            key_param: default_key_param(),
            status_macro: default_status_macro(),
            title_param: default_title_param(),
            query_param: default_query_param(),
        }
    }
}
