//! Issue tracker (Jira) configuration.

use serde::{Deserialize, Serialize};

/// Largest chunk the batch lookup may send in one search.
pub const MAX_BATCH_SIZE: usize = 50;

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

const fn default_max_results() -> usize {
    100
}

fn default_search_path() -> String {
    "/rest/api/3/search/jql".to_string()
}

fn default_fallback_search_path() -> String {
    "/rest/api/2/search".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JiraConfig {
    /// Tracker base URL (e.g., `https://acme.atlassian.net`). When empty, the
    /// Confluence site root is used.
    #[serde(default)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Keys per batch-lookup search.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Result bound for query-backed sections.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Search endpoint path.
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Endpoint tried when `search_path` answers 404 or 410.
    #[serde(default = "default_fallback_search_path")]
    pub fallback_search_path: String,

    /// Custom field holding the GUT score of risks (e.g., `customfield_10450`).
    #[serde(default)]
    pub gut_score_field: String,

    /// Custom field holding the owning team of bugs.
    #[serde(default)]
    pub team_field: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
            max_results: default_max_results(),
            search_path: default_search_path(),
            fallback_search_path: default_fallback_search_path(),
            gut_score_field: String::new(),
            team_field: String::new(),
        }
    }
}

impl JiraConfig {
    pub fn gut_score_field(&self) -> Option<&str> {
        Some(self.gut_score_field.as_str()).filter(|f| !f.is_empty())
    }

    pub fn team_field(&self) -> Option<&str> {
        Some(self.team_field.as_str()).filter(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = JiraConfig::default();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.max_results, 100);
        assert_eq!(config.search_path, "/rest/api/3/search/jql");
        assert!(config.gut_score_field().is_none());
        assert!(config.team_field().is_none());
    }
}
