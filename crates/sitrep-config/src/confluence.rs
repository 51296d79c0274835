//! Confluence page source configuration.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfluenceConfig {
    /// Wiki base URL including the `/wiki` suffix on Atlassian Cloud
    /// (e.g., `https://acme.atlassian.net/wiki`).
    #[serde(default)]
    pub base_url: String,

    /// Numeric id of the situation page.
    #[serde(default)]
    pub page_id: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_id: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ConfluenceConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.page_id.is_empty()
    }

    /// Site root without the `/wiki` suffix, which is where the tracker lives
    /// on Atlassian Cloud.
    pub fn site_root(&self) -> Option<&str> {
        let trimmed = self.base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.strip_suffix("/wiki").unwrap_or(trimmed))
    }
}
