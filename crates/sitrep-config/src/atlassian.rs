//! Shared Atlassian Cloud credentials.

use serde::{Deserialize, Serialize};

/// Basic-auth credentials used by both the page source and the tracker.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AtlassianConfig {
    /// Account email.
    #[serde(default)]
    pub email: String,

    /// API token minted at `id.atlassian.com`.
    #[serde(default)]
    pub api_token: String,
}

impl AtlassianConfig {
    pub fn is_configured(&self) -> bool {
        !self.email.is_empty() && !self.api_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_both_fields() {
        let mut config = AtlassianConfig {
            email: "dev@example.com".into(),
            ..AtlassianConfig::default()
        };
        assert!(!config.is_configured());
        config.api_token = "token".into();
        assert!(config.is_configured());
    }
}
