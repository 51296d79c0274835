//! # sitrep-config
//!
//! Layered configuration loading for sitrep using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SITREP_*` prefix, `__` as separator)
//! 2. An explicit `--config` file, when given
//! 3. Project-level `.sitrep/config.toml`
//! 4. User-level `~/.config/sitrep/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SITREP_JIRA__BATCH_SIZE` -> `jira.batch_size`,
//! `SITREP_ATLASSIAN__API_TOKEN` -> `atlassian.api_token`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use sitrep_config::SitrepConfig;
//!
//! let config = SitrepConfig::load_with_dotenv().expect("config");
//! if config.confluence.is_configured() {
//!     println!("page {}", config.confluence.page_id);
//! }
//! ```

mod atlassian;
mod confluence;
mod error;
mod general;
mod jira;
mod markup;
mod sections;
mod sprint;
mod vocabulary;

pub use atlassian::AtlassianConfig;
pub use confluence::ConfluenceConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use jira::{JiraConfig, MAX_BATCH_SIZE};
pub use markup::MarkupConfig;
pub use sections::{SectionAnchors, SectionsConfig};
pub use sprint::SprintConfig;
pub use vocabulary::VocabularyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MASK: &str = "********";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SitrepConfig {
    #[serde(default)]
    pub atlassian: AtlassianConfig,
    #[serde(default)]
    pub confluence: ConfluenceConfig,
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
    #[serde(default)]
    pub sections: SectionsConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub sprint: SprintConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SitrepConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration with an extra TOML file layered above the project
    /// file and below the environment.
    pub fn load_from(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the default figment provider chain.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the provider chain, optionally with an explicit file layer.
    pub fn figment_with(extra_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".sitrep/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = extra_file {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("SITREP_").split("__"))
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.jira.batch_size) {
            return Err(invalid(
                "jira.batch_size",
                format!("must be between 1 and {MAX_BATCH_SIZE}"),
            ));
        }
        if self.jira.max_results == 0 {
            return Err(invalid("jira.max_results", "must be at least 1"));
        }
        if self.sprint.proximity_window == 0 {
            return Err(invalid("sprint.proximity_window", "must be at least 1"));
        }
        for (name, anchors) in self.sections.named() {
            if anchors.is_empty() {
                return Err(invalid(
                    &format!("sections.{name}"),
                    "start and end anchors must be non-empty",
                ));
            }
        }
        if self.vocabulary.initiative_key_pattern.is_empty() {
            return Err(invalid("vocabulary.initiative_key_pattern", "must be non-empty"));
        }
        if self.vocabulary.epic_key_pattern.is_empty() {
            return Err(invalid("vocabulary.epic_key_pattern", "must be non-empty"));
        }
        Ok(())
    }

    /// Base URL used to derive `<base>/browse/<key>` links.
    ///
    /// Falls back to the Confluence site root, then to an empty string.
    pub fn browse_base_url(&self) -> String {
        if !self.jira.base_url.is_empty() {
            return self.jira.base_url.trim_end_matches('/').to_string();
        }
        self.confluence.site_root().unwrap_or_default().to_string()
    }

    /// Copy with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.atlassian.api_token.is_empty() {
            copy.atlassian.api_token = MASK.to_string();
        }
        copy
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sitrep").join("config.toml"))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
