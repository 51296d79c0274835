//! Extraction rules compiled from configuration.

use std::collections::BTreeMap;

use regex::Regex;
use sitrep_config::{MarkupConfig, SectionsConfig, SitrepConfig};
use sitrep_core::enums::Priority;

use crate::error::ParserError;

/// Everything the extractors consult, with key patterns compiled once.
#[derive(Debug, Clone)]
pub struct ParserRules {
    pub markup: MarkupConfig,
    pub sections: SectionsConfig,
    /// Anchored initiative key pattern (`^(?:…)$`).
    pub initiative_key: Regex,
    /// Anchored epic key pattern (`^(?:…)$`).
    pub epic_key: Regex,
    pub sizes: Vec<String>,
    pub teams: Vec<String>,
    pub priority_markers: BTreeMap<String, Priority>,
    pub current_markers: Vec<String>,
    pub proximity_window: usize,
    /// Base for `<base>/browse/<key>` links.
    pub browse_base_url: String,
    pub gut_score_field: Option<String>,
    pub team_field: Option<String>,
}

impl ParserRules {
    /// Compile the rules for a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::InvalidPattern`] when a configured key pattern
    /// is not a valid regex.
    pub fn from_config(config: &SitrepConfig) -> Result<Self, ParserError> {
        let vocabulary = &config.vocabulary;
        Ok(Self {
            markup: config.markup.clone(),
            sections: config.sections.clone(),
            initiative_key: anchored(
                "vocabulary.initiative_key_pattern",
                &vocabulary.initiative_key_pattern,
            )?,
            epic_key: anchored("vocabulary.epic_key_pattern", &vocabulary.epic_key_pattern)?,
            sizes: vocabulary.sizes.clone(),
            teams: vocabulary.teams.clone(),
            priority_markers: vocabulary.priority_markers.clone(),
            current_markers: config.sprint.current_markers.clone(),
            proximity_window: config.sprint.proximity_window,
            browse_base_url: config.browse_base_url(),
            gut_score_field: config.jira.gut_score_field().map(str::to_string),
            team_field: config.jira.team_field().map(str::to_string),
        })
    }

    /// Priority for an inline marker identifier, if it is in the table.
    #[must_use]
    pub fn priority_for(&self, identifier: &str) -> Option<Priority> {
        self.priority_markers.get(identifier).copied()
    }

    /// Whether `name` is one of the configured teams (ASCII case-insensitive).
    #[must_use]
    pub fn is_team(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.eq_ignore_ascii_case(name))
    }
}

fn anchored(name: &str, pattern: &str) -> Result<Regex, ParserError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| ParserError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn default_rules() -> ParserRules {
    let mut config = SitrepConfig::default();
    config.jira.base_url = "https://tracker.example.net".into();
    ParserRules::from_config(&config).expect("default rules compile")
}
