//! Fixed vocabularies: key patterns, sizes, teams, and priority markers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sitrep_core::enums::Priority;

fn default_initiative_key_pattern() -> String {
    r"BEESIP-\d+".to_string()
}

fn default_epic_key_pattern() -> String {
    r"BEESCAD-\d+".to_string()
}

fn default_sizes() -> Vec<String> {
    ["XXS", "XS", "S", "M", "L", "XL", "XXL"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_teams() -> Vec<String> {
    ["CATALOG", "CONTENT", "CMS", "DAM", "PIM", "COMPANY"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_priority_markers() -> BTreeMap<String, Priority> {
    [
        ("rotating_light", Priority::Critical),
        ("red_circle", Priority::High),
        ("red-star", Priority::High),
        ("arrow_up", Priority::High),
        ("yellow_circle", Priority::Medium),
        ("yellow-star", Priority::Medium),
        ("green_circle", Priority::Low),
        ("green-star", Priority::Low),
        ("arrow_down", Priority::Low),
        ("one", Priority::Block1),
        ("two", Priority::Block2),
    ]
    .into_iter()
    .map(|(marker, priority)| (marker.to_string(), priority))
    .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VocabularyConfig {
    /// Regex an initiative key must match in full.
    #[serde(default = "default_initiative_key_pattern")]
    pub initiative_key_pattern: String,

    /// Regex an epic key must match in full.
    #[serde(default = "default_epic_key_pattern")]
    pub epic_key_pattern: String,

    /// Accepted epic sizes.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<String>,

    /// Teams of interest. Preferred when a row carries several status labels,
    /// and the default set for `--teams` filtering.
    #[serde(default = "default_teams")]
    pub teams: Vec<String>,

    /// Inline marker (emoticon name or emoji shortname) → priority.
    #[serde(default = "default_priority_markers")]
    pub priority_markers: BTreeMap<String, Priority>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            initiative_key_pattern: default_initiative_key_pattern(),
            epic_key_pattern: default_epic_key_pattern(),
            sizes: default_sizes(),
            teams: default_teams(),
            priority_markers: default_priority_markers(),
        }
    }
}
