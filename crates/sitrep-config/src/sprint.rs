//! Current-sprint heuristic settings.

use serde::{Deserialize, Serialize};

fn default_current_markers() -> Vec<String> {
    vec!["arrow_right".to_string()]
}

const fn default_proximity_window() -> usize {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SprintConfig {
    /// Marker identifiers that point at the current sprint.
    #[serde(default = "default_current_markers")]
    pub current_markers: Vec<String>,

    /// Characters before a sprint mention in which a marker counts.
    #[serde(default = "default_proximity_window")]
    pub proximity_window: usize,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            current_markers: default_current_markers(),
            proximity_window: default_proximity_window(),
        }
    }
}
