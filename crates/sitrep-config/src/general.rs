//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_snapshot_path() -> String {
    ".sitrep/snapshot.json".to_string()
}

fn default_report_path() -> String {
    ".sitrep/WORK-STATUS.md".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Where `sitrep sync` persists the last run.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Default output of `sitrep report`.
    #[serde(default = "default_report_path")]
    pub report_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            report_path: default_report_path(),
        }
    }
}
