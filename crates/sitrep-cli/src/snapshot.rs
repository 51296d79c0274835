//! Persisted snapshot of the last successful run, plus the last sync status.
//!
//! The snapshot is one JSON file. Each successful sync replaces the stored
//! report wholesale; a failed sync only rewrites the status. Writes go to a
//! temporary file in the same directory and are renamed into place.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sitrep_core::SituationReport;
use sitrep_core::enums::SyncState;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot access snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Status of the most recent sync attempt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncStatus {
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub state: SyncState,
    pub items_synced: usize,
    pub error_message: Option<String>,
}

impl SyncStatus {
    #[must_use]
    pub const fn running(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            completed_at: None,
            state: SyncState::Running,
            items_synced: 0,
            error_message: None,
        }
    }
}

/// The on-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Snapshot {
    /// Report of the last successful sync.
    pub report: Option<SituationReport>,
    pub last_sync: Option<SyncStatus>,
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is an empty snapshot.
    pub fn load(&self) -> Result<Snapshot, SnapshotError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Snapshot::default());
            }
            Err(source) => return Err(self.io(source)),
        };
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Record that a sync started. The stored report is kept.
    pub fn mark_running(&self, started_at: DateTime<Utc>) -> Result<(), SnapshotError> {
        let mut snapshot = self.load()?;
        snapshot.last_sync = Some(SyncStatus::running(started_at));
        self.write(&snapshot)
    }

    /// Replace the stored report and mark the sync completed.
    pub fn save_report(
        &self,
        report: &SituationReport,
        started_at: DateTime<Utc>,
    ) -> Result<(), SnapshotError> {
        let snapshot = Snapshot {
            report: Some(report.clone()),
            last_sync: Some(SyncStatus {
                started_at,
                completed_at: Some(Utc::now()),
                state: SyncState::Completed,
                items_synced: report.item_count(),
                error_message: None,
            }),
        };
        self.write(&snapshot)
    }

    /// Mark the sync failed. The stored report is kept.
    pub fn record_failure(
        &self,
        started_at: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Result<(), SnapshotError> {
        let mut snapshot = self.load()?;
        snapshot.last_sync = Some(SyncStatus {
            started_at,
            completed_at: Some(Utc::now()),
            state: SyncState::Failed,
            items_synced: 0,
            error_message: Some(message.into()),
        });
        self.write(&snapshot)
    }

    fn write(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|source| self.io(source))?;

        let json = serde_json::to_vec_pretty(snapshot).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|source| self.io(source))?;
        tmp.write_all(&json).map_err(|source| self.io(source))?;
        tmp.persist(&self.path)
            .map_err(|error| self.io(error.error))?;
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
