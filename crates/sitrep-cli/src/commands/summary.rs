use anyhow::{Context, bail};
use sitrep_config::SitrepConfig;
use sitrep_core::Summary;

use crate::cli::GlobalFlags;
use crate::output;
use crate::snapshot::SnapshotStore;

/// Handle `sitrep summary`.
pub fn handle(config: &SitrepConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = SnapshotStore::new(&config.general.snapshot_path);
    let snapshot = store.load().context("failed to read snapshot")?;
    let Some(report) = snapshot.report else {
        bail!(
            "no snapshot at {}; run `sitrep sync` first",
            store.path().display()
        );
    };

    let summary = Summary::from_report(&report.filter_by_teams(&flags.teams));
    output::emit(&summary, flags.format)
}
