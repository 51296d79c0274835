use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::Utc;
use sitrep_config::SitrepConfig;
use tracing::info;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::snapshot::SnapshotStore;
use crate::work_status;

/// Handle `sitrep report`.
pub fn handle(
    args: &ReportArgs,
    config: &SitrepConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = SnapshotStore::new(&config.general.snapshot_path);
    let Some(report) = store.load().context("failed to read snapshot")?.report else {
        bail!(
            "no snapshot at {}; run `sitrep sync` first",
            store.path().display()
        );
    };

    let markdown = work_status::render(&report.filter_by_teams(&flags.teams), Utc::now());
    let target = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.general.report_path));

    if target == Path::new("-") {
        print!("{markdown}");
        return Ok(());
    }
    write_report(&target, &markdown)?;
    info!(path = %target.display(), "work-status report written");
    if !flags.quiet {
        eprintln!("wrote {}", target.display());
    }
    Ok(())
}

fn write_report(path: &Path, markdown: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, markdown).with_context(|| format!("failed to write {}", path.display()))
}
