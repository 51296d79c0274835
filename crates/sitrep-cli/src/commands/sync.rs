use anyhow::Context;
use chrono::Utc;
use sitrep_client::{
    ClientError, ConfluenceClient, DocumentSource, FileSource, IssueTracker, JiraClient,
};
use sitrep_config::SitrepConfig;
use sitrep_parser::SituationParser;
use tracing::{info, warn};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SyncArgs;
use crate::output;
use crate::pipeline::Pipeline;
use crate::snapshot::SnapshotStore;

/// Handle `sitrep sync`: fetch, parse, enrich and persist one snapshot.
///
/// The stored report is only replaced by a successful run. A failed run
/// records its error in the sync status and keeps the previous report.
pub async fn handle(
    args: &SyncArgs,
    config: &SitrepConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let parser = SituationParser::from_config(config).context("invalid vocabulary pattern")?;
    let source = document_source(args, config)?;
    let tracker = if args.no_enrich { None } else { issue_tracker(config)? };
    let options = super::pipeline_options(config, !args.no_enrich);
    let tracker = tracker.as_ref().map(|client| client as &dyn IssueTracker);
    let pipeline = Pipeline::new(&parser, source.as_ref(), tracker, options);

    let store = (!args.no_save).then(|| SnapshotStore::new(&config.general.snapshot_path));
    let started_at = Utc::now();
    if let Some(store) = &store {
        store.mark_running(started_at)?;
    }

    let report = match pipeline.run().await {
        Ok(report) => report,
        Err(error) => {
            if let Some(store) = &store {
                store.record_failure(started_at, error.to_string())?;
            }
            return Err(error).context("sync failed");
        }
    };

    if let Some(store) = &store {
        store.save_report(&report, started_at)?;
        info!(path = %store.path().display(), items = report.item_count(), "snapshot saved");
    }
    output::emit_report(&report.filter_by_teams(&flags.teams), flags.format)
}

fn document_source(
    args: &SyncArgs,
    config: &SitrepConfig,
) -> anyhow::Result<Box<dyn DocumentSource>> {
    if let Some(path) = &args.file {
        return Ok(Box::new(FileSource::new(path)));
    }
    let client = ConfluenceClient::from_config(config).context(
        "Confluence is not configured; set confluence.base_url and confluence.page_id or pass --file",
    )?;
    Ok(Box::new(client))
}

/// The tracker client, or `None` when no tracker is configured.
fn issue_tracker(config: &SitrepConfig) -> anyhow::Result<Option<JiraClient>> {
    match JiraClient::from_config(config) {
        Ok(client) => Ok(Some(client)),
        Err(ClientError::NotConfigured(what)) => {
            warn!(missing = what, "tracker not configured; running without enrichment");
            Ok(None)
        }
        Err(error) => Err(error).context("failed to build tracker client"),
    }
}
