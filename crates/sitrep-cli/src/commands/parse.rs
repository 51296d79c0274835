use anyhow::Context;
use sitrep_client::FileSource;
use sitrep_config::SitrepConfig;
use sitrep_parser::SituationParser;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ParseArgs;
use crate::output;
use crate::pipeline::Pipeline;

/// Handle `sitrep parse <file>`: extraction only, nothing is persisted.
pub async fn handle(
    args: &ParseArgs,
    config: &SitrepConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let parser = SituationParser::from_config(config).context("invalid vocabulary pattern")?;
    let source = FileSource::new(&args.file);
    let options = super::pipeline_options(config, false);

    let report = Pipeline::new(&parser, &source, None, options)
        .run()
        .await
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    output::emit_report(&report.filter_by_teams(&flags.teams), flags.format)
}
