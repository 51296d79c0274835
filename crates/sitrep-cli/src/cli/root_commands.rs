use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Parse a local storage-format page without calling the tracker.
    Parse(ParseArgs),
    /// Fetch, parse and enrich the configured page, then save the snapshot.
    Sync(SyncArgs),
    /// Current sprint, counts and open items from the saved snapshot.
    Summary,
    /// Write the work-status markdown report from the saved snapshot.
    Report(ReportArgs),
    /// Print the JSON schema of an output type.
    Schema(SchemaArgs),
    /// Show the effective configuration (secrets masked).
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// Storage-format page file
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SyncArgs {
    /// Read the page from a local file instead of Confluence
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Skip the tracker lookups and queries
    #[arg(long)]
    pub no_enrich: bool,

    /// Do not write the snapshot
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Output path (defaults to general.report_path; `-` for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SchemaType {
    Report,
    Snapshot,
    Summary,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type to describe
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
