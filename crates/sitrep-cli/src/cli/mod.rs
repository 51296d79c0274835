use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `sitrep` binary.
#[derive(Debug, Parser)]
#[command(
    name = "sitrep",
    version,
    about = "Turn a Confluence situation page into a structured planning snapshot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only keep records of these teams (comma-separated)
    #[arg(short, long, global = true, value_delimiter = ',')]
    pub teams: Vec<String>,

    /// Extra config file, layered above .sitrep/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            teams: self
                .teams
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::root_commands::SchemaType;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["sitrep", "--format", "table", "--verbose", "summary"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Summary));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["sitrep", "summary", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn teams_are_comma_separated() {
        let cli = Cli::try_parse_from(["sitrep", "--teams", "CATALOG, dam,", "summary"])
            .expect("cli should parse");
        assert_eq!(cli.global_flags().teams, vec!["CATALOG", "dam"]);
    }

    #[test]
    fn sync_flags() {
        let cli = Cli::try_parse_from(["sitrep", "sync", "--file", "page.xml", "--no-enrich"])
            .expect("cli should parse");
        let Commands::Sync(args) = cli.command else {
            panic!("expected sync");
        };
        assert_eq!(args.file.as_deref(), Some(std::path::Path::new("page.xml")));
        assert!(args.no_enrich);
        assert!(!args.no_save);
    }

    #[test]
    fn parse_requires_a_file() {
        assert!(Cli::try_parse_from(["sitrep", "parse"]).is_err());
    }

    #[test]
    fn schema_type_is_validated() {
        let cli = Cli::try_parse_from(["sitrep", "schema", "snapshot"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Schema(ref args) if args.type_name == SchemaType::Snapshot
        ));
        assert!(Cli::try_parse_from(["sitrep", "schema", "epic"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["sitrep", "--format", "xml", "summary"]).is_err());
    }
}
