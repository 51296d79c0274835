use sitrep_config::SitrepConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &SitrepConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Parse(args) => commands::parse::handle(&args, config, flags).await,
        Commands::Sync(args) => commands::sync::handle(&args, config, flags).await,
        Commands::Summary => commands::summary::handle(config, flags),
        Commands::Report(args) => commands::report::handle(&args, config, flags),
        Commands::Config => commands::config::handle(config),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
