use anyhow::Context;
use sitrep_config::SitrepConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SitrepConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(error) if error.not_found() => {}
        Err(error) => tracing::warn!(%error, "failed to read .env; continuing without it"),
    }

    SitrepConfig::load_from(flags.config.as_deref()).context("failed to load configuration")
}
