use anyhow::Context;
use sitrep_config::SitrepConfig;

/// Handle `sitrep config`: the effective configuration as TOML.
pub fn handle(config: &SitrepConfig) -> anyhow::Result<()> {
    let rendered =
        toml::to_string_pretty(&config.redacted()).context("failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
