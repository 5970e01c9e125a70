//! Layered configuration: optional TOML file, then `STXDC__*` environment overrides

use anyhow::Context;
use std::path::Path;
use stxdc_core::DashboardConfig;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_NAME: &str = "stxdc";

/// Environment prefix, e.g. `STXDC__DISPLAY__PRECISION=5`
pub const ENV_PREFIX: &str = "STXDC";

pub fn load_config(path: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to read configuration")?;

    let dashboard: DashboardConfig = settings
        .try_deserialize()
        .context("invalid configuration")?;

    tracing::debug!(?dashboard, "configuration loaded");
    Ok(dashboard)
}

/// Default configuration rendered as TOML
pub fn default_config_toml() -> anyhow::Result<String> {
    toml::to_string_pretty(&DashboardConfig::default()).context("failed to render configuration")
}
