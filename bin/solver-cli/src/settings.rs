//! Layered solver configuration: defaults, optional file, `NUMBERS_*` environment.

use anyhow::Context;
use config::{Config, Environment, File};
use numbers_core::SolverConfig;
use std::path::Path;

/// Prefix for environment overrides, e.g. `NUMBERS_MAX_EXPANSIONS`
pub const ENV_PREFIX: &str = "NUMBERS";

/// Builds the solver configuration from defaults, an optional file and the environment
pub fn load(path: Option<&Path>) -> anyhow::Result<SolverConfig> {
    let mut builder = Config::builder().add_source(
        Config::try_from(&SolverConfig::default()).context("failed to encode default configuration")?,
    );

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: SolverConfig = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("failed to load solver configuration")?
        .try_deserialize()
        .context("invalid solver configuration")?;

    config.validate()?;
    Ok(config)
}
