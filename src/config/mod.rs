// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use ::config::{Config as Layered, Environment, File, FileFormat, Map};
use std::path::Path;

/// Prefix of environment overrides, e.g. `HEALTH_PROBE_BASE_URL`.
pub const ENV_PREFIX: &str = "HEALTH_PROBE";

/// Load configuration from defaults, an optional file (YAML or JSON) and
/// `HEALTH_PROBE_*` environment variables, in increasing priority.
pub fn load_config(path: Option<&Path>) -> Result<ProbeConfig> {
    build_config(path, None)
}

/// Same as [`load_config`] but reads overrides from `env` instead of the
/// process environment.
pub fn load_config_with_env(path: Option<&Path>, env: Map<String, String>) -> Result<ProbeConfig> {
    build_config(path, Some(env))
}

fn build_config(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<ProbeConfig> {
    let mut builder = Layered::builder();

    if let Some(path) = path {
        if !path.is_file() {
            anyhow::bail!("Failed to read config file: {} does not exist", path.display());
        }

        let format = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        };
        builder = builder.add_source(File::from(path).format(format).required(true));
    }

    builder = builder.add_source(
        // Values stay strings; serde coerces the numeric and bool fields and
        // `accepted_statuses` splits on commas.
        Environment::with_prefix(ENV_PREFIX).source(env),
    );

    let config: ProbeConfig = builder
        .build()
        .context("Failed to assemble probe configuration")?
        .try_deserialize()
        .context("Failed to parse probe configuration")?;

    config.validate()?;
    Ok(config)
}
