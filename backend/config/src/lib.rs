//! `glimpse-config`: runtime configuration for the Glimpse vision pipeline.
//!
//! Provides:
//! - Typed config schema (provider, feature caps, fallback mode, logging)
//! - YAML read/write with backup rotation
//! - `${ENV_VAR}` substitution
//! - Config redaction for safe display
//! - Default value application and validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::{apply_all_defaults, apply_api_key_from_env};
pub use env::{contains_env_var_reference, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use redact::redact;
pub use schema::{FallbackMode, FeaturesConfig, GlimpseConfig, LoggingConfig, ProviderConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load a config file and apply env substitution and defaults.
///
/// This is the main entry point for loading a config at runtime. Validation is
/// left to the caller so findings can be logged after the subscriber is up.
pub async fn load_and_prepare(path: &Path) -> Result<GlimpseConfig> {
    let raw_config = load_config(path).await?;

    let value: Value =
        serde_json::to_value(&raw_config).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    let config: GlimpseConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_api_key_from_env(config, &std::env::vars().collect());
    let config = apply_all_defaults(config);
    tracing::debug!(path = %path.display(), "Config loaded");

    Ok(config)
}
