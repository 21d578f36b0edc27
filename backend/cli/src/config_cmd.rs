//! `glimpse config`: inspect, validate, and scaffold the config file.

use std::path::Path;

use anyhow::Result;
use glimpse_config::{
    load_config, redact, validate, write_config, GlimpseConfig, ProviderConfig,
};

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

/// Print the effective config with secrets masked.
pub fn show(config: &GlimpseConfig) -> Result<()> {
    let value = serde_json::to_value(config)?;
    println!("{}", serde_json::to_string_pretty(&redact(&value))?);
    Ok(())
}

/// Validate the effective config; fails when any error is found.
pub fn check(config: &GlimpseConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    report.ensure_valid()?;
    note_success("Config is valid");
    Ok(())
}

/// Write a starter config that reads the API key from the environment.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        let existing = load_config(path).await?;
        note_info(&format!(
            "Config already exists at {} (fallback: {:?}); pass --force to overwrite",
            path.display(),
            existing.fallback.unwrap_or_default()
        ));
        return Ok(());
    }
    write_config(&starter_config(), path).await?;
    note_success(&format!("Wrote {}", path.display()));
    Ok(())
}

fn starter_config() -> GlimpseConfig {
    GlimpseConfig {
        provider: Some(ProviderConfig {
            api_key: Some("${GOOGLE_VISION_API_KEY}".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_config::{apply_all_defaults, contains_env_var_reference, FeaturesConfig};

    #[test]
    fn starter_config_references_env_key() {
        let config = starter_config();
        let key = config.provider.unwrap().api_key.unwrap();
        assert!(contains_env_var_reference(&key));
    }

    #[test]
    fn check_rejects_invalid_config() {
        let mut config = apply_all_defaults(GlimpseConfig::default());
        config.features = Some(FeaturesConfig { logos: Some(0), ..Default::default() });
        assert!(check(&config).is_err());
    }

    #[tokio::test]
    async fn init_does_not_overwrite_without_force() {
        let dir = std::env::temp_dir().join(format!("glimpse-init-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.yaml");

        init(&path, false).await.unwrap();
        tokio::fs::write(&path, "fallback: propagate\n").await.unwrap();
        init(&path, false).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "fallback: propagate\n");

        init(&path, true).await.unwrap();
        let rewritten = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(rewritten.contains("GOOGLE_VISION_API_KEY"));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
