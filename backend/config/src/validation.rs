//! Config validation: schema checks with user-friendly error messages.

use crate::schema::GlimpseConfig;
use thiserror::Error;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through `tracing`. Call once a subscriber is installed.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    /// Fail with every error joined when the config cannot be used to run.
    pub fn ensure_valid(&self) -> anyhow::Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let details: Vec<String> = self.errors.iter().map(|e| format!("{}: {}", e.path, e.message)).collect();
        anyhow::bail!("config has {} error(s): {}", self.errors.len(), details.join("; "))
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &GlimpseConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_provider(config, &mut report);
    validate_features(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_provider(config: &GlimpseConfig, report: &mut ValidationReport) {
    let provider = config.provider.as_ref();

    match provider.and_then(|p| p.api_key.as_deref()) {
        Some(key) if !key.trim().is_empty() => {}
        _ => report.warn(
            "provider.apiKey",
            "No API key configured; every analysis will return the fallback result",
        ),
    }

    let Some(provider) = provider else { return };
    if let Some(endpoint) = &provider.endpoint {
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            report.error("provider.endpoint", format!("Endpoint must be an http(s) URL, got '{endpoint}'"));
        } else if endpoint.starts_with("http://") {
            report.warn("provider.endpoint", "Endpoint is not HTTPS; the API key is sent in the URL");
        }
    }
    if provider.timeout_secs == Some(0) {
        report.error("provider.timeoutSecs", "Timeout must be greater than zero");
    }
}

fn validate_features(config: &GlimpseConfig, report: &mut ValidationReport) {
    let Some(features) = &config.features else { return };
    for (name, cap) in [
        ("text", features.text),
        ("objects", features.objects),
        ("landmarks", features.landmarks),
        ("logos", features.logos),
    ] {
        if cap == Some(0) {
            report.error(format!("features.{name}"), "Result cap must be at least 1");
        }
    }
}

fn validate_logging(config: &GlimpseConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else { return };
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.error("logging.level", format!("Unknown log level '{level}'"));
    }
}
