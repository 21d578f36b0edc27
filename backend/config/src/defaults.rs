//! Config defaults: applies default values to parsed config.

use std::collections::HashMap;

use crate::io::config_dir;
use crate::schema::{
    FallbackMode, FeaturesConfig, GlimpseConfig, LoggingConfig, ProviderConfig,
};

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TEXT_RESULTS: u32 = 50;
pub const DEFAULT_OBJECT_RESULTS: u32 = 20;
pub const DEFAULT_LANDMARK_RESULTS: u32 = 10;
pub const DEFAULT_LOGO_RESULTS: u32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GOOGLE_VISION_API_KEY";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: GlimpseConfig) -> GlimpseConfig {
    let config = apply_provider_defaults(config);
    let config = apply_feature_defaults(config);
    let config = apply_logging_defaults(config);
    apply_fallback_default(config)
}

/// Fill `provider.apiKey` from the environment when it is unset.
pub fn apply_api_key_from_env(
    mut config: GlimpseConfig,
    env: &HashMap<String, String>,
) -> GlimpseConfig {
    let provider = config.provider.get_or_insert_with(ProviderConfig::default);
    if provider.api_key.is_none() {
        provider.api_key = env.get(API_KEY_ENV).filter(|v| !v.is_empty()).cloned();
    }
    config
}

fn apply_provider_defaults(mut config: GlimpseConfig) -> GlimpseConfig {
    let provider = config.provider.get_or_insert_with(ProviderConfig::default);
    if provider.endpoint.is_none() {
        provider.endpoint = Some(DEFAULT_ENDPOINT.to_string());
    }
    if provider.timeout_secs.is_none() {
        provider.timeout_secs = Some(DEFAULT_TIMEOUT_SECS);
    }
    config
}

fn apply_feature_defaults(mut config: GlimpseConfig) -> GlimpseConfig {
    let features = config.features.get_or_insert_with(FeaturesConfig::default);
    features.text.get_or_insert(DEFAULT_TEXT_RESULTS);
    features.objects.get_or_insert(DEFAULT_OBJECT_RESULTS);
    features.landmarks.get_or_insert(DEFAULT_LANDMARK_RESULTS);
    features.logos.get_or_insert(DEFAULT_LOGO_RESULTS);
    config
}

fn apply_fallback_default(mut config: GlimpseConfig) -> GlimpseConfig {
    config.fallback.get_or_insert(FallbackMode::Degrade);
    config
}

/// Ensure logging level and directory are set.
fn apply_logging_defaults(mut config: GlimpseConfig) -> GlimpseConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.dir.is_none() {
        logging.dir = Some(config_dir().join("logs").display().to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_section() {
        let config = apply_all_defaults(GlimpseConfig::default());
        let provider = config.provider.unwrap();
        assert_eq!(provider.endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
        assert_eq!(provider.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        let features = config.features.unwrap();
        assert_eq!(
            (features.text, features.objects, features.landmarks, features.logos),
            (Some(50), Some(20), Some(10), Some(10))
        );
        assert_eq!(config.fallback, Some(FallbackMode::Degrade));
        assert_eq!(config.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn keeps_explicit_values() {
        let mut config = GlimpseConfig::default();
        config.features = Some(FeaturesConfig { logos: Some(3), ..Default::default() });
        config.fallback = Some(FallbackMode::Propagate);
        let config = apply_all_defaults(config);
        assert_eq!(config.features.unwrap().logos, Some(3));
        assert_eq!(config.fallback, Some(FallbackMode::Propagate));
    }

    #[test]
    fn api_key_from_env_only_when_unset() {
        let env: HashMap<String, String> =
            [(API_KEY_ENV.to_string(), "from-env".to_string())].into_iter().collect();

        let filled = apply_api_key_from_env(GlimpseConfig::default(), &env);
        assert_eq!(filled.provider.unwrap().api_key.as_deref(), Some("from-env"));

        let mut explicit = GlimpseConfig::default();
        explicit.provider = Some(ProviderConfig { api_key: Some("from-file".into()), ..Default::default() });
        let kept = apply_api_key_from_env(explicit, &env);
        assert_eq!(kept.provider.unwrap().api_key.as_deref(), Some("from-file"));
    }
}
