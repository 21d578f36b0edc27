//! `glimpse analyze`: run one image through the vision pipeline.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use glimpse_config::{validate, FallbackMode, GlimpseConfig};
use glimpse_core::{AnalysisError, AnalysisResult, ImageSource};
use glimpse_vision::{
    write_export, AnalysisPipeline, FallbackPolicy, FeatureLimits, GoogleVisionTransport,
};
use tracing::info;

use crate::image_source::FileImageSource;
use crate::terminal_output::{note_info, note_success, note_warn, render_table, Column};

pub struct AnalyzeArgs {
    pub image: PathBuf,
    pub json: bool,
    pub export: Option<PathBuf>,
    pub strict: bool,
}

pub async fn run(config: &GlimpseConfig, args: AnalyzeArgs) -> Result<()> {
    validate(config).ensure_valid()?;

    let source = FileImageSource::new(&args.image);
    let image = source.capture().await?;
    info!(source = source.name(), path = %source.path().display(), "Image captured");

    let pipeline = build_pipeline(config, args.strict);
    let outcome = match pipeline.analyze_detailed(&image).await {
        Ok(outcome) => outcome,
        Err(AnalysisError::EmptyCapture) => {
            bail!("{} contains no image data", args.image.display())
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(failure) = &outcome.failure {
        note_warn(&format!("Provider call failed ({failure}); showing placeholder results"));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    } else {
        print_result(&outcome.result);
    }

    if let Some(dir) = &args.export {
        let path = write_export(&outcome.result, dir).await?;
        note_success(&format!("Exported analysis to {}", path.display()));
    }

    Ok(())
}

/// Assemble a pipeline from a fully defaulted config.
pub fn build_pipeline(config: &GlimpseConfig, strict: bool) -> AnalysisPipeline<GoogleVisionTransport> {
    let provider = config.provider.clone().unwrap_or_default();

    let mut transport = GoogleVisionTransport::new(provider.api_key.unwrap_or_default());
    if let Some(endpoint) = provider.endpoint {
        transport = transport.with_endpoint(endpoint);
    }

    let policy = if strict {
        FallbackPolicy::Propagate
    } else {
        policy_for(config.fallback.unwrap_or_default())
    };

    let mut pipeline = AnalysisPipeline::new(transport)
        .with_limits(feature_limits(config))
        .with_policy(policy);
    if let Some(secs) = provider.timeout_secs {
        pipeline = pipeline.with_timeout(Duration::from_secs(secs));
    }
    pipeline
}

pub fn policy_for(mode: FallbackMode) -> FallbackPolicy {
    match mode {
        FallbackMode::Degrade => FallbackPolicy::Degrade,
        FallbackMode::Propagate => FallbackPolicy::Propagate,
    }
}

pub fn feature_limits(config: &GlimpseConfig) -> FeatureLimits {
    let defaults = FeatureLimits::default();
    let Some(features) = &config.features else { return defaults };
    FeatureLimits {
        text: features.text.unwrap_or(defaults.text),
        objects: features.objects.unwrap_or(defaults.objects),
        landmarks: features.landmarks.unwrap_or(defaults.landmarks),
        logos: features.logos.unwrap_or(defaults.logos),
    }
}

fn print_result(result: &AnalysisResult) {
    note_info(result.summary());
    if result.annotations().is_empty() {
        return;
    }

    let columns = vec![
        Column::left("ID"),
        Column::left("Type"),
        Column::left("Content").max_width(48),
        Column::right("Confidence"),
        Column::left("Box"),
    ];
    let rows: Vec<Vec<String>> = result
        .annotations()
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.kind.to_string(),
                a.content.clone(),
                format!("{}%", (a.confidence * 100.0).round() as u32),
                a.bounding_box
                    .map(|b| format!("{},{} {}x{}", b.x, b.y, b.width, b.height))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    print!("{}", render_table(&columns, &rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_config::{apply_all_defaults, FeaturesConfig, ProviderConfig};

    #[test]
    fn limits_follow_config_overrides() {
        let mut config = GlimpseConfig::default();
        config.features = Some(FeaturesConfig { text: Some(7), ..Default::default() });
        let limits = feature_limits(&config);
        assert_eq!(limits.text, 7);
        assert_eq!(limits.objects, 20);
        assert_eq!(feature_limits(&GlimpseConfig::default()), FeatureLimits::default());
    }

    #[test]
    fn strict_overrides_configured_mode() {
        let config = apply_all_defaults(GlimpseConfig::default());
        assert_eq!(build_pipeline(&config, false).policy(), FallbackPolicy::Degrade);
        assert_eq!(build_pipeline(&config, true).policy(), FallbackPolicy::Propagate);
    }

    #[test]
    fn endpoint_comes_from_config() {
        let mut config = GlimpseConfig::default();
        config.provider = Some(ProviderConfig {
            endpoint: Some("http://127.0.0.1:9/annotate".into()),
            ..Default::default()
        });
        let pipeline = build_pipeline(&config, false);
        assert_eq!(pipeline.transport().endpoint(), "http://127.0.0.1:9/annotate");
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_capture() {
        let mut config = apply_all_defaults(GlimpseConfig::default());
        config.provider.as_mut().unwrap().timeout_secs = Some(0);
        let args = AnalyzeArgs {
            image: PathBuf::from("does-not-exist.png"),
            json: false,
            export: None,
            strict: false,
        };

        let err = run(&config, args).await.unwrap_err().to_string();
        assert!(err.contains("provider.timeoutSecs"), "{err}");
    }

    #[test]
    fn mode_maps_to_policy() {
        assert_eq!(policy_for(FallbackMode::Degrade), FallbackPolicy::Degrade);
        assert_eq!(policy_for(FallbackMode::Propagate), FallbackPolicy::Propagate);
    }
}
