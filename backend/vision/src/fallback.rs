//! What the caller sees when the provider exchange fails.
//!
//! All failure-to-result mapping lives in [`FallbackPolicy::resolve`].

use chrono::Utc;
use glimpse_core::{AnalysisError, AnalysisResult, Annotation, AnnotationKind};

use crate::pipeline::{PipelineOutcome, PipelineState};

pub const FALLBACK_SUMMARY: &str = "Mock analysis: Found 1 text element and 1 object";
pub const FALLBACK_TEXT: &str = "Sample detected text";
pub const FALLBACK_OBJECT: &str = "Mobile phone";

/// How recoverable failures reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Substitute the fixed placeholder result and report the failure beside it.
    #[default]
    Degrade,
    /// Return every failure as an error.
    Propagate,
}

impl FallbackPolicy {
    /// Turn one pipeline attempt into what the caller receives.
    ///
    /// `EmptyCapture` is never masked: without an image there is nothing to
    /// stand in for.
    pub fn resolve(
        &self,
        attempt: Result<AnalysisResult, AnalysisError>,
        image: &str,
    ) -> Result<PipelineOutcome, AnalysisError> {
        match attempt {
            Ok(result) => Ok(PipelineOutcome {
                result,
                state: PipelineState::Success,
                failure: None,
            }),
            Err(err) if *self == FallbackPolicy::Degrade && err.is_recoverable() => Ok(PipelineOutcome {
                result: fallback_result(image),
                state: PipelineState::Failed,
                failure: Some(err),
            }),
            Err(err) => Err(err),
        }
    }
}

/// The fixed degraded result: one text and one object placeholder.
pub fn fallback_result(image: &str) -> AnalysisResult {
    AnalysisResult::new(
        Utc::now(),
        image,
        vec![
            Annotation::new("mock-text-1", AnnotationKind::Text, FALLBACK_TEXT, 0.95),
            Annotation::new("mock-object-1", AnnotationKind::Object, FALLBACK_OBJECT, 0.87),
        ],
        FALLBACK_SUMMARY,
    )
}
