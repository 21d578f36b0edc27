pub mod google;
pub mod mock;

use async_trait::async_trait;
use glimpse_core::AnalysisError;
use serde_json::Value;

use crate::request::AnnotateRequest;

/// The one network exchange of a pipeline run.
///
/// Implementations return the provider's raw JSON; shape validation happens
/// in the normalizer so every transport shares the same rules.
#[async_trait]
pub trait VisionTransport: Send + Sync {
    /// Transport name (e.g., "google", "mock").
    fn name(&self) -> &str;

    /// Send one annotate request and return the response body.
    async fn annotate(&self, request: &AnnotateRequest) -> Result<Value, AnalysisError>;
}

