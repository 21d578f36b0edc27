use anyhow::Result;
use async_trait::async_trait;

/// Produces a single still image as base64 text, optionally data-URL prefixed.
///
/// Camera and screen-capture bridges live outside this workspace; they only
/// need to implement this trait.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Human-readable name of this source (e.g., "file", "camera").
    fn name(&self) -> &str;

    /// Capture one image.
    async fn capture(&self) -> Result<String>;
}
