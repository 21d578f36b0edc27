//! File-backed image source for the CLI.
//!
//! Binary images are base64-encoded into a data URL. Files that already hold
//! base64 text (`.b64`, `.txt`) are passed through untouched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use glimpse_core::ImageSource;
use tokio::fs;
use tracing::debug;

pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }

    /// MIME subtype for the data-URL prefix, if the extension is a known image type.
    fn image_subtype(&self) -> Option<&'static str> {
        match self.extension().as_str() {
            "png" => Some("png"),
            "jpg" | "jpeg" => Some("jpeg"),
            "gif" => Some("gif"),
            "webp" => Some("webp"),
            "bmp" => Some("bmp"),
            "tif" | "tiff" => Some("tiff"),
            _ => None,
        }
    }

    fn is_pre_encoded(&self) -> bool {
        matches!(self.extension().as_str(), "b64" | "txt")
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn capture(&self) -> Result<String> {
        if self.is_pre_encoded() {
            let text = fs::read_to_string(&self.path)
                .await
                .with_context(|| format!("Failed to read image text: {}", self.path.display()))?;
            return Ok(text.trim().to_string());
        }

        let bytes = fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read image: {}", self.path.display()))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Captured image from file");

        let encoded = STANDARD.encode(&bytes);
        Ok(match self.image_subtype() {
            Some(subtype) => format!("data:image/{subtype};base64,{encoded}"),
            None => encoded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("glimpse-cli-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn png_becomes_data_url() {
        let path = scratch_file("shot.PNG", b"ABC").await;
        let image = FileImageSource::new(&path).capture().await.unwrap();
        assert_eq!(image, "data:image/png;base64,QUJD");
    }

    #[tokio::test]
    async fn unknown_extension_is_plain_base64() {
        let path = scratch_file("capture.raw", b"ABC").await;
        assert_eq!(FileImageSource::new(&path).capture().await.unwrap(), "QUJD");
    }

    #[tokio::test]
    async fn pre_encoded_text_is_not_encoded_again() {
        let path = scratch_file("capture.b64", b"data:image/jpeg;base64,QUJD\n").await;
        assert_eq!(
            FileImageSource::new(&path).capture().await.unwrap(),
            "data:image/jpeg;base64,QUJD"
        );
    }

    #[tokio::test]
    async fn empty_file_captures_nothing() {
        let path = scratch_file("empty.png", b"").await;
        assert_eq!(FileImageSource::new(&path).capture().await.unwrap(), "data:image/png;base64,");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = FileImageSource::new("/nonexistent/glimpse.png").capture().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read image"));
    }
}
