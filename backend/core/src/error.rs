use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong between capture and a normalized result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// The image source produced no bytes. Never masked by the fallback policy.
    #[error("capture produced no image data")]
    EmptyCapture,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Per-image error object reported inside an otherwise successful response.
    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
}

impl AnalysisError {
    /// Whether a degraded fallback result may stand in for this failure.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AnalysisError::EmptyCapture)
    }

    /// Short stable tag used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::EmptyCapture => "empty_capture",
            AnalysisError::Transport(_) => "transport",
            AnalysisError::HttpStatus { .. } => "http_status",
            AnalysisError::MalformedResponse(_) => "malformed_response",
            AnalysisError::Provider { .. } => "provider",
            AnalysisError::Timeout(_) => "timeout",
        }
    }
}
