//! Capture → request → provider → normalize → summarize.

use std::time::Duration;

use chrono::Utc;
use glimpse_core::{AnalysisError, AnalysisResult};
use glimpse_logging::{AnalysisEvent, EventLogger};
use serde_json::Value;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::fallback::FallbackPolicy;
use crate::normalize::normalize_response;
use crate::providers::VisionTransport;
use crate::request::{AnnotateRequest, FeatureLimits, build_request, strip_data_url_prefix};
use crate::summary::summarize;

/// Lifecycle of a single run: `Idle → Requesting → {Success | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Requesting,
    Success,
    Failed,
}

/// Result handed to the caller plus the failure it may be masking.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub result: AnalysisResult,
    pub state: PipelineState,
    /// Set when `result` is the fallback standing in for a failed run.
    pub failure: Option<AnalysisError>,
}

impl PipelineOutcome {
    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }
}

/// Orchestrates one provider exchange per call. Holds no per-call state, so
/// concurrent calls on a shared pipeline are independent.
pub struct AnalysisPipeline<T> {
    transport: T,
    limits: FeatureLimits,
    timeout: Option<Duration>,
    policy: FallbackPolicy,
}

impl<T: VisionTransport> AnalysisPipeline<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            limits: FeatureLimits::default(),
            timeout: None,
            policy: FallbackPolicy::default(),
        }
    }

    pub fn with_limits(mut self, limits: FeatureLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Race the provider call against `timeout`; expiry is a recoverable failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Analyze one captured image.
    ///
    /// Under the default policy only `EmptyCapture` comes back as `Err`; every
    /// other failure yields the fallback result and is logged.
    pub async fn analyze(&self, image: &str) -> Result<AnalysisResult, AnalysisError> {
        Ok(self.analyze_detailed(image).await?.result)
    }

    /// Like [`analyze`](Self::analyze), but also reports a masked failure.
    pub async fn analyze_detailed(&self, image: &str) -> Result<PipelineOutcome, AnalysisError> {
        let run_id = Uuid::new_v4().to_string();
        let attempt = self.execute(&run_id, image).await;
        let resolved = self.policy.resolve(attempt, image);

        match &resolved {
            Ok(PipelineOutcome { failure: Some(err), .. }) => {
                warn!(run_id = %run_id, error = %err, kind = err.kind(), "Vision analysis failed; returning fallback result");
                EventLogger::log_event(
                    &run_id,
                    AnalysisEvent::Degraded {
                        error_kind: err.kind().to_string(),
                        error_msg: err.to_string(),
                    },
                );
            }
            Ok(_) => {}
            Err(err) => error!(run_id = %run_id, error = %err, kind = err.kind(), "Vision analysis failed"),
        }
        resolved
    }

    /// The raw pipeline with no fallback applied.
    pub async fn run(&self, image: &str) -> Result<AnalysisResult, AnalysisError> {
        let run_id = Uuid::new_v4().to_string();
        self.execute(&run_id, image).await
    }

    async fn execute(&self, run_id: &str, image: &str) -> Result<AnalysisResult, AnalysisError> {
        transition(run_id, PipelineState::Idle);

        let payload = strip_data_url_prefix(image);
        if payload.trim().is_empty() {
            return Err(AnalysisError::EmptyCapture);
        }
        let request = build_request(image, &self.limits);

        transition(run_id, PipelineState::Requesting);
        EventLogger::log_event(
            run_id,
            AnalysisEvent::Requested {
                transport: self.transport.name().to_string(),
                payload_bytes: payload.len(),
            },
        );

        let outcome = self.exchange(&request).await.and_then(|raw| {
            let annotations = normalize_response(raw)?;
            let summary = summarize(&annotations);
            Ok(AnalysisResult::new(Utc::now(), image, annotations, summary))
        });

        match &outcome {
            Ok(result) => {
                transition(run_id, PipelineState::Success);
                EventLogger::log_event(
                    run_id,
                    AnalysisEvent::Completed {
                        annotations: result.annotations().len(),
                        summary: result.summary().to_string(),
                    },
                );
            }
            Err(_) => transition(run_id, PipelineState::Failed),
        }
        outcome
    }

    async fn exchange(&self, request: &AnnotateRequest) -> Result<Value, AnalysisError> {
        let call = self.transport.annotate(request);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| AnalysisError::Timeout(limit))?,
            None => call.await,
        }
    }
}

fn transition(run_id: &str, state: PipelineState) {
    debug!(run_id = %run_id, state = ?state, "Pipeline state");
}
