use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use glimpse_core::AnalysisError;
use serde_json::Value;

use super::VisionTransport;
use crate::request::AnnotateRequest;

enum Reply {
    Json(Value),
    Fail(AnalysisError),
}

/// A transport that returns a canned response or error.
pub struct MockTransport {
    reply: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<AnnotateRequest>>,
}

impl MockTransport {
    pub fn responding(body: Value) -> Self {
        Self::with_reply(Reply::Json(body))
    }

    pub fn failing(error: AnalysisError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Sleep before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AnnotateRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl VisionTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn annotate(&self, request: &AnnotateRequest) -> Result<Value, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Reply::Json(body) => Ok(body.clone()),
            Reply::Fail(err) => Err(err.clone()),
        }
    }
}
