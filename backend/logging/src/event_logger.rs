//! Analysis Event Logger
//!
//! Structured pipeline events (request, completion, degradation) emitted through
//! `tracing` so the NDJSON file layer records them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AnalysisEvent {
    Requested {
        transport: String,
        payload_bytes: usize,
    },
    Completed {
        annotations: usize,
        summary: String,
    },
    /// A provider failure was masked by the fallback result.
    Degraded {
        error_kind: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AnalysisEvent,
}

impl EventLogEntry {
    pub fn new(run_id: &str, mut event: AnalysisEvent) -> Self {
        match &mut event {
            AnalysisEvent::Requested { .. } => {}
            AnalysisEvent::Completed { summary, .. } => {
                *summary = redact_sensitive_data(summary);
            }
            AnalysisEvent::Degraded { error_msg, .. } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
        }
        Self {
            run_id: run_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit one event on the `analysis_events` target.
    pub fn log_event(run_id: &str, event: AnalysisEvent) {
        let entry = EventLogEntry::new(run_id, event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "analysis_events", run_id = %entry.run_id, event = %json, "Analysis event");
    }
}
