//! Structured logging for Glimpse.
//!
//! Handles secret redaction, console + NDJSON file output, and analysis event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AnalysisEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
