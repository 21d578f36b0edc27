//! Structured Logger
//!
//! Wraps `tracing` to provide console output, daily-rotated NDJSON files,
//! and environment-based level control.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger: console on stderr, JSON lines under `log_dir`.
///
/// `RUST_LOG` overrides `level`. If the log directory cannot be used, only the
/// console layer is installed. Calling this twice is harmless.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Writes `glimpse.log.YYYY-MM-DD`
    let file_layer = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("glimpse.log")
        .build(log_dir.as_ref())
        .map(|appender| {
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
        });
    let file_error = file_layer.as_ref().err().map(|e| e.to_string());

    // stdout is reserved for command output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer.ok())
        .try_init();

    if let Some(error) = file_error {
        tracing::warn!(dir = %log_dir.as_ref().display(), %error, "File logging disabled");
    }
}
