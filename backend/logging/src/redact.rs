//! Log Redaction Layer
//!
//! Scrubs API keys and bearer tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static QUERY_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&](?:key|api_key|access_token)=)[^&\s]+").unwrap());
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(AIza[0-9A-Za-z\-_]{35})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    // Credentials carried as URL query parameters
    let redacted = QUERY_KEY_RE.replace_all(input, "${1}[REDACTED]");

    // Google API keys and bearer tokens anywhere else
    API_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string()
}
