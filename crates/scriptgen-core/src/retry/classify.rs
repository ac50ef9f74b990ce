//! Classify call errors into retry policy error kinds.

use super::error::CallError;
use super::policy::ErrorKind;

/// Text that marks a rate-limit failure when only a message is available.
pub const RATE_LIMIT_MARKER: &str = "429";

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 => ErrorKind::RateLimited,
        _ => ErrorKind::Other,
    }
}

/// Classify a bare error message by looking for the rate-limit marker.
pub fn classify_message(text: &str) -> ErrorKind {
    if text.contains(RATE_LIMIT_MARKER) {
        ErrorKind::RateLimited
    } else {
        ErrorKind::Other
    }
}

/// Classify a call error into an ErrorKind.
pub fn classify(e: &CallError) -> ErrorKind {
    match e {
        CallError::Http { status, .. } => classify_http_status(*status),
        CallError::Api(msg) => classify_message(msg),
        CallError::Transport(_) | CallError::Decode(_) => ErrorKind::Other,
    }
}
