//! Error type for a single external call, kept structured so it can be classified.

use std::fmt;

/// Error returned by one call to the model or research service.
/// Used so we can classify and decide retries before converting to anyhow.
#[derive(Debug)]
pub enum CallError {
    /// The service answered with a non-2xx status.
    Http { status: u32, body: String },
    /// Curl reported an error (timeout, connection, TLS, etc.).
    Transport(curl::Error),
    /// The response arrived but could not be understood.
    Decode(String),
    /// A failure that only carries a message (e.g. an error object inside a 200 body).
    Api(String),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Http { status, body } if body.is_empty() => write!(f, "HTTP {}", status),
            CallError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            CallError::Transport(e) => write!(f, "{}", e),
            CallError::Decode(msg) => write!(f, "invalid response: {}", msg),
            CallError::Api(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallError::Transport(e) => Some(e),
            CallError::Http { .. } | CallError::Decode(_) | CallError::Api(_) => None,
        }
    }
}

impl From<curl::Error> for CallError {
    fn from(e: curl::Error) -> Self {
        CallError::Transport(e)
    }
}

impl From<serde_json::Error> for CallError {
    fn from(e: serde_json::Error) -> Self {
        CallError::Decode(e.to_string())
    }
}
