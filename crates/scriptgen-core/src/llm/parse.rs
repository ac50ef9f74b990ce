//! Parse completions API response bodies.

use crate::retry::CallError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Extract the first choice's text, trimmed.
///
/// An `error` object in a 2xx body becomes `CallError::Api` carrying its code
/// and message, so a quota error reported that way still classifies as a rate limit.
pub fn parse_completion(body: &[u8]) -> Result<String, CallError> {
    let resp: CompletionResponse = serde_json::from_slice(body)?;
    if let Some(err) = resp.error {
        let msg = match err.code {
            Some(code) => format!("Error code: {} - {}", code, err.message),
            None => err.message,
        };
        return Err(CallError::Api(msg));
    }
    resp.choices
        .into_iter()
        .next()
        .map(|c| c.text.trim().to_string())
        .ok_or_else(|| CallError::Decode("response has no choices".into()))
}
