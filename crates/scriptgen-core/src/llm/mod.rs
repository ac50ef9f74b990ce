//! Language model access.
//!
//! [`TextModel`] is the seam the chains call; [`OpenAiCompletions`] is the
//! production implementation against an OpenAI-compatible `/completions`
//! endpoint.

mod parse;

use crate::config::LlmConfig;
use crate::http;
use crate::retry::CallError;
use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

pub use parse::parse_completion;

/// A model that turns a prompt into text.
pub trait TextModel {
    fn complete(&self, prompt: &str) -> Result<String, CallError>;
}

impl<T: TextModel + ?Sized> TextModel for &T {
    fn complete(&self, prompt: &str) -> Result<String, CallError> {
        (**self).complete(prompt)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f64,
    max_tokens: u32,
}

/// Blocking client for the text completions API. Built once from config.
#[derive(Debug, Clone)]
pub struct OpenAiCompletions {
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiCompletions {
    pub fn new(cfg: &LlmConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            anyhow::bail!("API key is empty");
        }
        Ok(Self {
            endpoint: format!("{}/completions", cfg.api_base.trim_end_matches('/')),
            api_key,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
            timeout: Duration::from_secs(cfg.timeout_secs),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TextModel for OpenAiCompletions {
    fn complete(&self, prompt: &str) -> Result<String, CallError> {
        let request = CompletionRequest {
            model: &self.model,
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let body = serde_json::to_vec(&request)?;
        let headers = [format!("Authorization: Bearer {}", self.api_key)];
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "completion request");
        let response =
            http::post_json(&self.endpoint, &headers, &body, self.timeout)?.error_for_status()?;
        parse_completion(&response.body)
    }
}
