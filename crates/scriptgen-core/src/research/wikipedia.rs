use super::parse::{format_documents, parse_extracts, parse_search_titles};
use super::ResearchSource;
use crate::config::WikipediaConfig;
use crate::http;
use crate::retry::CallError;
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// Queries are cut to this many characters before searching.
pub const MAX_QUERY_CHARS: usize = 300;

/// Returned when the search finds no usable page.
pub const NO_RESULT: &str = "No good Wikipedia Search Result was found";

/// Search Wikipedia, then fetch the plain-text intro of each top hit.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    api_url: Url,
    top_k_results: u32,
    doc_content_chars_max: usize,
    timeout: Duration,
}

impl WikipediaClient {
    pub fn new(cfg: &WikipediaConfig) -> Result<Self> {
        let raw = cfg
            .api_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", cfg.lang));
        let api_url =
            Url::parse(&raw).with_context(|| format!("invalid Wikipedia API URL: {raw}"))?;
        Ok(Self {
            api_url,
            top_k_results: cfg.top_k_results,
            doc_content_chars_max: cfg.doc_content_chars_max,
            timeout: Duration::from_secs(cfg.timeout_secs),
        })
    }

    pub fn search_url(&self, query: &str) -> Url {
        let limit = self.top_k_results.to_string();
        self.url_with(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", &limit),
            ("srprop", ""),
            ("format", "json"),
            ("formatversion", "2"),
        ])
    }

    pub fn extract_url(&self, title: &str) -> Url {
        self.url_with(&[
            ("action", "query"),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", title),
            ("format", "json"),
            ("formatversion", "2"),
        ])
    }

    fn url_with(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut().extend_pairs(params);
        url
    }

    fn get(&self, url: &Url) -> Result<Vec<u8>, CallError> {
        Ok(http::get(url.as_str(), &[], self.timeout)?.error_for_status()?.body)
    }
}

impl ResearchSource for WikipediaClient {
    fn lookup(&self, query: &str) -> Result<String, CallError> {
        let query: String = query.chars().take(MAX_QUERY_CHARS).collect();
        let titles = parse_search_titles(&self.get(&self.search_url(&query))?)?;
        tracing::debug!(query = %query, hits = titles.len(), "wikipedia search");

        let mut docs = Vec::new();
        for title in titles.iter().take(self.top_k_results as usize) {
            docs.extend(parse_extracts(&self.get(&self.extract_url(title))?)?);
        }
        if docs.is_empty() {
            return Ok(NO_RESULT.to_string());
        }
        Ok(format_documents(&docs, self.doc_content_chars_max))
    }
}
