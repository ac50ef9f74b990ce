//! Parse MediaWiki action API responses (formatversion=2).

use crate::retry::CallError;
use serde::Deserialize;

/// One page of research: title and plain-text summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<Q> {
    #[serde(default)]
    query: Option<Q>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    missing: bool,
}

fn decode<Q: for<'de> Deserialize<'de> + Default>(body: &[u8]) -> Result<Q, CallError> {
    let resp: ApiResponse<Q> = serde_json::from_slice(body)?;
    if let Some(err) = resp.error {
        return Err(CallError::Api(format!("{}: {}", err.code, err.info)));
    }
    Ok(resp.query.unwrap_or_default())
}

/// Titles from a `list=search` response, in rank order.
pub fn parse_search_titles(body: &[u8]) -> Result<Vec<String>, CallError> {
    let q: SearchQuery = decode(body)?;
    Ok(q.search.into_iter().map(|h| h.title).collect())
}

/// Documents from a `prop=extracts` response. Missing pages and empty extracts are skipped.
pub fn parse_extracts(body: &[u8]) -> Result<Vec<Document>, CallError> {
    let q: PagesQuery = decode(body)?;
    Ok(q.pages
        .into_iter()
        .filter(|p| !p.missing)
        .filter_map(|p| {
            let summary = p.extract?.trim().to_string();
            (!summary.is_empty()).then_some(Document {
                title: p.title,
                summary,
            })
        })
        .collect())
}

/// Render documents as `Page: ..\nSummary: ..` blocks separated by a blank line,
/// cut to at most `max_chars` characters.
pub fn format_documents(docs: &[Document], max_chars: usize) -> String {
    let joined = docs
        .iter()
        .map(|d| format!("Page: {}\nSummary: {}", d.title, d.summary))
        .collect::<Vec<_>>()
        .join("\n\n");
    match joined.char_indices().nth(max_chars) {
        Some((idx, _)) => joined[..idx].to_string(),
        None => joined,
    }
}
