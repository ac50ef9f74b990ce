//! Background research lookup.
//!
//! [`ResearchSource`] is the seam the pipeline calls; [`WikipediaClient`] is
//! the production implementation backed by the MediaWiki action API.

mod parse;
mod wikipedia;

use crate::retry::CallError;

pub use parse::{format_documents, parse_extracts, parse_search_titles, Document};
pub use wikipedia::{WikipediaClient, MAX_QUERY_CHARS, NO_RESULT};

/// Something that turns a free-text query into research text.
pub trait ResearchSource {
    fn lookup(&self, query: &str) -> Result<String, CallError>;
}

impl<T: ResearchSource + ?Sized> ResearchSource for &T {
    fn lookup(&self, query: &str) -> Result<String, CallError> {
        (**self).lookup(query)
    }
}
