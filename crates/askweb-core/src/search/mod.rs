mod duckduckgo;

pub use duckduckgo::DuckDuckGoClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record from a web search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub link: String,
    /// Short text snippet shown with the result.
    pub snippet: String,
}

/// Errors that can occur while searching the web.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Network(err.to_string())
    }
}

/// Trait for web search backends.
///
/// Implementations turn a query string into an ordered list of results,
/// truncated to `max_results`. A search that finds nothing returns an empty
/// list, never an error.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Searches the web for `query`, returning at most `max_results` records.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;
}
