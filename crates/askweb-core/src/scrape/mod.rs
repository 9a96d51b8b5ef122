mod chunk;
mod reduce;

pub use chunk::{split_content, split_text, ChunkError, ScrapedChunk};
pub use reduce::reduce_text;

use std::time::Duration;

use async_trait::async_trait;
use html2text::from_read;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ScrapeConfig;

/// Rendered width used when flattening HTML to text.
const TEXT_RENDER_WIDTH: usize = 80;

/// One block of text downloaded from a page, tagged with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// The extracted page text.
    pub text: String,
    /// URL the text was downloaded from.
    pub source: String,
}

/// Errors that can occur while downloading page content.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Fetch request failed: {status} - {url}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to extract text from {url}: {message}")]
    Extract { url: String, message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// Trait for page content downloaders.
///
/// One URL in, one or more text blocks out. Failures are per-call; the
/// orchestration layer decides whether a failed fetch is fatal.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Downloads the page at `url` and returns its text blocks.
    async fn fetch(&self, url: &str) -> Result<Vec<PageContent>, FetchError>;
}

/// HTTP page fetcher that flattens HTML into readable text.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher from the scrape section of the configuration.
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<PageContent>, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let text = from_read(body.as_bytes(), TEXT_RENDER_WIDTH).map_err(|e| {
            FetchError::Extract {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(vec![PageContent {
            text,
            source: url.to_string(),
        }])
    }
}
