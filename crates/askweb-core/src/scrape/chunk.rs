use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::{reduce_text, PageContent};
use crate::config::ScrapeConfig;

/// A bounded-size segment of reduced page text, tagged with its source URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedChunk {
    /// The chunk text.
    pub content: String,
    /// URL of the page this chunk came from.
    pub source: String,
}

/// Errors that can occur while splitting text into chunks.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("Chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    InvalidConfig { size: usize, overlap: usize },
}

/// Splits `text` into overlapping segments of at most `size` characters.
///
/// Consecutive segments share `overlap` characters so sentences straddling a
/// boundary stay intact in at least one segment. Empty input yields an empty
/// list.
pub fn split_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, ChunkError> {
    if size == 0 || overlap >= size {
        return Err(ChunkError::InvalidConfig { size, overlap });
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }

    let step = size - overlap;
    let mut segments = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + size).min(chars.len());
        segments.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    Ok(segments)
}

/// Reduces and chunks a batch of downloaded pages.
///
/// Each page is trimmed to its leading portion, cleaned, and split into
/// overlapping chunks that all carry the page's source URL. A page that
/// fails to split is logged and contributes zero chunks; the rest of the
/// batch is unaffected.
pub fn split_content(pages: &[PageContent], config: &ScrapeConfig) -> Vec<ScrapedChunk> {
    let mut all_chunks = Vec::new();

    for page in pages {
        let reduced = reduce_text(&page.text, config.reduction_fraction);

        match split_text(&reduced, config.chunk_size, config.chunk_overlap) {
            Ok(segments) => {
                for segment in segments {
                    all_chunks.push(ScrapedChunk {
                        content: segment,
                        source: page.source.clone(),
                    });
                }
            }
            Err(e) => {
                warn!(source = %page.source, error = %e, "skipping document that failed to split");
            }
        }
    }

    all_chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ScrapeConfig {
        ScrapeConfig {
            reduction_fraction: 1.0,
            chunk_size: 20,
            chunk_overlap: 5,
            ..ScrapeConfig::default()
        }
    }

    #[test]
    fn test_split_empty_text() {
        let segments = split_text("", 500, 50).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_split_short_text_is_one_chunk() {
        let segments = split_text("short", 500, 50).unwrap();
        assert_eq!(segments, vec!["short".to_string()]);
    }

    #[test]
    fn test_chunks_never_exceed_size() {
        let text = "abcdefghij".repeat(20);
        let segments = split_text(&text, 50, 10).unwrap();
        assert!(segments.iter().all(|s| s.chars().count() <= 50));
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text: String = ('a'..='z').collect();
        let segments = split_text(&text, 10, 4).unwrap();
        // Each segment after the first starts with the tail of its predecessor.
        for pair in segments.windows(2) {
            let prev: Vec<char> = pair[0].chars().collect();
            let tail: String = prev[prev.len() - 4..].iter().collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(split_text("text", 10, 10).is_err());
        assert!(split_text("text", 0, 0).is_err());
    }

    #[test]
    fn test_split_content_preserves_source() {
        let pages = vec![PageContent {
            text: "Paris is the capital of France. ".repeat(5),
            source: "https://example.com/paris".to_string(),
        }];

        let chunks = split_content(&pages, &test_config());
        assert!(!chunks.is_empty());
        assert!(chunks
            .iter()
            .all(|c| c.source == "https://example.com/paris"));
    }

    #[test]
    fn test_split_content_empty_page_contributes_nothing() {
        let pages = vec![PageContent {
            text: String::new(),
            source: "https://example.com/empty".to_string(),
        }];

        let chunks = split_content(&pages, &test_config());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_split_content_unsplittable_batch_degrades_to_empty() {
        // A configuration the splitter rejects is caught per document, not
        // raised out of the batch.
        let config = ScrapeConfig {
            reduction_fraction: 1.0,
            chunk_size: 10,
            chunk_overlap: 10,
            ..ScrapeConfig::default()
        };
        let pages = vec![PageContent {
            text: "some page text".to_string(),
            source: "https://example.com/a".to_string(),
        }];

        let chunks = split_content(&pages, &config);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_split_content_keeps_documents_independent() {
        let pages = vec![
            PageContent {
                text: "good page text here".to_string(),
                source: "https://example.com/a".to_string(),
            },
            PageContent {
                text: "another good page".to_string(),
                source: "https://example.com/b".to_string(),
            },
        ];

        let chunks = split_content(&pages, &test_config());
        let sources: Vec<_> = chunks.iter().map(|c| c.source.as_str()).collect();
        assert!(sources.contains(&"https://example.com/a"));
        assert!(sources.contains(&"https://example.com/b"));
    }
}
