pub mod answer;
pub mod config;
pub mod graph;
pub mod llm;
pub mod scrape;
pub mod search;

pub use answer::{Answer, AnswerSynthesizer, CitationVerifier, VerificationStatus};
pub use config::Config;
pub use graph::{GraphError, QueryGraph, RunState, Stage};
pub use llm::TokenUsage;
pub use scrape::{PageContent, PageFetcher, ScrapedChunk};
pub use search::{DuckDuckGoClient, SearchResult};
