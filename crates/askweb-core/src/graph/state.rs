use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::{Answer, VerificationStatus};
use crate::scrape::ScrapedChunk;
use crate::search::SearchResult;

use super::stage::Stage;

/// The single mutable record threaded through one query's workflow run.
///
/// Fields are populated strictly in dependency order - links before chunks,
/// chunks before answer, answer before status - and no field is ever cleared
/// once set. The chunk collection is the only field touched by more than one
/// scrape branch, and only by appending; merge order does not matter.
///
/// A state is created fresh per incoming query and discarded when the caller
/// has consumed the final snapshot. Nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique identifier for this run, used in log correlation.
    pub id: String,
    /// The user's question.
    pub query: String,
    /// The workflow node currently in flight.
    pub stage: Stage,
    /// When the run was created.
    pub started_at: DateTime<Utc>,
    /// Raw records returned by the search provider.
    pub search_results: Vec<SearchResult>,
    /// URLs extracted from the search results, in result order.
    pub links: Vec<String>,
    /// Chunks contributed by the scrape branches (append-only).
    pub chunks: Vec<ScrapedChunk>,
    /// The synthesized answer, populated after all chunks are in.
    pub answer: Option<Answer>,
    /// The citation verdict, populated last.
    pub status: Option<VerificationStatus>,
}

impl RunState {
    /// Creates a fresh state for one query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            query: query.into(),
            stage: Stage::default(),
            started_at: Utc::now(),
            search_results: Vec::new(),
            links: Vec::new(),
            chunks: Vec::new(),
            answer: None,
            status: None,
        }
    }

    /// Records the search results and extracts their links.
    ///
    /// Every record with a non-empty link contributes one entry, in result
    /// order; duplicates are kept as-is. An empty result set leaves both
    /// collections empty, which is a valid (degenerate) run.
    pub fn set_search_results(&mut self, results: Vec<SearchResult>) {
        self.links = results
            .iter()
            .filter(|r| !r.link.is_empty())
            .map(|r| r.link.clone())
            .collect();
        self.search_results = results;
    }

    /// Appends chunks contributed by one scrape branch.
    pub fn add_chunks(&mut self, chunks: Vec<ScrapedChunk>) {
        self.chunks.extend(chunks);
    }

    /// Records the synthesized answer.
    pub fn set_answer(&mut self, answer: Answer) {
        self.answer = Some(answer);
    }

    /// Records the citation verdict.
    pub fn set_status(&mut self, status: VerificationStatus) {
        self.status = Some(status);
    }

    /// Moves to the next workflow stage, if there is one.
    pub fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            self.stage = next;
        }
    }
}
