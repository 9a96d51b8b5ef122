use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

use crate::answer::{AnswerSynthesizer, CitationVerifier, VerifyError};
use crate::config::{ScrapeConfig, DEFAULT_MAX_RESULTS};
use crate::llm::{LLMError, LLM};
use crate::scrape::{split_content, ContentFetcher, ScrapedChunk};
use crate::search::{SearchError, SearchProvider};

use super::state::RunState;

/// Runs one query through the workflow:
///
/// get_links → scrape_web_data (one branch per link) → generate_answer →
/// verify_citations.
///
/// The scrape stage is the only fan-out point. Each branch is an independent
/// task handed just its link; a branch that fails logs and contributes zero
/// chunks, and the graph waits for every branch before synthesizing. Errors
/// from the search provider, synthesizer, or verifier are fatal to the run
/// and propagate to the caller unmodified; the graph performs no retries.
pub struct QueryGraph<S, F, L>
where
    S: SearchProvider,
    F: ContentFetcher + 'static,
    L: LLM,
{
    search: S,
    fetcher: Arc<F>,
    synthesizer: AnswerSynthesizer<L>,
    verifier: CitationVerifier<L>,
    max_results: usize,
    scrape: ScrapeConfig,
}

impl<S, F, L> QueryGraph<S, F, L>
where
    S: SearchProvider,
    F: ContentFetcher + 'static,
    L: LLM,
{
    /// Creates a graph over the given collaborators.
    pub fn new(
        search: S,
        fetcher: F,
        synthesizer: AnswerSynthesizer<L>,
        verifier: CitationVerifier<L>,
    ) -> Self {
        Self {
            search,
            fetcher: Arc::new(fetcher),
            synthesizer,
            verifier,
            max_results: DEFAULT_MAX_RESULTS,
            scrape: ScrapeConfig::default(),
        }
    }

    /// Sets the maximum number of search results (and scrape branches).
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the reduction and chunking configuration.
    pub fn with_scrape_config(mut self, scrape: ScrapeConfig) -> Self {
        self.scrape = scrape;
        self
    }

    /// Executes the workflow for `query`.
    ///
    /// A snapshot of the evolving [`RunState`] is sent through `tx` after
    /// every completed node, so a caller can render partial progress; the
    /// same fully-populated state is also returned. Snapshot order within
    /// the scrape stage follows branch completion, which is
    /// non-deterministic; chunk contribution is commutative so the final
    /// state does not depend on it. A closed receiver only stops the
    /// snapshots, never the run.
    pub async fn run(
        &self,
        query: &str,
        tx: mpsc::UnboundedSender<RunState>,
    ) -> Result<RunState, GraphError> {
        let mut state = RunState::new(query);
        info!(run_id = %state.id, %query, "starting run");

        // get_links
        let results = self.search.search(query, self.max_results).await?;
        state.set_search_results(results);
        debug!(run_id = %state.id, links = state.links.len(), "links located");
        state.advance();
        let _ = tx.send(state.clone());

        // scrape_web_data: one branch per link, each given only its link.
        // Zero links means zero branches and the run proceeds with an
        // empty context.
        let mut branches: FuturesUnordered<_> = state
            .links
            .iter()
            .map(|link| {
                let fetcher = Arc::clone(&self.fetcher);
                let link = link.clone();
                let scrape = self.scrape.clone();
                tokio::spawn(async move { scrape_link(fetcher, link, scrape).await })
            })
            .collect();

        while let Some(joined) = branches.next().await {
            match joined {
                Ok(chunks) => state.add_chunks(chunks),
                Err(e) => {
                    warn!(run_id = %state.id, error = %e, "scrape branch aborted, contributing no chunks");
                }
            }
            let _ = tx.send(state.clone());
        }
        debug!(run_id = %state.id, chunks = state.chunks.len(), "scrape branches joined");
        state.advance();

        // generate_answer
        let answer = self
            .synthesizer
            .synthesize(&state.query, &state.chunks)
            .await?;
        state.set_answer(answer.clone());
        state.advance();
        let _ = tx.send(state.clone());

        // verify_citations
        let status = self.verifier.verify(&answer, &state.search_results).await?;
        state.set_status(status);
        state.advance();
        info!(run_id = %state.id, %status, "run complete");
        let _ = tx.send(state.clone());

        Ok(state)
    }
}

impl<S, F, L> QueryGraph<S, F, L>
where
    S: SearchProvider + 'static,
    F: ContentFetcher + 'static,
    L: LLM + 'static,
{
    /// Runs the workflow and exposes the snapshots as a stream.
    ///
    /// Returns the snapshot stream plus a handle resolving to the final
    /// state (or the fatal error). Convenience wrapper over [`Self::run`]
    /// for callers that prefer pull-style consumption.
    pub fn run_stream(
        self: Arc<Self>,
        query: impl Into<String>,
    ) -> (
        UnboundedReceiverStream<RunState>,
        tokio::task::JoinHandle<Result<RunState, GraphError>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let query = query.into();
        let handle = tokio::spawn(async move { self.run(&query, tx).await });
        (UnboundedReceiverStream::new(rx), handle)
    }
}

/// One scrape branch: fetch the page, reduce and chunk it.
///
/// Never raises out of the graph - a fetch failure is logged and degrades to
/// zero chunks so sibling branches and the run are unaffected.
async fn scrape_link<F: ContentFetcher>(
    fetcher: Arc<F>,
    link: String,
    scrape: ScrapeConfig,
) -> Vec<ScrapedChunk> {
    match fetcher.fetch(&link).await {
        Ok(pages) => split_content(&pages, &scrape),
        Err(e) => {
            warn!(link = %link, error = %e, "scrape branch failed, contributing no chunks");
            Vec::new()
        }
    }
}

/// Errors that are fatal to a run.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Answer synthesis failed: {0}")]
    Synthesize(#[from] LLMError),

    #[error("Citation verification failed: {0}")]
    Verify(#[from] VerifyError),
}
