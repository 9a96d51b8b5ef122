use serde::{Deserialize, Serialize};

/// Represents the node of the workflow a run is currently in.
///
/// Runs progress linearly through stages:
/// GetLinks → ScrapeWebData → GenerateAnswer → VerifyCitations → Complete
///
/// ScrapeWebData is the one stage that fans out: it covers every per-link
/// scrape branch, however many there are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Searching the web and collecting result links
    #[default]
    GetLinks,
    /// Downloading, reducing, and chunking each linked page
    ScrapeWebData,
    /// Synthesizing a cited answer from the merged chunks
    GenerateAnswer,
    /// Checking the answer's citations against the raw search results
    VerifyCitations,
    /// Run finished, state fully populated
    Complete,
}

impl Stage {
    /// Returns the next stage in the workflow.
    /// Returns None if already complete.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::GetLinks => Some(Stage::ScrapeWebData),
            Stage::ScrapeWebData => Some(Stage::GenerateAnswer),
            Stage::GenerateAnswer => Some(Stage::VerifyCitations),
            Stage::VerifyCitations => Some(Stage::Complete),
            Stage::Complete => None,
        }
    }

    /// Returns true if this stage can transition to the next stage.
    pub fn can_advance(&self) -> bool {
        self.next().is_some()
    }

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::GetLinks => "Searching",
            Stage::ScrapeWebData => "Scraping",
            Stage::GenerateAnswer => "Answering",
            Stage::VerifyCitations => "Verifying",
            Stage::Complete => "Complete",
        }
    }
}
