//! Default values for askweb configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Search Defaults
// ============================================================================

/// Maximum number of search results (and therefore scrape branches) per run.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// DuckDuckGo HTML search endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Timeout for one search request, in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Scrape Defaults
// ============================================================================

/// Fraction of a page's leading text kept before chunking.
pub const DEFAULT_REDUCTION_FRACTION: f64 = 0.3;

/// Target chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Overlap between consecutive chunks, in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Timeout for fetching one page, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// User agent sent with search and fetch requests. Some sites reject
/// requests with no browser-looking identity.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; askweb/0.1; +https://github.com/askweb/askweb)";

// ============================================================================
// LLM Defaults
// ============================================================================

/// Default LLM provider.
pub const DEFAULT_LLM_PROVIDER: &str = "openai";

/// Default max tokens for LLM responses.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// OpenAI defaults
/// Default OpenAI API URL.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

// Anthropic defaults
/// Default Anthropic API URL.
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
/// Default Anthropic model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
/// Default Anthropic API version.
pub const DEFAULT_ANTHROPIC_API_VERSION: &str = "2023-06-01";

// Ollama defaults
/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/v1";
/// Default Ollama model.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

// OpenRouter defaults
/// Default OpenRouter API URL.
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
