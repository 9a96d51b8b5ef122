//! Configuration management for askweb.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `askweb.toml` file
//! 3. User config `~/.config/askweb/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! Collaborator clients (search, fetch, LLM) are constructed from the loaded
//! `Config` at startup; nothing in the core reads ambient global state.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web search configuration.
    pub search: SearchConfig,

    /// Page fetching and chunking configuration.
    pub scrape: ScrapeConfig,

    /// LLM provider configuration.
    pub llm: LLMConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./askweb.toml` (project local)
    /// 2. `~/.config/askweb/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("askweb.toml").exists() {
            return Self::from_file("askweb.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("askweb").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // LLM overrides
        if let Ok(provider) = std::env::var("ASKWEB_LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Ok(model) = std::env::var("ASKWEB_LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Ok(url) = std::env::var("ASKWEB_LLM_BASE_URL") {
            self.llm.base_url = Some(url);
        }
        if let Ok(key) = std::env::var("ASKWEB_LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Ok(tokens) = std::env::var("ASKWEB_LLM_MAX_TOKENS") {
            if let Ok(n) = tokens.parse() {
                self.llm.max_tokens = n;
            }
        }

        // Search overrides
        if let Ok(max) = std::env::var("ASKWEB_MAX_RESULTS") {
            if let Ok(n) = max.parse() {
                self.search.max_results = n;
            }
        }
        if let Ok(region) = std::env::var("ASKWEB_SEARCH_REGION") {
            self.search.region = Some(region);
        }

        // Scrape overrides
        if let Ok(agent) = std::env::var("ASKWEB_USER_AGENT") {
            self.scrape.user_agent = agent;
        }
    }

    /// Reject configurations the pipeline cannot run with.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid(
                "search.max_results must be at least 1".to_string(),
            ));
        }
        if !(self.scrape.reduction_fraction > 0.0 && self.scrape.reduction_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scrape.reduction_fraction must be in (0, 1], got {}",
                self.scrape.reduction_fraction
            )));
        }
        if self.scrape.chunk_overlap >= self.scrape.chunk_size {
            return Err(ConfigError::Invalid(format!(
                "scrape.chunk_overlap ({}) must be smaller than scrape.chunk_size ({})",
                self.scrape.chunk_overlap, self.scrape.chunk_size
            )));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Web search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results to keep from one search.
    pub max_results: usize,

    /// Search endpoint URL.
    pub endpoint: String,

    /// Region code passed to the search engine (e.g., "us-en").
    pub region: Option<String>,

    /// Timeout for one search request, in seconds.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            region: None,
            timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
        }
    }
}

/// Page fetching and chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Fraction of a page's leading text kept before chunking.
    pub reduction_fraction: f64,

    /// Target chunk size in characters.
    pub chunk_size: usize,

    /// Overlap between consecutive chunks, in characters.
    pub chunk_overlap: usize,

    /// Timeout for fetching one page, in seconds.
    pub timeout_secs: u64,

    /// User agent sent with fetch requests.
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            reduction_fraction: DEFAULT_REDUCTION_FRACTION,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Provider name: "openai", "anthropic", "ollama", or "openai-compatible".
    pub provider: String,

    /// Model name (provider-specific).
    pub model: Option<String>,

    /// Base URL for API (for openai-compatible providers).
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: u32,

    /// API version (for Anthropic).
    pub api_version: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_LLM_PROVIDER.to_string(),
            model: None,     // Use provider default
            base_url: None,  // Use provider default
            api_key: None,   // Load from env
            max_tokens: DEFAULT_MAX_TOKENS,
            api_version: Some(DEFAULT_ANTHROPIC_API_VERSION.to_string()),
        }
    }
}

impl LLMConfig {
    /// Get the model name, falling back to provider defaults.
    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| {
            match self.provider.as_str() {
                "anthropic" | "claude" => DEFAULT_ANTHROPIC_MODEL.to_string(),
                "ollama" => DEFAULT_OLLAMA_MODEL.to_string(),
                _ => DEFAULT_OPENAI_MODEL.to_string(),
            }
        })
    }

    /// Get the base URL, falling back to provider defaults.
    pub fn base_url_or_default(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            match self.provider.as_str() {
                "anthropic" | "claude" => DEFAULT_ANTHROPIC_URL.to_string(),
                "ollama" => DEFAULT_OLLAMA_URL.to_string(),
                "openrouter" => DEFAULT_OPENROUTER_URL.to_string(),
                _ => DEFAULT_OPENAI_URL.to_string(),
            }
        })
    }

    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ASKWEB_LLM_API_KEY").ok())
            .or_else(|| match self.provider.as_str() {
                "anthropic" | "claude" => std::env::var("ANTHROPIC_API_KEY").ok(),
                "openrouter" => std::env::var("OPENROUTER_API_KEY").ok(),
                _ => std::env::var("OPENAI_API_KEY").ok(),
            })
    }
}
