mod error;
mod claude;
mod openai;
mod provider;

pub use error::LLMError;
pub use claude::ClaudeClient;
pub use openai::OpenAIClient;
pub use provider::Provider;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token accounting for one model invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub input_tokens: u32,
    /// Tokens produced in the response.
    pub output_tokens: u32,
    /// Sum of input and output tokens.
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates a usage record, deriving the total from the parts.
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// A completed model response: the text plus its token accounting.
#[derive(Debug, Clone)]
pub struct Completion {
    /// The response text.
    pub text: String,
    /// Token usage reported by the provider.
    pub usage: TokenUsage,
}

/// Trait for Large Language Model providers.
///
/// This abstraction allows swapping between different LLM providers
/// without changing the rest of the code. Every completion carries the
/// provider's token usage so callers can surface cost telemetry.
///
/// # Supported Providers
///
/// - **OpenAI-compatible** (default): Works with OpenAI, Azure, Ollama, vLLM, OpenRouter, etc.
/// - **Anthropic**: Claude models via Anthropic API
///
/// # Example
///
/// ```ignore
/// use askweb_core::llm::{Provider, LLM};
///
/// // Auto-detect from environment
/// let llm = Provider::from_env()?;
///
/// let completion = llm.complete("Hello!").await?;
/// println!("{} ({} tokens)", completion.text, completion.usage.total_tokens);
/// ```
#[async_trait]
pub trait LLM: Send + Sync {
    /// Complete a prompt and return the response with usage.
    async fn complete(&self, prompt: &str) -> Result<Completion, LLMError>;

    /// Complete a prompt with a system message.
    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<Completion, LLMError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl LLM for Box<dyn LLM> {
    async fn complete(&self, prompt: &str) -> Result<Completion, LLMError> {
        (**self).complete(prompt).await
    }

    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<Completion, LLMError> {
        (**self).complete_with_system(system, prompt).await
    }
}

/// Shared trait objects, so one client can serve several pipeline stages.
#[async_trait]
impl LLM for Arc<dyn LLM> {
    async fn complete(&self, prompt: &str) -> Result<Completion, LLMError> {
        (**self).complete(prompt).await
    }

    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<Completion, LLMError> {
        (**self).complete_with_system(system, prompt).await
    }
}
