use crate::llm::{LLMError, LLM};
use crate::scrape::ScrapedChunk;

use super::document::Answer;
use super::prompts::{build_synthesis_prompt, SYNTHESIS_SYSTEM_PROMPT};

/// Produces a cited answer from a question and its merged context chunks.
pub struct AnswerSynthesizer<L: LLM> {
    llm: L,
}

impl<L: LLM> AnswerSynthesizer<L> {
    /// Creates a new synthesizer over the given model.
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    /// Generates an answer for `question` grounded in `chunks`.
    ///
    /// An empty chunk set is not an error: the model is invoked with an
    /// empty-context marker and is expected to answer that it lacks
    /// information.
    pub async fn synthesize(
        &self,
        question: &str,
        chunks: &[ScrapedChunk],
    ) -> Result<Answer, LLMError> {
        let prompt = build_synthesis_prompt(question, chunks);

        let completion = self
            .llm
            .complete_with_system(SYNTHESIS_SYSTEM_PROMPT, &prompt)
            .await?;

        Ok(Answer {
            text: completion.text,
            usage: completion.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Completion, TokenUsage};
    use async_trait::async_trait;

    struct StubLLM;

    #[async_trait]
    impl LLM for StubLLM {
        async fn complete(&self, prompt: &str) -> Result<Completion, LLMError> {
            self.complete_with_system("", prompt).await
        }

        async fn complete_with_system(
            &self,
            _system: &str,
            _prompt: &str,
        ) -> Result<Completion, LLMError> {
            Ok(Completion {
                text: "Paris is the capital of France [1].".to_string(),
                usage: TokenUsage::new(10, 5),
            })
        }
    }

    #[tokio::test]
    async fn test_synthesize_returns_answer_with_usage() {
        let synthesizer = AnswerSynthesizer::new(StubLLM);
        let answer = synthesizer.synthesize("capital of France", &[]).await.unwrap();

        assert_eq!(answer.text, "Paris is the capital of France [1].");
        assert_eq!(answer.usage.total_tokens, 15);
    }
}
