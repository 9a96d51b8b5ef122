use thiserror::Error;
use tracing::debug;

use crate::llm::{LLMError, LLM};
use crate::search::SearchResult;

use super::document::{Answer, VerificationStatus};
use super::prompts::{build_verify_prompt, VERDICT_REMINDER, VERIFY_SYSTEM_PROMPT};

/// Errors that can occur during citation verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    #[error("Verifier returned an unrecognized verdict: {0:?}")]
    UnexpectedVerdict(String),
}

/// Checks that an answer's citations are supported by the original search
/// results.
///
/// The collaborator contract is a two-value enumeration: the reply must
/// parse to PASS or FAIL. Rather than trusting the provider to enforce a
/// schema, the raw reply is validated locally; a non-conforming reply gets
/// one stricter re-ask before being rejected.
pub struct CitationVerifier<L: LLM> {
    llm: L,
}

impl<L: LLM> CitationVerifier<L> {
    /// Creates a new verifier over the given model.
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    /// Verifies `answer` against the raw `results` it was drawn from.
    pub async fn verify(
        &self,
        answer: &Answer,
        results: &[SearchResult],
    ) -> Result<VerificationStatus, VerifyError> {
        let prompt = build_verify_prompt(&answer.text, results);

        let completion = self
            .llm
            .complete_with_system(VERIFY_SYSTEM_PROMPT, &prompt)
            .await?;

        if let Some(status) = VerificationStatus::parse(&completion.text) {
            return Ok(status);
        }

        debug!(reply = %completion.text, "verdict did not parse, re-asking once");

        let retry_prompt = format!("{prompt}\n\n{VERDICT_REMINDER}");
        let completion = self
            .llm
            .complete_with_system(VERIFY_SYSTEM_PROMPT, &retry_prompt)
            .await?;

        VerificationStatus::parse(&completion.text)
            .ok_or(VerifyError::UnexpectedVerdict(completion.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Completion, TokenUsage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies with each canned response in turn.
    struct ScriptedLLM {
        replies: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl ScriptedLLM {
        fn new(replies: Vec<&'static str>) -> Self {
            Self {
                replies,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LLM for ScriptedLLM {
        async fn complete(&self, prompt: &str) -> Result<Completion, LLMError> {
            self.complete_with_system("", prompt).await
        }

        async fn complete_with_system(
            &self,
            _system: &str,
            _prompt: &str,
        ) -> Result<Completion, LLMError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let text = self.replies.get(call).copied().unwrap_or("FAIL");
            Ok(Completion {
                text: text.to_string(),
                usage: TokenUsage::default(),
            })
        }
    }

    fn answer() -> Answer {
        Answer {
            text: "Paris is the capital of France [1].".to_string(),
            usage: TokenUsage::default(),
        }
    }

    #[tokio::test]
    async fn test_pass_verdict() {
        let verifier = CitationVerifier::new(ScriptedLLM::new(vec!["PASS"]));
        let status = verifier.verify(&answer(), &[]).await.unwrap();
        assert_eq!(status, VerificationStatus::Pass);
    }

    #[tokio::test]
    async fn test_malformed_verdict_is_retried_once() {
        let verifier = CitationVerifier::new(ScriptedLLM::new(vec![
            "The citations all look supported to me.",
            "PASS",
        ]));
        let status = verifier.verify(&answer(), &[]).await.unwrap();
        assert_eq!(status, VerificationStatus::Pass);
    }

    #[tokio::test]
    async fn test_two_malformed_verdicts_are_an_error() {
        let verifier =
            CitationVerifier::new(ScriptedLLM::new(vec!["maybe?", "hard to say really"]));
        let result = verifier.verify(&answer(), &[]).await;
        assert!(matches!(result, Err(VerifyError::UnexpectedVerdict(_))));
    }

    #[tokio::test]
    async fn test_none_reply_maps_to_fail() {
        let verifier = CitationVerifier::new(ScriptedLLM::new(vec!["None"]));
        let status = verifier.verify(&answer(), &[]).await.unwrap();
        assert_eq!(status, VerificationStatus::Fail);
    }
}
