use serde::{Deserialize, Serialize};

use crate::llm::TokenUsage;

/// The synthesized answer to a question, with the token usage that
/// producing it cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Natural-language answer text with inline numbered citations.
    pub text: String,
    /// Token accounting for the synthesis call.
    pub usage: TokenUsage,
}

/// Verdict on whether an answer's citations are supported by its sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Every citation is supported by the source material.
    Pass,
    /// At least one citation lacks support, or no support was found at all.
    Fail,
}

impl VerificationStatus {
    /// Returns the literal the verifier contract uses for this verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pass => "PASS",
            VerificationStatus::Fail => "FAIL",
        }
    }

    /// Strictly parses a model reply into one of the two verdicts.
    ///
    /// Accepts the bare literal (any case, optional trailing punctuation),
    /// the literal wrapped in a code fence, or a `{"status": "..."}` JSON
    /// object. A reply of "NONE" - the escape hatch for "no citation or
    /// source found" - counts as absence of support and maps to `Fail`.
    /// Anything else is rejected with `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let unfenced = strip_code_fence(raw);

        // Structured replies: {"status": "PASS"}
        if let Ok(reply) = serde_json::from_str::<StatusReply>(unfenced) {
            return Self::parse_literal(&reply.status);
        }

        Self::parse_literal(unfenced)
    }

    fn parse_literal(raw: &str) -> Option<Self> {
        let token = raw
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '!');

        if token.eq_ignore_ascii_case("PASS") {
            Some(VerificationStatus::Pass)
        } else if token.eq_ignore_ascii_case("FAIL") || token.eq_ignore_ascii_case("NONE") {
            Some(VerificationStatus::Fail)
        } else {
            None
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct StatusReply {
    status: String,
}

/// Strips a markdown code fence from a reply, if present.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        if let Some(start) = trimmed.find('\n') {
            let rest = &trimmed[start + 1..];
            if let Some(end) = rest.rfind("```") {
                return rest[..end].trim();
            }
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_literals() {
        assert_eq!(
            VerificationStatus::parse("PASS"),
            Some(VerificationStatus::Pass)
        );
        assert_eq!(
            VerificationStatus::parse("fail"),
            Some(VerificationStatus::Fail)
        );
        assert_eq!(
            VerificationStatus::parse("  PASS.  "),
            Some(VerificationStatus::Pass)
        );
    }

    #[test]
    fn test_parse_json_reply() {
        assert_eq!(
            VerificationStatus::parse(r#"{"status": "PASS"}"#),
            Some(VerificationStatus::Pass)
        );
        assert_eq!(
            VerificationStatus::parse(r#"{"status": "FAIL"}"#),
            Some(VerificationStatus::Fail)
        );
    }

    #[test]
    fn test_parse_fenced_reply() {
        assert_eq!(
            VerificationStatus::parse("```json\n{\"status\": \"PASS\"}\n```"),
            Some(VerificationStatus::Pass)
        );
    }

    #[test]
    fn test_none_maps_to_fail() {
        assert_eq!(
            VerificationStatus::parse("None"),
            Some(VerificationStatus::Fail)
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(VerificationStatus::parse("The citations look fine."), None);
        assert_eq!(VerificationStatus::parse(""), None);
    }
}
