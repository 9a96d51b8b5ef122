mod document;
pub mod prompts;
mod synthesizer;
mod verifier;

pub use document::{Answer, VerificationStatus};
pub use synthesizer::AnswerSynthesizer;
pub use verifier::{CitationVerifier, VerifyError};
