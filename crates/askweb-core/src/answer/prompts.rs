use crate::scrape::ScrapedChunk;
use crate::search::SearchResult;

/// System prompt for answer synthesis.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = r#"You are an informative assistant. Use only the provided context to clearly answer the question.
If you don't know the answer, just say that you don't know; don't try to make up an answer.

Cite sources using square brackets with numbers (e.g., [1], [2]). At the end, include a "Sources" section
listing each number, title, and URL. Numbering should always start from 1.

Example:

Question: What are the main features of the Rust programming language?

Answer:
Rust is a systems programming language focused on memory safety without garbage collection [1].
It is used for CLIs, network services, and embedded software [2].

Sources:
[1] Rust Book, https://doc.rust-lang.org/book/
[2] Rust Homepage, https://www.rust-lang.org/"#;

/// System prompt for citation verification.
pub const VERIFY_SYSTEM_PROMPT: &str = r#"Given an answer with citations and the corresponding source snippets,
determine whether each citation genuinely supports the sentence it is attached to.

Respond with exactly one word: PASS if every citation supports its sentence, otherwise FAIL.
If no citation or source is found, respond FAIL.
Do not add any explanation."#;

/// Sent when the verifier replies with something other than the two verdict
/// literals.
pub const VERDICT_REMINDER: &str =
    "Your previous reply was not a valid verdict. Respond with exactly one word: PASS or FAIL.";

/// Builds the user prompt for answer synthesis.
pub fn build_synthesis_prompt(question: &str, chunks: &[ScrapedChunk]) -> String {
    format!(
        "Question: {question}\n\nContext:\n{context}",
        context = format_context(chunks)
    )
}

/// Builds the user prompt for citation verification.
pub fn build_verify_prompt(answer_text: &str, results: &[SearchResult]) -> String {
    format!(
        "Answer:\n{answer_text}\n\nSources:\n{sources}",
        sources = format_sources(results)
    )
}

/// Formats merged chunks into a context block, each chunk tagged with its
/// source URL.
fn format_context(chunks: &[ScrapedChunk]) -> String {
    if chunks.is_empty() {
        return "(no context was found)".to_string();
    }

    chunks
        .iter()
        .map(|chunk| format!("[source: {}]\n{}", chunk.source, chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Formats raw search results into a sources block for verification.
fn format_sources(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "(no sources)".to_string();
    }

    results
        .iter()
        .map(|r| format!("- {} ({})\n  {}", r.title, r.link, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}
