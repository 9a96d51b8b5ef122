use std::sync::OnceLock;

use regex::Regex;

// Compiled once; rebuilding per page would dominate the cleanup cost.
static SPACE_RUNS: OnceLock<Regex> = OnceLock::new();
static BLANK_LINES: OnceLock<Regex> = OnceLock::new();

fn space_runs() -> &'static Regex {
    SPACE_RUNS.get_or_init(|| Regex::new(r"[ \t]+").unwrap())
}

fn blank_lines() -> &'static Regex {
    BLANK_LINES.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

/// Keeps the leading `fraction` of `text` (by character count) and cleans it.
///
/// Leading content is assumed most relevant (article ledes come first), and
/// downstream model context is bounded, so the tail is dropped before
/// chunking. Cleanup removes control characters left over from HTML
/// flattening and collapses whitespace runs. Empty input yields empty
/// output; the result never exceeds the input in length.
pub fn reduce_text(text: &str, fraction: f64) -> String {
    if text.is_empty() {
        return String::new();
    }

    let total = text.chars().count();
    let keep = ((total as f64) * fraction) as usize;
    let prefix: String = text.chars().take(keep).collect();

    clean_text(&prefix)
}

/// Strips non-informative characters and collapses excess whitespace.
fn clean_text(text: &str) -> String {
    let without_control: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let collapsed = space_runs().replace_all(&without_control, " ");
    let collapsed = blank_lines().replace_all(&collapsed, "\n\n");

    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert_eq!(reduce_text("", 0.3), "");
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let text = "This is a test document. ".repeat(100);
        let reduced = reduce_text(&text, 0.3);
        assert!(reduced.len() <= text.len());
        assert!(reduced.contains("test document"));
    }

    #[test]
    fn test_reduction_is_deterministic() {
        let text = "Paris is the capital of France. ".repeat(50);
        assert_eq!(reduce_text(&text, 0.3), reduce_text(&text, 0.3));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let reduced = reduce_text("Paris   is\t\tthe capital.\n\n\n\n\nOf France.", 1.0);
        assert_eq!(reduced, "Paris is the capital.\n\nOf France.");
    }

    #[test]
    fn test_control_characters_stripped() {
        let reduced = reduce_text("Par\u{0}is\u{7} is nice", 1.0);
        assert_eq!(reduced, "Paris is nice");
    }

    #[test]
    fn test_full_fraction_keeps_everything() {
        let text = "short text";
        assert_eq!(reduce_text(text, 1.0), "short text");
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let text = "Ünïcode tëxt — with wide characters: 日本語のテキスト".repeat(10);
        let reduced = reduce_text(&text, 0.3);
        assert!(reduced.chars().count() <= text.chars().count());
    }
}
