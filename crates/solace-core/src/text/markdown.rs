//! Markdown stripping for speech-safe text.
//!
//! Synthesized speech should not read out markup, so the assembler strips
//! markdown syntax from the display text before handing it to the speech
//! collaborator. The transformation is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.+?)`").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static BOLD_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(.+?)_").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s*").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Strips markdown syntax, leaving plain speakable text.
///
/// Code fences are dropped entirely; inline code, emphasis markers, and
/// heading markers are unwrapped; links collapse to their link text;
/// blank-line runs collapse to a single newline.
pub fn strip_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped = CODE_FENCE.replace_all(text, "");
    let stripped = INLINE_CODE.replace_all(&stripped, "$1");
    let stripped = BOLD.replace_all(&stripped, "$1");
    let stripped = ITALIC.replace_all(&stripped, "$1");
    let stripped = BOLD_UNDERSCORE.replace_all(&stripped, "$1");
    let stripped = ITALIC_UNDERSCORE.replace_all(&stripped, "$1");
    let stripped = LINK.replace_all(&stripped, "$1");
    let stripped = HEADING.replace_all(&stripped, "");
    let stripped = BLANK_RUN.replace_all(&stripped, "\n");
    stripped.replace(['*', '`'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis_and_code() {
        assert_eq!(strip_markdown("**bold** and *italic*"), "bold and italic");
        assert_eq!(strip_markdown("use `deep breathing`"), "use deep breathing");
        assert_eq!(strip_markdown("__strong__ _soft_"), "strong soft");
    }

    #[test]
    fn drops_code_fences() {
        let text = "before\n```rust\nlet x = 1;\n```\nafter";
        assert_eq!(strip_markdown(text), "before\nafter");
    }

    #[test]
    fn links_collapse_to_text() {
        assert_eq!(
            strip_markdown("see [this guide](https://example.com/guide)"),
            "see this guide"
        );
    }

    #[test]
    fn heading_markers_removed() {
        assert_eq!(strip_markdown("## Breathing\ntry it"), "Breathing\ntry it");
    }

    #[test]
    fn blank_runs_collapse() {
        assert_eq!(strip_markdown("one\n\n\ntwo"), "one\ntwo");
    }

    #[test]
    fn stray_markers_removed() {
        assert_eq!(strip_markdown("a * lone marker `"), "a  lone marker");
    }

    #[test]
    fn empty_input() {
        assert_eq!(strip_markdown(""), "");
    }

    #[test]
    fn stripping_is_idempotent() {
        let samples = [
            "**bold** with [link](https://x.y) and `code`",
            "# Heading\n\n\nbody _text_ here",
            "plain text stays plain",
            "mixed *em* and __strong__\n\nparagraph",
        ];
        for sample in samples {
            let once = strip_markdown(sample);
            let twice = strip_markdown(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }
}
