//! HTML-to-text normalization with line-break preservation.
//!
//! Converts extracted article HTML into plain text while keeping the
//! paragraph and line structure readable: `<br>` becomes one newline, each
//! `<p>` becomes its text followed by a blank line, and the result is
//! cleaned up so that line endings are uniform and paragraph gaps never
//! exceed one blank line.
//!
//! The whole transformation is idempotent: running [`normalize`] over its
//! own output returns it unchanged.

use regex::Regex;
use scraper::ego_tree::NodeRef;
use scraper::{Html, Node};

/// Converts an HTML fragment to plain text.
///
/// Structural rules, applied in order:
/// 1. every `<br>` contributes exactly one `\n`;
/// 2. every `<p>` contributes its flattened text content followed by
///    exactly `\n\n` (the paragraph's text is read before it is replaced,
///    so `<br>` inside a paragraph has already become `\n`);
/// 3. all remaining markup is flattened to its text content;
/// 4. `\r\n` and bare `\r` become `\n`;
/// 5. any run of three or more newlines collapses to two.
///
/// # Example
///
/// ```rust
/// use textgate_core::normalize::normalize;
///
/// let text = normalize("<p>Hello</p><br><p>World</p>");
/// assert_eq!(text, "Hello\n\nWorld\n\n");
/// ```
pub fn normalize(content_html: &str) -> String {
    let fragment = Html::parse_fragment(content_html);

    let mut out = String::new();
    emit_text(*fragment.root_element(), &mut out);

    collapse_newlines(&normalize_line_endings(&out))
}

/// Replaces `\r\n` and bare `\r` with `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Collapses runs of three or more newlines down to exactly two.
///
/// Idempotent; also serves as the final pass that absorbs doubled blank
/// lines from nested structures.
pub fn collapse_newlines(text: &str) -> String {
    let re = Regex::new(r"\n{3,}").unwrap();
    re.replace_all(text, "\n\n").to_string()
}

/// Walk the fragment, honoring the break and paragraph rules.
fn emit_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }

        if let Some(element) = child.value().as_element() {
            match element.name() {
                "br" => out.push('\n'),
                "p" => {
                    flatten_text(child, out);
                    out.push_str("\n\n");
                }
                "script" | "style" => {}
                _ => emit_text(child, out),
            }
        }
    }
}

/// Flatten a paragraph's subtree to text, with `<br>` as newline.
///
/// Paragraphs are not expected to nest; an inner `<p>` simply contributes
/// its text here and the final collapse pass absorbs any extra newlines.
fn flatten_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }

        if let Some(element) = child.value().as_element() {
            match element.name() {
                "br" => out.push('\n'),
                "script" | "style" => {}
                _ => flatten_text(child, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_paragraphs_and_break() {
        let text = normalize("<p>Hello</p><br><p>World</p>");
        assert_eq!(text, "Hello\n\nWorld\n\n");
    }

    #[test]
    fn test_br_becomes_single_newline() {
        let text = normalize("line one<br>line two");
        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn test_br_inside_paragraph() {
        let text = normalize("<p>first<br>second</p>");
        assert_eq!(text, "first\nsecond\n\n");
    }

    #[test]
    fn test_inline_markup_flattened() {
        let text = normalize("<p>Text with <strong>bold</strong> and <em>italic</em>.</p>");
        assert_eq!(text, "Text with bold and italic.\n\n");
    }

    #[test]
    fn test_collapse_newlines_run() {
        assert_eq!(collapse_newlines("A\n\n\n\n\nB"), "A\n\nB");
    }

    #[test]
    fn test_collapse_preserves_single_and_double() {
        assert_eq!(collapse_newlines("A\nB\n\nC"), "A\nB\n\nC");
    }

    #[test]
    fn test_mixed_line_endings() {
        assert_eq!(normalize_line_endings("A\r\nB\rC"), "A\nB\nC");
    }

    #[test]
    fn test_normalize_mixed_line_endings_end_to_end() {
        let text = normalize("A\r\nB\rC");
        assert_eq!(text, "A\nB\nC");
    }

    #[rstest]
    #[case("<p>Hello</p><br><p>World</p>")]
    #[case("<div><p>One</p><p>Two</p><br><br><br><p>Three</p></div>")]
    #[case("plain text, no markup at all")]
    #[case("<p>nested <span>inline <b>deep</b></span> text</p>")]
    #[case("")]
    fn test_normalize_idempotent(#[case] html: &str) {
        let once = normalize(html);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_consecutive_breaks_collapse() {
        let text = normalize("A<br><br><br><br>B");
        assert_eq!(text, "A\n\nB");
    }

    #[test]
    fn test_nested_paragraph_flattens() {
        // The parser already splits <p><p> into siblings; a div wrapper
        // keeps the outer structure while the inner text survives.
        let text = normalize("<div><p>outer</p><p>inner</p></div>");
        assert_eq!(text, "outer\n\ninner\n\n");
    }

    #[test]
    fn test_script_content_dropped() {
        let text = normalize("<p>keep</p><script>var x = 1;</script>");
        assert_eq!(text, "keep\n\n");
    }

    #[test]
    fn test_empty_fragment() {
        assert_eq!(normalize(""), "");
    }
}
