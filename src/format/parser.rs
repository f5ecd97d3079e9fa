//! Single-pass scanner for the restricted markdown subset.
//!
//! The backend's answer text uses only `**bold**`, `*italic*` and
//! `` `code` `` emphasis plus blank-line paragraph separators. One shared
//! scan drives both entry points: [`format_inline`] emits the flat node
//! sequence, [`format_paragraphs`] additionally splits on blank lines and
//! soft line breaks. Malformed or unterminated delimiters never fail;
//! they pass through as literal text.

use std::sync::LazyLock;

use regex::Regex;

use super::types::ContentNode;

/// Matches one emphasis span at a time. Bold is listed before italic
/// because `*` is a prefix of `**`; the content classes exclude the
/// delimiter character, so spans never nest and never cross delimiters.
static INLINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*]+)\*\*|\*([^*]+)\*|`([^`]+)`").expect("inline pattern compiles")
});

/// Format text without paragraph handling.
///
/// Returns the flat inline node sequence: emphasis spans become
/// [`ContentNode::Bold`], [`ContentNode::Italic`] or [`ContentNode::Code`],
/// everything between them becomes [`ContentNode::Text`] verbatim. Empty
/// input yields an empty sequence; input without any complete delimiter
/// pair yields a single text node.
pub fn format_inline(text: &str) -> Vec<ContentNode> {
    if text.is_empty() {
        return Vec::new();
    }
    scan(text)
}

/// Format text into paragraphs with inline emphasis and soft breaks.
///
/// Splits on blank lines (`"\n\n"`), drops paragraphs that are empty or
/// all whitespace, inline-formats each survivor, re-inserts a
/// [`ContentNode::LineBreak`] at every single-newline boundary inside
/// plain text runs, and wraps each paragraph's nodes in a
/// [`ContentNode::Paragraph`].
pub fn format_paragraphs(text: &str) -> Vec<ContentNode> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split("\n\n")
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| ContentNode::Paragraph(split_line_breaks(scan(paragraph))))
        .collect()
}

/// Left-to-right scan shared by both entry points.
fn scan(text: &str) -> Vec<ContentNode> {
    let mut nodes = Vec::new();
    let mut last = 0;
    for caps in INLINE_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            nodes.push(ContentNode::Text(text[last..whole.start()].to_string()));
        }
        let node = if let Some(bold) = caps.get(1) {
            ContentNode::Bold(bold.as_str().to_string())
        } else if let Some(italic) = caps.get(2) {
            ContentNode::Italic(italic.as_str().to_string())
        } else if let Some(code) = caps.get(3) {
            ContentNode::Code(code.as_str().to_string())
        } else {
            // Unreachable with the pattern above, but degrade to text
            // rather than fail.
            ContentNode::Text(whole.as_str().to_string())
        };
        nodes.push(node);
        last = whole.end();
    }
    if last < text.len() {
        nodes.push(ContentNode::Text(text[last..].to_string()));
    }
    nodes
}

/// Re-split plain text runs on single newlines, inserting explicit
/// line-break nodes. Emphasis payloads are never re-split; only text
/// between matches carries soft breaks.
fn split_line_breaks(nodes: Vec<ContentNode>) -> Vec<ContentNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            ContentNode::Text(value) if value.contains('\n') => {
                for (i, line) in value.split('\n').enumerate() {
                    if i > 0 {
                        out.push(ContentNode::LineBreak);
                    }
                    if !line.is_empty() {
                        out.push(ContentNode::Text(line.to_string()));
                    }
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::super::types::plain_text;
    use super::*;
    use crate::format::types::ContentNode::{Bold, Code, Italic, LineBreak, Paragraph, Text};

    fn text(s: &str) -> ContentNode {
        Text(s.to_string())
    }

    #[test]
    fn test_plain_string_yields_single_text_node() {
        assert_eq!(format_inline("just words"), vec![text("just words")]);
    }

    #[test]
    fn test_empty_input_yields_no_nodes() {
        assert_eq!(format_inline(""), Vec::new());
        assert_eq!(format_paragraphs(""), Vec::new());
    }

    #[test]
    fn test_bold_with_trailing_text() {
        assert_eq!(
            format_inline("**hello** world"),
            vec![Bold("hello".into()), text(" world")]
        );
    }

    #[test]
    fn test_italic_alone() {
        assert_eq!(format_inline("*hi*"), vec![Italic("hi".into())]);
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(format_inline("`x=1`"), vec![Code("x=1".into())]);
    }

    #[test]
    fn test_all_three_kinds_in_order() {
        assert_eq!(
            format_inline("use **bold**, *italic* and `code`."),
            vec![
                text("use "),
                Bold("bold".into()),
                text(", "),
                Italic("italic".into()),
                text(" and "),
                Code("code".into()),
                text("."),
            ]
        );
    }

    #[test]
    fn test_unterminated_bold_stays_literal() {
        assert_eq!(format_inline("**broken"), vec![text("**broken")]);
    }

    #[test]
    fn test_lone_backtick_stays_literal() {
        assert_eq!(format_inline("a ` b"), vec![text("a ` b")]);
    }

    // Bold content excludes `*`, so a star inside the span prevents the
    // bold match entirely and the inner italic wins instead.
    #[test]
    fn test_star_inside_bold_falls_back_to_italic() {
        assert_eq!(
            format_inline("**a*b**"),
            vec![text("*"), Italic("a".into()), text("b**")]
        );
    }

    #[test]
    fn test_adjacent_spans_without_gap() {
        assert_eq!(
            format_inline("**a**`b`"),
            vec![Bold("a".into()), Code("b".into())]
        );
    }

    #[test]
    fn test_paragraph_split_on_blank_line() {
        assert_eq!(
            format_paragraphs("A\n\nB"),
            vec![
                Paragraph(vec![text("A")]),
                Paragraph(vec![text("B")]),
            ]
        );
    }

    #[test]
    fn test_single_newline_becomes_line_break() {
        assert_eq!(
            format_paragraphs("line1\nline2"),
            vec![Paragraph(vec![text("line1"), LineBreak, text("line2")])]
        );
    }

    #[test]
    fn test_whitespace_only_paragraph_is_dropped() {
        assert_eq!(
            format_paragraphs("A\n\n   \n\nB"),
            vec![
                Paragraph(vec![text("A")]),
                Paragraph(vec![text("B")]),
            ]
        );
    }

    #[test]
    fn test_paragraph_keeps_original_spacing() {
        assert_eq!(
            format_paragraphs("  padded  "),
            vec![Paragraph(vec![text("  padded  ")])]
        );
    }

    #[test]
    fn test_emphasis_payload_is_not_resplit_on_newline() {
        assert_eq!(
            format_paragraphs("**a\nb**"),
            vec![Paragraph(vec![Bold("a\nb".into())])]
        );
    }

    #[test]
    fn test_emphasis_survives_inside_paragraphs() {
        assert_eq!(
            format_paragraphs("The **key** point.\n\nSee `docs` for *more*."),
            vec![
                Paragraph(vec![text("The "), Bold("key".into()), text(" point.")]),
                Paragraph(vec![
                    text("See "),
                    Code("docs".into()),
                    text(" for "),
                    Italic("more".into()),
                    text("."),
                ]),
            ]
        );
    }

    #[test]
    fn test_leading_newline_inside_paragraph() {
        // "A\n\n\nB" splits into ["A", "\nB"]; the stray newline becomes
        // a soft break at the start of the second paragraph.
        assert_eq!(
            format_paragraphs("A\n\n\nB"),
            vec![
                Paragraph(vec![text("A")]),
                Paragraph(vec![LineBreak, text("B")]),
            ]
        );
    }

    #[test]
    fn test_plain_text_projection_is_idempotent_on_well_formed_input() {
        let source = "**Rust** is a *systems* language.\n\nIt uses `cargo` for builds.\nAnd it is fast.";
        let first = plain_text(&format_paragraphs(source));
        let second = plain_text(&format_paragraphs(&first));
        assert_eq!(first, second);
    }

    /// Rebuild the source by re-inserting the delimiters the scan consumed.
    fn reconstruct(nodes: &[ContentNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Text(v) => out.push_str(v),
                Bold(v) => {
                    out.push_str("**");
                    out.push_str(v);
                    out.push_str("**");
                }
                Italic(v) => {
                    out.push('*');
                    out.push_str(v);
                    out.push('*');
                }
                Code(v) => {
                    out.push('`');
                    out.push_str(v);
                    out.push('`');
                }
                LineBreak | Paragraph(_) => unreachable!("inline scan emits no structure"),
            }
        }
        out
    }

    proptest! {
        #[test]
        fn prop_delimiter_free_input_is_one_text_node(s in "[^*`]{1,64}") {
            prop_assert_eq!(format_inline(&s), vec![Text(s)]);
        }

        #[test]
        fn prop_content_round_trips_with_delimiters(s in ".{0,128}") {
            prop_assert_eq!(reconstruct(&format_inline(&s)), s);
        }

        #[test]
        fn prop_projection_idempotent_without_delimiters(s in "[^*`]{0,128}") {
            let first = plain_text(&format_paragraphs(&s));
            let second = plain_text(&format_paragraphs(&first));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_paragraph_count_matches_non_blank_segments(
            segments in proptest::collection::vec("[a-z ]{0,12}", 1..6)
        ) {
            let joined = segments.join("\n\n");
            let expected = segments.iter().filter(|s| !s.trim().is_empty()).count();
            prop_assert_eq!(format_paragraphs(&joined).len(), expected);
        }
    }
}
