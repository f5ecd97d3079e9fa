//! Core content node types.

use serde::{Deserialize, Serialize};

/// One unit of formatted answer content.
///
/// A formatting pass turns raw answer text into an ordered sequence of
/// these nodes. Order always follows the source text, and concatenating
/// the textual payloads reproduces the input minus the consumed
/// delimiter characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentNode {
    /// Unformatted text run
    Text(String),
    /// `**bold**` emphasis
    Bold(String),
    /// `*italic*` emphasis
    Italic(String),
    /// `` `inline code` ``
    Code(String),
    /// Soft break within a paragraph
    LineBreak,
    /// A block of inline nodes delimited by blank lines
    Paragraph(Vec<ContentNode>),
}

impl ContentNode {
    /// The textual payload of this node, if it carries one.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Text(value) | Self::Bold(value) | Self::Italic(value) | Self::Code(value) => {
                Some(value)
            }
            Self::LineBreak | Self::Paragraph(_) => None,
        }
    }
}

/// Flatten a node sequence back to unformatted text.
///
/// Paragraphs are separated by a blank line and soft breaks become
/// newlines, so the result round-trips through the paragraph-aware
/// formatter unchanged when the source used well-formed delimiters.
pub fn plain_text(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            ContentNode::Paragraph(children) => {
                if !out.is_empty() {
                    out.push_str("\n\n");
                }
                out.push_str(&plain_text(children));
            }
            ContentNode::LineBreak => out.push('\n'),
            other => {
                if let Some(payload) = other.payload() {
                    out.push_str(payload);
                }
            }
        }
    }
    out
}
