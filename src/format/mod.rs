//! Answer text formatting.
//!
//! This module handles:
//! - Scanning answer text for the restricted markdown subset the backend
//!   emits (`**bold**`, `*italic*`, `` `code` ``)
//! - Splitting text into paragraphs and soft line breaks
//! - Producing typed content nodes for styled rendering

mod parser;
mod types;

pub use parser::{format_inline, format_paragraphs};
pub use types::{ContentNode, plain_text};
