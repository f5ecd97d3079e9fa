//! Terminal output for answers, sources and backend status.
//!
//! Rendering maps each content node variant to a crossterm attribute
//! (bold, italic, a colored style for inline code) and lays out sources
//! and response metadata below the answer. Every renderer takes a
//! `styled` flag; with styling off the output is plain text, suitable
//! for pipes and `--plain`.

mod render;

pub use render::{
    render_answer, render_health, render_history, render_meta, render_nodes, render_sources,
    render_stats,
};

/// Characters of source content shown per source card.
pub const SOURCE_PREVIEW_CHARS: usize = 150;

/// Characters of a history entry shown per line.
pub const HISTORY_PREVIEW_CHARS: usize = 40;

/// Number of recent searches offered in the interactive banner.
pub const RECENT_SEARCHES: usize = 4;
