//! Renderers for answers and backend metadata.

use crossterm::style::Stylize;

use crate::api::{CacheStats, HealthResponse, QueryResponse, SearchResult};
use crate::format::{ContentNode, format_paragraphs, plain_text};

use super::{HISTORY_PREVIEW_CHARS, SOURCE_PREVIEW_CHARS};

/// Format and render raw answer text.
pub fn render_answer(answer: &str, styled: bool) -> String {
    let nodes = format_paragraphs(answer);
    if styled {
        render_nodes(&nodes)
    } else {
        plain_text(&nodes)
    }
}

/// Render a node sequence with terminal attributes.
///
/// Bold and italic map to their terminal attributes, inline code gets a
/// distinct color, soft breaks become newlines and paragraphs are
/// separated by a blank line.
pub fn render_nodes(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            ContentNode::Paragraph(children) => {
                if !out.is_empty() {
                    out.push_str("\n\n");
                }
                out.push_str(&render_nodes(children));
            }
            ContentNode::LineBreak => out.push('\n'),
            ContentNode::Text(value) => out.push_str(value),
            ContentNode::Bold(value) => out.push_str(&value.as_str().bold().to_string()),
            ContentNode::Italic(value) => out.push_str(&value.as_str().italic().to_string()),
            ContentNode::Code(value) => out.push_str(&value.as_str().dark_yellow().to_string()),
        }
    }
    out
}

/// Render the source cards below an answer.
pub fn render_sources(sources: &[SearchResult], styled: bool) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    let header = format!("Sources ({})", sources.len());
    if styled {
        out.push_str(&header.as_str().bold().to_string());
    } else {
        out.push_str(&header);
    }
    for (i, source) in sources.iter().enumerate() {
        let title = source
            .title
            .clone()
            .unwrap_or_else(|| format!("Source {}", i + 1));
        let preview = truncate_chars(&source.content, SOURCE_PREVIEW_CHARS);
        out.push('\n');
        if styled {
            out.push_str(&format!(
                "  {}\n  {}\n  {}",
                title.as_str().bold(),
                source.url.as_str().underlined(),
                preview.as_str().dim(),
            ));
        } else {
            out.push_str(&format!("  {title}\n  {}\n  {preview}", source.url));
        }
    }
    out
}

/// Render response metadata: cached badge and processing time.
pub fn render_meta(response: &QueryResponse, styled: bool) -> String {
    let mut parts = Vec::new();
    if response.cached {
        parts.push("[cached]".to_string());
    }
    if let Some(seconds) = response.processing_time {
        parts.push(format!("{seconds:.1}s"));
    }
    let line = parts.join(" ");
    if styled && !line.is_empty() {
        line.as_str().dim().to_string()
    } else {
        line
    }
}

/// Render backend cache statistics.
pub fn render_stats(stats: &CacheStats, styled: bool) -> String {
    let cache = if stats.cache_enabled {
        "enabled"
    } else {
        "disabled"
    };
    let line = format!(
        "{} cached queries, index size {}, cache {cache}",
        stats.total_cached_queries, stats.faiss_index_size
    );
    if styled {
        line.as_str().dim().to_string()
    } else {
        line
    }
}

/// Render a health check result.
pub fn render_health(health: &HealthResponse, styled: bool) -> String {
    let line = format!(
        "backend {} (version {}, {})",
        health.status, health.version, health.timestamp
    );
    if styled && health.status == "healthy" {
        line.as_str().green().to_string()
    } else {
        line
    }
}

/// Render recent searches, one numbered line each.
pub fn render_history(entries: &[String], styled: bool) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let preview = truncate_chars(entry, HISTORY_PREVIEW_CHARS);
        let number = format!("{}.", i + 1);
        if styled {
            out.push_str(&format!("  {} {preview}", number.as_str().dim()));
        } else {
            out.push_str(&format!("  {number} {preview}"));
        }
    }
    out
}

/// Truncate to `max` characters on a char boundary, appending an
/// ellipsis when anything was cut.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}
