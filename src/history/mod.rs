//! Local search history.
//!
//! Recent queries are kept most-recent-first, deduplicated, capped at
//! [`MAX_ENTRIES`], and persisted as a JSON array next to the config
//! file. History is a convenience: callers treat load/save failures as
//! warnings, never as fatal errors.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of queries retained.
pub const MAX_ENTRIES: usize = 8;

/// Ordered list of recent queries, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Load history from `path`. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read history {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history {}", path.display()))
    }

    /// Write history to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create history dir {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to encode history")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write history {}", path.display()))
    }

    /// Record a query: trimmed, deduplicated, inserted at the front,
    /// capped at [`MAX_ENTRIES`]. Blank queries are ignored.
    pub fn push(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_ENTRIES);
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The `count` most recent entries.
    pub fn recent(&self, count: usize) -> &[String] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_inserts_most_recent_first() {
        let mut history = SearchHistory::default();
        history.push("first");
        history.push("second");
        assert_eq!(history.entries(), ["second", "first"]);
    }

    #[test]
    fn test_push_deduplicates_and_promotes() {
        let mut history = SearchHistory::default();
        history.push("a");
        history.push("b");
        history.push("a");
        assert_eq!(history.entries(), ["a", "b"]);
    }

    #[test]
    fn test_push_trims_and_ignores_blank() {
        let mut history = SearchHistory::default();
        history.push("  padded  ");
        history.push("   ");
        history.push("");
        assert_eq!(history.entries(), ["padded"]);
    }

    #[test]
    fn test_push_caps_entries() {
        let mut history = SearchHistory::default();
        for i in 0..12 {
            history.push(&format!("query {i}"));
        }
        assert_eq!(history.entries().len(), MAX_ENTRIES);
        assert_eq!(history.entries()[0], "query 11");
    }

    #[test]
    fn test_recent_limits_without_panicking() {
        let mut history = SearchHistory::default();
        history.push("only");
        assert_eq!(history.recent(4), ["only"]);
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = SearchHistory::load(&dir.path().join("none.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let mut history = SearchHistory::default();
        history.push("what is rust?");
        history.push("explain quantum computing");
        history.save(&path).unwrap();

        let loaded = SearchHistory::load(&path).unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(SearchHistory::load(&path).is_err());
    }
}
