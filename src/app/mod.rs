//! Application modes wiring the client, formatter and history together.
//!
//! [`App`] owns the API client, the request defaults and the persisted
//! search history. It drives two modes: a one-shot query from the
//! command line, and an interactive prompt loop that mirrors the query
//! page (banner with cache stats, suggestions or recent searches, then
//! query after query until `:quit`).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use tracing::warn;

use crate::api::{ApiClient, ApiError, DEFAULT_MAX_RESULTS, QueryRequest};
use crate::config::{SearchEngine, default_history_path};
use crate::history::SearchHistory;
use crate::ui;

/// Queries offered in the interactive banner while history is empty.
const QUICK_SUGGESTIONS: [&str; 4] = [
    "What are the latest AI developments?",
    "Explain quantum computing",
    "Best practices for web development",
    "Climate change solutions 2024",
];

/// Main application struct owning the client and local state.
pub struct App {
    client: ApiClient,
    engine: SearchEngine,
    max_results: u8,
    use_cache: bool,
    styled: bool,
    history_path: PathBuf,
    history: SearchHistory,
}

impl App {
    /// Create an application around a backend client.
    pub fn new(client: ApiClient) -> Self {
        let history_path = default_history_path();
        let history = SearchHistory::load(&history_path).unwrap_or_else(|err| {
            warn!("ignoring unreadable history: {err:#}");
            SearchHistory::default()
        });
        Self {
            client,
            engine: SearchEngine::Bing,
            max_results: DEFAULT_MAX_RESULTS,
            use_cache: true,
            styled: false,
            history_path,
            history,
        }
    }

    /// Set the search engine the backend should use.
    pub const fn with_engine(mut self, engine: SearchEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the number of results requested per query.
    pub const fn with_max_results(mut self, max_results: u8) -> Self {
        self.max_results = max_results;
        self
    }

    /// Enable or disable the backend answer cache.
    pub const fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Enable or disable ANSI styling.
    pub const fn with_styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Override the history file location.
    pub fn with_history_path(mut self, path: PathBuf) -> Self {
        self.history = SearchHistory::load(&path).unwrap_or_else(|err| {
            warn!("ignoring unreadable history: {err:#}");
            SearchHistory::default()
        });
        self.history_path = path;
        self
    }

    /// Submit one query, print the formatted answer, and record it.
    pub fn run_query(&mut self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            anyhow::bail!("query must not be empty");
        }
        self.status_line("Searching and analyzing, this may take a while for new queries...");
        let request = QueryRequest {
            query: query.to_string(),
            max_results: self.max_results,
            search_engine: self.engine.as_str().to_string(),
            use_cache: self.use_cache,
        };
        let response = self.client.query(&request).context("Query failed")?;

        let mut out = io::stdout().lock();
        writeln!(out, "{}", ui::render_answer(&response.answer, self.styled))?;
        let meta = ui::render_meta(&response, self.styled);
        if !meta.is_empty() {
            writeln!(out, "\n{meta}")?;
        }
        let sources = ui::render_sources(&response.sources, self.styled);
        if !sources.is_empty() {
            writeln!(out, "\n{sources}")?;
        }
        drop(out);

        self.history.push(query);
        if let Err(err) = self.history.save(&self.history_path) {
            warn!("failed to save history: {err:#}");
        }
        Ok(())
    }

    /// Prompt loop: banner, then one query per line until `:quit` or EOF.
    pub fn run_interactive(&mut self) -> Result<()> {
        self.print_banner();
        let stdin = io::stdin();
        loop {
            self.prompt()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let input = line.trim();
            match input {
                "" => {}
                ":quit" | ":q" => break,
                ":help" => self.print_help(),
                ":history" => self.show_history()?,
                ":stats" => {
                    if let Err(err) = self.show_stats() {
                        self.error_line(&format!("{err:#}"));
                    }
                }
                query => {
                    if let Err(err) = self.run_query(query) {
                        self.error_line(&format!("{err:#}"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Print backend health and exit status.
    pub fn show_health(&self) -> Result<()> {
        let health = self.client.health().context("Health check failed")?;
        println!("{}", ui::render_health(&health, self.styled));
        Ok(())
    }

    /// Print backend cache statistics.
    pub fn show_stats(&self) -> Result<()> {
        let stats = self
            .client
            .cache_stats()
            .context("Failed to fetch cache stats")?;
        println!("{}", ui::render_stats(&stats, self.styled));
        Ok(())
    }

    /// Warm up the backend AI service.
    pub fn run_initialize(&self) -> Result<()> {
        let response = self
            .client
            .initialize()
            .context("Failed to initialize backend")?;
        println!("{}", response.message);
        Ok(())
    }

    /// Print the saved search history.
    pub fn show_history(&self) -> Result<()> {
        if self.history.is_empty() {
            println!("no saved searches");
        } else {
            println!(
                "{}",
                ui::render_history(self.history.entries(), self.styled)
            );
        }
        Ok(())
    }

    fn print_banner(&self) {
        println!("askweb - ask me anything about the web");
        match self.client.cache_stats() {
            Ok(stats) => println!("{}", ui::render_stats(&stats, self.styled)),
            Err(ApiError::Backend { message, .. }) => warn!("cache stats unavailable: {message}"),
            Err(err) => warn!("cache stats unavailable: {err}"),
        }
        println!();
        if self.history.is_empty() {
            println!("Try asking about:");
            for suggestion in QUICK_SUGGESTIONS {
                println!("  - {suggestion}");
            }
        } else {
            println!("Recent searches:");
            println!(
                "{}",
                ui::render_history(self.history.recent(ui::RECENT_SEARCHES), self.styled)
            );
        }
        println!();
        println!("Type a query, or :help for commands.");
    }

    fn print_help(&self) {
        println!(":help     show this help");
        println!(":history  show saved searches");
        println!(":stats    show backend cache statistics");
        println!(":quit     exit");
    }

    fn prompt(&self) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.styled {
            write!(out, "{} ", ">".bold())?;
        } else {
            write!(out, "> ")?;
        }
        out.flush()?;
        Ok(())
    }

    fn status_line(&self, message: &str) {
        if self.styled {
            eprintln!("{}", message.dim());
        }
    }

    fn error_line(&self, message: &str) {
        if self.styled {
            eprintln!("{}", message.red());
        } else {
            eprintln!("{message}");
        }
    }
}
