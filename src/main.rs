//! Askweb - a terminal client for a web query answering backend.
//!
//! # Usage
//!
//! ```bash
//! askweb "what is rust?"
//! askweb --engine google --max-results 10 "latest AI developments"
//! askweb            # interactive prompt
//! askweb --health
//! ```

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use askweb::api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS, DEFAULT_TIMEOUT_SECS};
use askweb::app::App;
use askweb::config::{
    ConfigFlags, SearchEngine, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};

/// A terminal client for a web query answering backend
#[derive(Parser, Debug)]
#[command(name = "askweb", version, about, long_about = None)]
struct Cli {
    /// Natural-language query; starts an interactive prompt when omitted
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Backend base URL
    #[arg(long, value_name = "URL")]
    backend: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Maximum number of search results per query (1-20)
    #[arg(long, value_name = "N")]
    max_results: Option<u8>,

    /// Search engine the backend should use
    #[arg(long, value_enum)]
    engine: Option<SearchEngine>,

    /// Bypass the backend answer cache
    #[arg(long)]
    no_cache: bool,

    /// Disable ANSI styling
    #[arg(long)]
    plain: bool,

    /// Check backend health and exit
    #[arg(long)]
    health: bool,

    /// Show backend cache statistics and exit
    #[arg(long)]
    stats: bool,

    /// Warm up the backend AI service and exit
    #[arg(long)]
    init: bool,

    /// Print saved search history and exit
    #[arg(long)]
    show_history: bool,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let base_url = effective
        .backend
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let timeout = Duration::from_secs(effective.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS));
    let client = ApiClient::new(&base_url, timeout)
        .with_context(|| format!("Failed to build client for {base_url}"))?;

    let styled = !effective.plain && std::io::stdout().is_terminal();
    let mut app = App::new(client)
        .with_engine(effective.engine.unwrap_or(SearchEngine::Bing))
        .with_max_results(effective.max_results.unwrap_or(DEFAULT_MAX_RESULTS))
        .with_cache(!effective.no_cache)
        .with_styled(styled);

    if cli.health {
        return app.show_health();
    }
    if cli.stats {
        return app.show_stats();
    }
    if cli.init {
        return app.run_initialize();
    }
    if cli.show_history {
        return app.show_history();
    }

    match cli.query {
        Some(query) => app.run_query(&query),
        None => app.run_interactive().context("Application error"),
    }
}
