use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    Bing,
    Google,
}

impl SearchEngine {
    /// The engine name the backend expects on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bing => "bing",
            Self::Google => "google",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_cache: bool,
    pub plain: bool,
    pub backend: Option<String>,
    pub timeout: Option<u64>,
    pub max_results: Option<u8>,
    pub engine: Option<SearchEngine>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_cache: self.no_cache || other.no_cache,
            plain: self.plain || other.plain,
            backend: other.backend.clone().or_else(|| self.backend.clone()),
            timeout: other.timeout.or(self.timeout),
            max_results: other.max_results.or(self.max_results),
            engine: other.engine.or(self.engine),
        }
    }
}

fn app_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("askweb"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("askweb"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("askweb"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config").join("askweb"));
        }
    }

    None
}

pub fn global_config_path() -> PathBuf {
    app_dir().map_or_else(|| PathBuf::from(".askwebrc"), |dir| dir.join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".askwebrc")
}

pub fn default_history_path() -> PathBuf {
    app_dir().map_or_else(
        || PathBuf::from(".askweb-history.json"),
        |dir| dir.join("history.json"),
    )
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# askweb defaults (saved with --save)".to_string());
    if flags.no_cache {
        lines.push("--no-cache".to_string());
    }
    if flags.plain {
        lines.push("--plain".to_string());
    }
    if let Some(backend) = &flags.backend {
        lines.push(format!("--backend {backend}"));
    }
    if let Some(timeout) = flags.timeout {
        lines.push(format!("--timeout {timeout}"));
    }
    if let Some(max_results) = flags.max_results {
        lines.push(format!("--max-results {max_results}"));
    }
    if let Some(engine) = flags.engine {
        lines.push(format!("--engine {}", engine.as_str()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-cache" {
            flags.no_cache = true;
        } else if token == "--plain" {
            flags.plain = true;
        } else if token == "--backend" {
            if let Some(next) = tokens.get(i + 1) {
                flags.backend = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--backend=") {
            flags.backend = Some(value.to_string());
        } else if token == "--timeout" {
            if let Some(next) = tokens.get(i + 1) {
                flags.timeout = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--timeout=") {
            flags.timeout = value.parse().ok();
        } else if token == "--max-results" {
            if let Some(next) = tokens.get(i + 1) {
                flags.max_results = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--max-results=") {
            flags.max_results = value.parse().ok();
        } else if token == "--engine" {
            if let Some(next) = tokens.get(i + 1) {
                flags.engine = parse_engine(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--engine=") {
            flags.engine = parse_engine(value);
        }
        i += 1;
    }
    flags
}

fn parse_engine(s: &str) -> Option<SearchEngine> {
    match s {
        "bing" => Some(SearchEngine::Bing),
        "google" => Some(SearchEngine::Google),
        _ => None,
    }
}
