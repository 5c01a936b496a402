//! adr configuration: TOML file plus command-line overrides.
//!
//! Lookup order: explicit `--config` path, then `$ADR_CONFIG_PATH`, then
//! `~/.config/adr/config.toml`. Missing default files fall back to defaults;
//! a missing explicit file is an error.

use crate::error::{AdrError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternate config file.
pub const CONFIG_PATH_ENV: &str = "ADR_CONFIG_PATH";

pub const DEFAULT_URL: &str = "https://activedata.allizom.org/query";

/// Runtime configuration shared by the runner and the query backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formatter name used for output
    pub fmt: String,

    /// ActiveData query endpoint
    pub url: String,

    /// HTTP timeout for a single query
    pub timeout_secs: u64,

    /// Debug-level logging
    pub verbose: bool,

    /// Directory of additional `*.query` definitions
    pub queries_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fmt: "table".to_string(),
            url: DEFAULT_URL.to_string(),
            timeout_secs: 60,
            verbose: false,
            queries_dir: None,
        }
    }
}

/// Parse a config from a TOML string.
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Load a config file from disk.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AdrError::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&content)
}

/// Default config location: `$ADR_CONFIG_PATH`, else `~/.config/adr/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("adr")
            .join("config.toml")
    })
}

/// Resolve the effective config file and load it.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => load_config(&path),
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.fmt, "table");
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout_secs, 60);
        assert!(!config.verbose);
        assert!(config.queries_dir.is_none());
    }

    #[test]
    fn test_config_parse_partial() {
        let config = parse_config("fmt = \"json\"\nverbose = true\n").unwrap();
        assert_eq!(config.fmt, "json");
        assert!(config.verbose);
        assert_eq!(config.url, DEFAULT_URL);
    }

    #[test]
    fn test_config_parse_full() {
        let toml = r#"
fmt = "markdown"
url = "http://localhost:5000/query"
timeout_secs = 5
queries_dir = "/srv/adr/queries"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.fmt, "markdown");
        assert_eq!(config.url, "http://localhost:5000/query");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.queries_dir, Some(PathBuf::from("/srv/adr/queries")));
    }

    #[test]
    fn test_config_parse_invalid() {
        let result = parse_config("fmt = [not valid");
        assert!(matches!(result, Err(AdrError::Toml(_))));
    }

    #[test]
    fn test_config_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fmt = \"tab\"\n").unwrap();
        let config = resolve_config(Some(&path)).unwrap();
        assert_eq!(config.fmt, "tab");
    }

    #[test]
    fn test_config_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_config(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(AdrError::Configuration(_))));
    }
}
