//! Error taxonomy for recipe dispatch.

use std::io;

use thiserror::Error;

/// Every failure a recipe invocation can surface.
#[derive(Debug, Error)]
pub enum AdrError {
    /// Malformed argument definitions, bad config files, misuse of the executor.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("unknown recipe '{0}'")]
    UnknownRecipe(String),
    #[error("unknown query '{0}'")]
    UnknownQuery(String),
    #[error("unknown context '{0}'")]
    UnknownContext(String),
    #[error("unknown formatter '{0}'")]
    UnknownFormatter(String),
    /// Command-line parsing failed, or help was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),
    #[error("query '{query}' returned no data")]
    MissingData { query: String },
    #[error("query backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AdrError {
    /// True for the usage/help outcomes of argument parsing.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, AdrError>;
