//! Sitescribe: a bounded site-to-document transcriber
//!
//! This crate follows hyperlinks from a single seed address, depth-first and
//! within a depth limit, a page budget and an optional same-origin restriction,
//! and renders the visible text of every page it reaches into one document.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sitescribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{input}': {reason}")]
    InvalidSeedUrl { input: String, reason: UrlError },

    #[error("Render error: {0}")]
    Render(#[from] output::RenderError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown value for {field}: '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitescribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{CrawlConfig, Settings};
pub use crawler::{crawl, run, BrowserSession, HttpSession, LinkFilter, PageResult};
pub use output::{Corpus, CrawlStats, DocumentRenderer};
pub use state::{CrawlBudget, CrawlState, PageState, SkipReason, VisitedSet};
pub use crate::url::{normalize_url, validate_seed, NormalizationPolicy, Origin};
