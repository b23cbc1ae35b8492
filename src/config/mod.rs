//! Configuration module for Sitescribe
//!
//! This module handles loading, parsing, and validating the optional TOML
//! settings file, and building the immutable per-run [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use sitescribe::config::load_config;
//! use std::path::Path;
//!
//! let settings = load_config(Path::new("sitescribe.toml")).unwrap();
//! println!("Crawler will use max depth: {}", settings.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CrawlConfig, CrawlerSettings, FilterSettings, OutputFormat, OutputSettings, PageLayout,
    SessionSettings, Settings, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_PATH,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
