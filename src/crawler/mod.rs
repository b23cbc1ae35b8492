//! Crawler module for page navigation and traversal
//!
//! This module contains the core crawling logic, including:
//! - The browser session capability and its HTTP implementation
//! - HTML parsing for visible text and link extraction
//! - Link filtering against the seed origin and blocked extensions
//! - The depth-first traversal engine

mod engine;
mod filter;
mod parser;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{traverse, TraversalEngine, TraversalOutcome};
pub use filter::{LinkFilter, RejectReason, DEFAULT_BLOCKED_EXTENSIONS};
pub use parser::{parse_html, ParsedPage};
pub use session::{BrowserSession, HttpSession, NavigationError, PageResult};

use crate::config::{CrawlConfig, Settings};
use crate::output::{renderer_for, CrawlStats, DocumentRenderer};
use crate::url::validate_seed;
use crate::{Result, ScribeError};
use std::path::Path;

/// Runs a traversal and renders its corpus
///
/// The session is closed on every path out of this function, including a
/// failed render.
///
/// # Arguments
///
/// * `config` - Seed and limits for this run
/// * `filter` - Eligibility rules for discovered links
/// * `session` - The browser session to navigate with
/// * `renderer` - Document renderer for the corpus
/// * `output` - Destination path of the document
///
/// # Returns
///
/// * `Ok(CrawlStats)` - The document was written
/// * `Err(ScribeError)` - Rendering failed
pub async fn crawl<S: BrowserSession + ?Sized>(
    config: &CrawlConfig,
    filter: &LinkFilter,
    session: &mut S,
    renderer: &dyn DocumentRenderer,
    output: &Path,
) -> Result<CrawlStats> {
    let outcome = traverse(config, filter, session).await;

    tracing::info!(
        "Rendering {} pages to {}",
        outcome.corpus.len(),
        output.display()
    );
    let rendered = renderer.render(&outcome.corpus, output);

    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    rendered?;
    Ok(outcome.stats)
}

/// Runs a complete transcription from raw seed input
///
/// This is the main entry point. It will:
/// 1. Validate the seed (nothing else happens if it is invalid)
/// 2. Build the HTTP session, link filter and renderer
/// 3. Traverse the site and render the document
///
/// # Arguments
///
/// * `settings` - Loaded settings
/// * `seed_input` - The seed address as typed by the user
pub async fn run(settings: &Settings, seed_input: &str) -> Result<CrawlStats> {
    let seed = validate_seed(seed_input).map_err(|reason| ScribeError::InvalidSeedUrl {
        input: seed_input.trim().to_string(),
        reason,
    })?;

    let config = CrawlConfig::from_settings(seed, &settings.crawler);
    let filter = LinkFilter::new(
        &config.seed,
        config.same_origin,
        &settings.filter.blocked_extensions,
    )
    .map_err(|reason| ScribeError::InvalidSeedUrl {
        input: seed_input.trim().to_string(),
        reason,
    })?;

    let renderer = renderer_for(settings.output.resolved_format(), settings.output.layout);
    let mut session = HttpSession::new(&settings.session)?;

    crawl(
        &config,
        &filter,
        &mut session,
        renderer.as_ref(),
        &settings.output.path,
    )
    .await
}
