//! State module for tracking traversal progress
//!
//! This module provides the state owned by a single traversal run.
//!
//! # Components
//!
//! - `PageState`: Tracks the state of individual candidate URLs
//! - `VisitedSet`: Normalized URLs already scheduled; enforces no-revisit
//! - `CrawlBudget`: Remaining depth and page count
//! - `CrawlState`: The visited set and budget of one run, owned by the engine

mod budget;
mod page_state;
mod visited;

// Re-export main types
pub use budget::CrawlBudget;
pub use page_state::{PageState, SkipReason};
pub use visited::VisitedSet;

use crate::config::CrawlConfig;

/// Mutable state of one traversal run
///
/// Created at the start of a run and discarded at its end. Both parts only
/// grow: the visited set never shrinks and the fetch counter never decreases.
#[derive(Debug, Clone)]
pub struct CrawlState {
    pub visited: VisitedSet,
    pub budget: CrawlBudget,
}

impl CrawlState {
    pub fn new(config: &CrawlConfig) -> Self {
        Self {
            visited: VisitedSet::new(config.normalization),
            budget: CrawlBudget::new(config.max_depth, config.max_pages),
        }
    }
}
