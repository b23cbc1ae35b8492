//! Traversal engine - depth-first crawl orchestration
//!
//! This module contains the main traversal loop, which:
//! - Visits the seed, then follows accepted links depth-first
//! - Enforces the no-revisit rule through the visited set
//! - Stops descending at the depth limit and stops fetching at the page budget
//! - Isolates navigation failures and timeouts to the page that caused them
//!
//! The loop keeps an explicit work stack instead of recursing. Children are
//! pushed in reverse document order, so the first link on a page is always
//! the next one explored, exactly as a recursive walk would do it.

use crate::config::CrawlConfig;
use crate::crawler::{BrowserSession, LinkFilter, NavigationError, PageResult};
use crate::output::{Corpus, CrawlStats};
use crate::state::{CrawlState, PageState, SkipReason};
use url::Url;

/// A URL waiting on the work stack
#[derive(Debug, Clone)]
struct Candidate {
    url: Url,
    depth: u32,
}

/// Everything a finished traversal hands back to its caller
#[derive(Debug)]
pub struct TraversalOutcome {
    pub corpus: Corpus,
    pub stats: CrawlStats,
}

/// Depth-first traversal over one borrowed browser session
pub struct TraversalEngine<'a, S: BrowserSession + ?Sized> {
    config: &'a CrawlConfig,
    filter: &'a LinkFilter,
    session: &'a mut S,
    state: CrawlState,
    corpus: Corpus,
    stats: CrawlStats,
}

impl<'a, S: BrowserSession + ?Sized> TraversalEngine<'a, S> {
    /// Creates an engine with fresh per-run state
    ///
    /// # Arguments
    ///
    /// * `config` - Seed and limits for this run
    /// * `filter` - Eligibility rules for discovered links
    /// * `session` - The browser session, borrowed for the whole run
    pub fn new(config: &'a CrawlConfig, filter: &'a LinkFilter, session: &'a mut S) -> Self {
        Self {
            config,
            filter,
            session,
            state: CrawlState::new(config),
            corpus: Corpus::new(config.seed.clone()),
            stats: CrawlStats::new(),
        }
    }

    /// Runs the traversal to completion
    ///
    /// Never fails: per-page errors are logged and recorded in the stats.
    /// The session is left open; closing it is the caller's job.
    pub async fn run(mut self) -> TraversalOutcome {
        tracing::info!(
            "Starting traversal at {} (max depth {}, max pages {}, same origin: {})",
            self.config.seed,
            self.config.max_depth,
            self.config.max_pages,
            self.config.same_origin
        );

        self.transition(None, PageState::Discovered);
        let mut work = vec![Candidate {
            url: self.config.seed.clone(),
            depth: 0,
        }];

        while let Some(candidate) = work.pop() {
            if !self.state.budget.has_capacity() {
                let remaining = work.len() + 1;
                tracing::info!(
                    "Page budget of {} reached, dropping {} pending URLs",
                    self.state.budget.max_pages(),
                    remaining
                );
                for _ in 0..remaining {
                    self.transition(
                        Some(PageState::Discovered),
                        PageState::Skipped(SkipReason::BudgetExhausted),
                    );
                }
                break;
            }

            if let Some(reason) = self.skip_reason(&candidate) {
                tracing::trace!("Skipping {} ({})", candidate.url, reason.as_str());
                self.transition(Some(PageState::Discovered), PageState::Skipped(reason));
                continue;
            }

            // Marked before navigating, so a failed page is never retried
            self.state.visited.mark_visited(&candidate.url);

            if let Some(page) = self.visit(&candidate).await {
                self.schedule_links(&page, candidate.depth, &mut work);
            }
        }

        self.stats.urls_visited = self.state.visited.len() as u64;
        self.stats.finish();

        tracing::info!(
            "Traversal complete: {} pages fetched, {} failed",
            self.stats.pages_fetched,
            self.stats.pages_failed
        );

        TraversalOutcome {
            corpus: self.corpus,
            stats: self.stats,
        }
    }

    /// Records one lifecycle step of a candidate
    fn transition(&mut self, from: Option<PageState>, to: PageState) {
        if let Some(from) = from {
            debug_assert!(
                from.can_transition_to(to),
                "illegal page transition {} -> {}",
                from,
                to
            );
        }
        self.stats.record(to);
    }

    fn skip_reason(&self, candidate: &Candidate) -> Option<SkipReason> {
        if !self.state.budget.remaining_depth(candidate.depth) {
            Some(SkipReason::DepthExceeded)
        } else if self.state.visited.contains(&candidate.url) {
            Some(SkipReason::AlreadyVisited)
        } else {
            None
        }
    }

    /// Navigates to one page under the navigation timeout
    ///
    /// The session receives the discovered address without its fragment;
    /// normalization only decides visited-set identity. Returns the page on
    /// success. On failure the error is logged and recorded, and the page
    /// does not count against the budget.
    async fn visit(&mut self, candidate: &Candidate) -> Option<PageResult> {
        let mut target = candidate.url.clone();
        target.set_fragment(None);

        let depth = candidate.depth;
        let limit = self.config.navigation_timeout;
        tracing::debug!("Navigating to {} at depth {}", target, depth);
        self.transition(Some(PageState::Discovered), PageState::Fetching);

        let result = match tokio::time::timeout(limit, self.session.navigate(&target)).await {
            Ok(result) => result,
            Err(_) => Err(NavigationError::Timeout {
                url: target.to_string(),
                after: limit,
            }),
        };

        match result {
            Ok(page) => {
                if self.landed_on_visited(&target, &page.final_url) {
                    tracing::debug!(
                        "{} redirected to already visited {}",
                        target,
                        page.final_url
                    );
                    self.transition(
                        Some(PageState::Fetching),
                        PageState::Skipped(SkipReason::AlreadyVisited),
                    );
                    return None;
                }

                self.corpus.append(&page, depth);
                self.state.budget.record_fetch();
                self.transition(Some(PageState::Fetching), PageState::Fetched);
                self.stats.record_depth(depth);

                tracing::info!(
                    "[{}/{}] depth {}: {}",
                    self.state.budget.pages_fetched(),
                    self.state.budget.max_pages(),
                    depth,
                    target
                );
                Some(page)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", target, e);
                self.transition(Some(PageState::Fetching), PageState::Failed);
                self.stats.record_failure(target.as_str(), depth, e.to_string());
                None
            }
        }
    }

    /// Marks the end of a redirect chain as visited
    ///
    /// Returns true when the navigation was redirected to a URL that some
    /// earlier navigation already claimed.
    fn landed_on_visited(&mut self, requested: &Url, landed: &Url) -> bool {
        let visited = &mut self.state.visited;
        if visited.normalize(requested) == visited.normalize(landed) {
            return false;
        }
        !visited.mark_visited(landed)
    }

    /// Pushes the accepted, unvisited links of a page onto the work stack
    fn schedule_links(&mut self, page: &PageResult, depth: u32, work: &mut Vec<Candidate>) {
        if !self.state.budget.can_descend(depth) || !self.state.budget.has_capacity() {
            return;
        }

        let mut children = Vec::new();
        for link in &page.links {
            self.transition(None, PageState::Discovered);
            match self.filter.evaluate(link) {
                Ok(url) => {
                    if self.state.visited.contains(&url) {
                        self.transition(
                            Some(PageState::Discovered),
                            PageState::Skipped(SkipReason::AlreadyVisited),
                        );
                        continue;
                    }
                    children.push(Candidate {
                        url,
                        depth: depth + 1,
                    });
                }
                Err(reason) => {
                    tracing::trace!("Rejected link {}: {}", link, reason);
                    self.transition(Some(PageState::Discovered), PageState::Rejected);
                }
            }
        }

        work.extend(children.into_iter().rev());
    }
}

/// Runs one traversal and returns its corpus and statistics
pub async fn traverse<S: BrowserSession + ?Sized>(
    config: &CrawlConfig,
    filter: &LinkFilter,
    session: &mut S,
) -> TraversalOutcome {
    TraversalEngine::new(config, filter, session).run().await
}
