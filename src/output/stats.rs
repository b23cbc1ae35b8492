//! Statistics gathered during a traversal run
//!
//! This module records how every candidate URL ended and prints a summary
//! once the run is over. Informational only; the corpus is the data contract.

use crate::state::{PageState, SkipReason};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A navigation that failed and was isolated to its page
#[derive(Debug, Clone)]
pub struct FailedPage {
    pub url: String,
    pub depth: u32,
    pub message: String,
}

/// Crawl statistics summary
///
/// Once a run ends, every discovered candidate has been counted in exactly
/// one terminal bucket: fetched, failed, rejected or skipped.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Candidates found, the seed included
    pub candidates_discovered: u64,

    /// Navigations handed to the browser session
    pub navigations_started: u64,

    /// Pages appended to the corpus
    pub pages_fetched: u64,

    /// Navigations that failed or timed out
    pub pages_failed: u64,

    /// Links dropped by the filter
    pub links_rejected: u64,

    /// Candidates skipped, by reason
    pub skipped: HashMap<SkipReason, u64>,

    /// Fetched page count per depth
    pub depth_breakdown: HashMap<u32, u64>,

    /// Size of the visited set at the end of the run
    pub urls_visited: u64,

    pub failures: Vec<FailedPage>,
}

impl CrawlStats {
    /// Creates empty statistics stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            candidates_discovered: 0,
            navigations_started: 0,
            pages_fetched: 0,
            pages_failed: 0,
            links_rejected: 0,
            skipped: HashMap::new(),
            depth_breakdown: HashMap::new(),
            urls_visited: 0,
            failures: Vec::new(),
        }
    }

    /// Records a candidate entering `state`
    pub fn record(&mut self, state: PageState) {
        match state {
            PageState::Discovered => self.candidates_discovered += 1,
            PageState::Fetching => self.navigations_started += 1,
            PageState::Fetched => self.pages_fetched += 1,
            PageState::Failed => self.pages_failed += 1,
            PageState::Rejected => self.links_rejected += 1,
            PageState::Skipped(reason) => *self.skipped.entry(reason).or_insert(0) += 1,
        }
    }

    /// Counts a fetched page under its depth
    pub fn record_depth(&mut self, depth: u32) {
        *self.depth_breakdown.entry(depth).or_insert(0) += 1;
    }

    /// Keeps the details of a failed navigation
    pub fn record_failure(&mut self, url: &str, depth: u32, message: String) {
        self.failures.push(FailedPage {
            url: url.to_string(),
            depth,
            message,
        });
    }

    pub fn skipped_for(&self, reason: SkipReason) -> u64 {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Returns the share of navigations that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_fetched + self.pages_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / attempted as f64) * 100.0
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Candidates discovered: {}", stats.candidates_discovered);
    println!("  Navigations started: {}", stats.navigations_started);
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Pages failed: {}", stats.pages_failed);
    println!("  URLs visited: {}", stats.urls_visited);
    println!("  Links rejected by filter: {}", stats.links_rejected);
    println!("  Candidates skipped: {}", stats.total_skipped());
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {:.2}s", duration);
    }
    println!();

    if !stats.skipped.is_empty() {
        println!("Skipped by Reason:");
        let mut skip_counts: Vec<_> = stats.skipped.iter().collect();
        skip_counts.sort_by(|a, b| b.1.cmp(a.1));
        for (reason, count) in skip_counts {
            println!("  {}: {}", reason.as_str(), count);
        }
        println!();
    }

    if !stats.depth_breakdown.is_empty() {
        println!("Pages by Depth:");
        let mut depths: Vec<_> = stats.depth_breakdown.iter().collect();
        depths.sort_by_key(|(depth, _)| **depth);
        for (depth, count) in depths {
            println!("  {}: {}", depth, count);
        }
        println!();
    }

    if !stats.failures.is_empty() {
        println!("Failed Pages ({}):", stats.failures.len());
        for failure in &stats.failures {
            println!("  - {} (depth {}): {}", failure.url, failure.depth, failure.message);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} navigations)",
        stats.success_rate(),
        stats.pages_fetched,
        stats.pages_fetched + stats.pages_failed
    );
}
