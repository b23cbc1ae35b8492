//! Page state definitions for tracking traversal progress
//!
//! Every candidate URL moves from `Discovered` to exactly one terminal
//! state: `Rejected`, `Skipped`, `Fetched` or `Failed`. The traversal engine
//! checks each step against `can_transition_to` before recording it.

use std::fmt;

/// Why a candidate was skipped without being fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The normalized URL is already in the visited set
    AlreadyVisited,

    /// The candidate's depth is beyond the configured maximum
    DepthExceeded,

    /// The page budget has no remaining capacity
    BudgetExhausted,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyVisited => "already_visited",
            Self::DepthExceeded => "depth_exceeded",
            Self::BudgetExhausted => "budget_exhausted",
        }
    }
}

/// Represents the current state of a candidate URL in a traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Link has been found on a page (or is the seed)
    Discovered,

    /// Navigation is in flight
    Fetching,

    // ===== Terminal States =====
    /// Link failed the filter (scheme, extension or origin)
    Rejected,

    /// Link passed the filter but was not fetched
    Skipped(SkipReason),

    /// Page was fetched and its text appended to the corpus
    Fetched,

    /// Navigation failed or timed out
    Failed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Discovered | Self::Fetching)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Fetching => "fetching",
            Self::Rejected => "rejected",
            Self::Skipped(reason) => reason.as_str(),
            Self::Fetched => "fetched",
            Self::Failed => "failed",
        }
    }

    /// Returns true if `next` is a legal successor of this state
    ///
    /// A navigation that lands, through a redirect, on a page already in the
    /// visited set ends as `Skipped(AlreadyVisited)` instead of `Fetched`.
    pub fn can_transition_to(&self, next: PageState) -> bool {
        if self.is_terminal() {
            return false;
        }

        match self {
            Self::Discovered => matches!(
                next,
                Self::Rejected | Self::Skipped(_) | Self::Fetching
            ),
            Self::Fetching => matches!(
                next,
                Self::Fetched | Self::Failed | Self::Skipped(SkipReason::AlreadyVisited)
            ),
            _ => false,
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
