use crate::url::{normalize_url, NormalizationPolicy};
use std::collections::HashSet;
use url::Url;

/// Normalized URLs already scheduled for visitation in this run
///
/// Normalization happens inside the set, so callers can never check one
/// form and mark another.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    policy: NormalizationPolicy,
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self {
            policy,
            urls: HashSet::new(),
        }
    }

    /// Returns the key form of `url` under this set's policy
    pub fn normalize(&self, url: &Url) -> Url {
        normalize_url(url, self.policy)
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(self.normalize(url).as_str())
    }

    /// Marks a URL as visited
    ///
    /// Returns true if the URL was newly inserted; marking an already-present
    /// URL is a no-op that returns false.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        let key = self.normalize(url).to_string();
        self.urls.insert(key)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
