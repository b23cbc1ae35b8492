/// Remaining depth and page count of a traversal run
///
/// The budget is the sole gate on traversal growth: the engine consults it
/// before every navigation and before scheduling every child link.
#[derive(Debug, Clone)]
pub struct CrawlBudget {
    max_depth: u32,
    max_pages: u32,
    pages_fetched: u32,
}

impl CrawlBudget {
    pub fn new(max_depth: u32, max_pages: u32) -> Self {
        Self {
            max_depth,
            max_pages,
            pages_fetched: 0,
        }
    }

    /// Returns true if a page at `current_depth` may still be fetched
    pub fn remaining_depth(&self, current_depth: u32) -> bool {
        current_depth <= self.max_depth
    }

    /// Returns true if links found at `current_depth` may be followed
    pub fn can_descend(&self, current_depth: u32) -> bool {
        current_depth < self.max_depth
    }

    /// Returns true while fewer than `max_pages` pages have been fetched
    pub fn has_capacity(&self) -> bool {
        self.pages_fetched < self.max_pages
    }

    /// Records one successful fetch
    pub fn record_fetch(&mut self) {
        self.pages_fetched += 1;
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }
}
