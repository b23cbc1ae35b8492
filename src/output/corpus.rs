//! Content aggregation
//!
//! The corpus collects the text of every fetched page in the exact order
//! the fetches completed. No reordering and no deduplication of text.

use crate::crawler::PageResult;
use url::Url;

/// Separator placed between page texts in the joined corpus
pub const PAGE_DELIMITER: &str = "\n\n----------------------------------------\n\n";

/// One fetched page's contribution to the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Position in visitation order, starting at 1
    pub sequence: usize,

    pub url: Url,

    pub title: Option<String>,

    /// Link hops from the seed
    pub depth: u32,

    /// Extracted text; may be empty
    pub text: String,
}

/// Ordered text of all successfully fetched pages in one run
#[derive(Debug, Clone)]
pub struct Corpus {
    seed: Url,
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn new(seed: Url) -> Self {
        Self {
            seed,
            entries: Vec::new(),
        }
    }

    /// Appends a fetched page and returns its sequence number
    pub fn append(&mut self, page: &PageResult, depth: u32) -> usize {
        let sequence = self.entries.len() + 1;
        self.entries.push(CorpusEntry {
            sequence,
            url: page.url.clone(),
            title: page.title.clone(),
            depth,
            text: page.text.clone(),
        });
        sequence
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Page texts in visitation order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }

    /// All page texts joined with [`PAGE_DELIMITER`]
    pub fn joined_text(&self) -> String {
        self.texts().collect::<Vec<_>>().join(PAGE_DELIMITER)
    }
}
