//! Output module for aggregating and rendering transcribed text
//!
//! This module handles:
//! - Collecting page texts in visitation order
//! - Rendering the corpus as PDF, markdown or plain text
//! - Recording crawl statistics

mod corpus;
mod markdown;
mod pdf;
pub mod stats;
mod text;
mod traits;

pub use corpus::{Corpus, CorpusEntry, PAGE_DELIMITER};
pub use markdown::{format_markdown_document, MarkdownRenderer};
pub use pdf::PdfRenderer;
pub use stats::{print_statistics, CrawlStats, FailedPage};
pub use text::TextRenderer;
pub use traits::{renderer_for, DocumentRenderer, RenderError, RenderResult};
