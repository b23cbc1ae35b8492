//! Document renderer trait and error types
//!
//! A renderer turns the ordered corpus into a single file. It is the only
//! part of a run that writes to disk.

use crate::config::{OutputFormat, PageLayout};
use crate::output::Corpus;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while rendering the document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build PDF: {0}")]
    Pdf(String),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Turns a corpus into a document at a given path
pub trait DocumentRenderer: Send + Sync {
    /// Writes the whole corpus to `path`, replacing any existing file
    ///
    /// An empty corpus still produces a valid (empty) document.
    fn render(&self, corpus: &Corpus, path: &Path) -> RenderResult<()>;

    fn format(&self) -> OutputFormat;

    fn layout(&self) -> PageLayout;
}

/// Builds the renderer for a format and layout
pub fn renderer_for(format: OutputFormat, layout: PageLayout) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Pdf => Box::new(super::PdfRenderer::new(layout)),
        OutputFormat::Markdown => Box::new(super::MarkdownRenderer::new(layout)),
        OutputFormat::Text => Box::new(super::TextRenderer::new(layout)),
    }
}
