//! Markdown document generation
//!
//! This module renders the corpus as a human-readable markdown transcript,
//! either as one continuous body or as one section per visited page.

use crate::config::{OutputFormat, PageLayout};
use crate::output::traits::{DocumentRenderer, RenderResult};
use crate::output::Corpus;
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Renders the corpus as markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    layout: PageLayout,
}

impl MarkdownRenderer {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn render(&self, corpus: &Corpus, path: &Path) -> RenderResult<()> {
        let markdown = format_markdown_document(corpus, self.layout);

        let mut file = File::create(path)?;
        file.write_all(markdown.as_bytes())?;

        Ok(())
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn layout(&self) -> PageLayout {
        self.layout
    }
}

/// Formats a corpus as markdown
///
/// # Arguments
///
/// * `corpus` - The ordered page texts
/// * `layout` - Continuous body or one section per page
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_document(corpus: &Corpus, layout: PageLayout) -> String {
    let mut md = String::new();

    // Title
    md.push_str(&format!("# Transcript of {}\n\n", corpus.seed()));

    // Run metadata
    md.push_str(&format!("- **Pages**: {}\n", corpus.len()));
    md.push_str(&format!("- **Generated**: {}\n\n", Utc::now().to_rfc3339()));

    if corpus.is_empty() {
        md.push_str("*No pages were fetched.*\n");
        return md;
    }

    match layout {
        PageLayout::Continuous => {
            md.push_str(&corpus.joined_text());
            md.push('\n');
        }
        PageLayout::PagePerEntry => {
            for (i, entry) in corpus.entries().iter().enumerate() {
                if i > 0 {
                    md.push_str("\n---\n\n");
                }

                let heading = entry
                    .title
                    .as_deref()
                    .unwrap_or_else(|| entry.url.as_str());
                md.push_str(&format!("## {}. {}\n\n", entry.sequence, heading));
                md.push_str(&format!("<{}> (depth {})\n\n", entry.url, entry.depth));

                if !entry.text.is_empty() {
                    md.push_str(&entry.text);
                    md.push('\n');
                }
            }
        }
    }

    md
}
