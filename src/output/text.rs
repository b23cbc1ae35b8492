//! Plain text rendering

use crate::config::{OutputFormat, PageLayout};
use crate::output::traits::{DocumentRenderer, RenderResult};
use crate::output::Corpus;
use std::path::Path;

/// Form feed, the plain-text page break
const PAGE_BREAK: char = '\u{000C}';

/// Writes the corpus as UTF-8 text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    layout: PageLayout,
}

impl TextRenderer {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, corpus: &Corpus, path: &Path) -> RenderResult<()> {
        std::fs::write(path, format_text_document(corpus, self.layout))?;
        Ok(())
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn layout(&self) -> PageLayout {
        self.layout
    }
}

pub fn format_text_document(corpus: &Corpus, layout: PageLayout) -> String {
    match layout {
        PageLayout::Continuous => corpus.joined_text(),
        PageLayout::PagePerEntry => {
            let mut out = String::new();
            for (i, entry) in corpus.entries().iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    out.push(PAGE_BREAK);
                }
                out.push_str(entry.url.as_str());
                out.push_str("\n\n");
                out.push_str(&entry.text);
                out.push('\n');
            }
            out
        }
    }
}
