//! PDF document rendering
//!
//! Text is set in the built-in Courier font at a fixed size, so line
//! wrapping is a matter of counting characters. Characters outside
//! Latin-1 have no glyph in the standard encoding and become `?`.

use crate::config::{OutputFormat, PageLayout};
use crate::output::traits::{DocumentRenderer, RenderError, RenderResult};
use crate::output::Corpus;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

/// US Letter, in points
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;

const FONT_SIZE: i64 = 10;
const LEADING: i64 = 12;

/// Courier advances 0.6em per glyph
const CHARS_PER_LINE: usize = ((PAGE_WIDTH - 2 * MARGIN) * 10 / (FONT_SIZE * 6)) as usize;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// Renders the corpus into a paginated PDF
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer {
    layout: PageLayout,
}

impl PdfRenderer {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, corpus: &Corpus, path: &Path) -> RenderResult<()> {
        let pages = layout_pages(corpus, self.layout);
        let mut doc = build_document(&pages)?;

        doc.save(path)?;
        Ok(())
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn layout(&self) -> PageLayout {
        self.layout
    }
}

/// Splits the corpus into pages of wrapped lines
///
/// Always returns at least one page, so an empty corpus yields a valid
/// single blank page.
pub fn layout_pages(corpus: &Corpus, layout: PageLayout) -> Vec<Vec<String>> {
    let mut pages: Vec<Vec<String>> = Vec::new();

    match layout {
        PageLayout::Continuous => {
            paginate(wrap_text(&corpus.joined_text(), CHARS_PER_LINE), &mut pages);
        }
        PageLayout::PagePerEntry => {
            for entry in corpus.entries() {
                let mut lines = wrap_text(entry.url.as_str(), CHARS_PER_LINE);
                lines.push(String::new());
                lines.extend(wrap_text(&entry.text, CHARS_PER_LINE));
                paginate(lines, &mut pages);
            }
        }
    }

    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}

fn paginate(lines: Vec<String>, pages: &mut Vec<Vec<String>>) {
    if lines.is_empty() {
        pages.push(Vec::new());
        return;
    }
    for chunk in lines.chunks(LINES_PER_PAGE) {
        pages.push(chunk.to_vec());
    }
}

/// Greedy word wrap; words longer than `width` are hard-split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if line_len > 0 && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }

            if word_len > width {
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(width) {
                    if line_len > 0 {
                        lines.push(std::mem::take(&mut line));
                    }
                    line = piece.iter().collect();
                    line_len = piece.len();
                }
                continue;
            }

            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
        }

        lines.push(line);
    }

    lines
}

/// Encodes a line for the font's `WinAnsiEncoding`
///
/// Latin-1 maps to itself; the typographic punctuation WinAnsi places in
/// 0x80-0x9F is looked up, and anything else becomes `?`.
fn encode_line(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ if c.is_whitespace() => b' ',
            _ => win_ansi_byte(c).unwrap_or(b'?'),
        })
        .collect()
}

/// WinAnsi byte for a character outside Latin-1, if it has one
fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\u{20AC}' => 0x80, // euro sign
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // ellipsis
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91, // curly single quotes
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93, // curly double quotes
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99, // trade mark
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn build_document(pages: &[Vec<String>]) -> RenderResult<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LEADING.into()]),
            Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - LEADING).into()]),
        ];
        for line in lines {
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_line(line))],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    Ok(doc)
}
