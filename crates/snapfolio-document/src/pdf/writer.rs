// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: lay an HTML document out as text using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use snapfolio_core::PaperSize;
use snapfolio_core::error::Result;
use tracing::{debug, info, instrument};

use crate::html::{Block, extract_blocks};

const MARGIN_MM: f32 = 20.0;
const BODY_SIZE_PT: f32 = 11.0;
const CAPTION_SIZE_PT: f32 = 9.0;
/// Space added after every block.
const BLOCK_GAP_PT: f32 = 8.0;

/// One laid-out line before pagination.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    size_pt: f32,
    centered: bool,
}

impl Line {
    fn height_pt(&self) -> f32 {
        self.size_pt * 1.3
    }
}

/// Renders HTML documents into simple text PDFs.
pub struct PdfWriter {
    paper_size: PaperSize,
}

impl PdfWriter {
    pub fn new(paper_size: PaperSize) -> Self {
        Self { paper_size }
    }

    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    /// Render `html` to PDF bytes.
    ///
    /// Headings are set large and centred, paragraphs are word-wrapped in
    /// Helvetica, and each image becomes a one-line caption naming its source.
    /// The first heading doubles as the PDF title.
    #[instrument(skip(self, html), fields(html_len = html.len()))]
    pub fn render_html(&self, html: &str) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        let blocks = extract_blocks(html);
        let title = blocks
            .iter()
            .find_map(|b| match b {
                Block::Heading { text, .. } => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "Snapfolio Document".into());

        info!(paper = ?self.paper_size, title = %title, blocks = blocks.len(), "rendering PDF");

        let usable_width_mm = page_w.0 - 2.0 * MARGIN_MM;
        let lines = layout(&blocks, usable_width_mm);

        let margin_pt = Mm(MARGIN_MM).into_pt().0;
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let bottom_pt = margin_pt;

        let mut doc = PdfDocument::new(&title);
        let mut pages: Vec<PdfPage> = Vec::new();
        let mut ops: Vec<Op> = Vec::new();
        let mut y_pt = page_h_pt - margin_pt;

        for line in &lines {
            let Some(line) = line else {
                y_pt -= BLOCK_GAP_PT;
                continue;
            };
            if y_pt - line.height_pt() < bottom_pt {
                pages.push(PdfPage::new(page_w, page_h, std::mem::take(&mut ops)));
                y_pt = page_h_pt - margin_pt;
            }
            y_pt -= line.height_pt();

            let x_pt = if line.centered {
                let width = estimated_width_pt(&line.text, line.size_pt);
                ((page_w_pt - width) / 2.0).max(margin_pt)
            } else {
                margin_pt
            };

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(x_pt),
                    y: Pt(y_pt),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(line.size_pt),
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.text.clone())],
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::EndTextSection);
        }

        // Always emit at least one page, even for an empty document.
        if !ops.is_empty() || pages.is_empty() {
            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);
        debug!(lines = lines.len(), pages = doc.pages.len(), "layout complete");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        Ok(output)
    }
}

/// Approximate Helvetica advance: about half the font size per glyph.
fn estimated_width_pt(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * 0.5
}

fn heading_size_pt(level: u8) -> f32 {
    match level {
        1 => 28.0,
        2 => 22.0,
        3 => 18.0,
        4 => 15.0,
        _ => 13.0,
    }
}

/// Flatten blocks into lines; `None` marks the gap after a block.
fn layout(blocks: &[Block], usable_width_mm: f32) -> Vec<Option<Line>> {
    let mut lines = Vec::new();
    for block in blocks {
        let (text, size_pt, centered) = match block {
            Block::Heading { level, text } => (text.clone(), heading_size_pt(*level), true),
            Block::Paragraph(text) => (text.clone(), BODY_SIZE_PT, false),
            Block::Image { src } => (format!("[image: {src}]"), CAPTION_SIZE_PT, true),
        };

        // 1pt = 0.3528mm; average glyph is half the font size wide.
        let char_width_mm = 0.5 * size_pt * 0.3528;
        let max_chars = ((usable_width_mm / char_width_mm) as usize).max(1);

        for wrapped in wrap_text(&text, max_chars) {
            lines.push(Some(Line {
                text: wrapped,
                size_pt,
                centered,
            }));
        }
        lines.push(None);
    }
    lines
}

/// Word-wrap `text` so no line exceeds `max_width` characters.  Words longer
/// than `max_width` are force-broken.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::with_capacity(max_width);

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() > max_width {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            let mut chunks = chars.chunks(max_width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    result.push(piece);
                } else {
                    current = piece;
                }
            }
        } else if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + chars.len() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            result.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        result.push(current);
    }
    result
}
