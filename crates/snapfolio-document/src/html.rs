// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flatten a small HTML document into layout blocks for the PDF writer.
//
// This is not an HTML parser.  It understands headings, paragraphs, images
// and line breaks, skips `<head>`, `<style>` and `<script>`, and treats any
// other loose text as a paragraph.  Enough for the bundled print document.

/// One unit of flowed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `<h1>`–`<h6>`; level 1 is the largest.
    Heading { level: u8, text: String },
    Paragraph(String),
    /// `<img>`; only the source is kept, the picture is not fetched.
    Image { src: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Heading(u8),
    Paragraph,
}

struct Tag<'a> {
    name: String,
    closing: bool,
    raw: &'a str,
}

impl<'a> Tag<'a> {
    fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        let (closing, body) = match trimmed.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let name = body
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self { name, closing, raw }
    }

    fn heading_level(&self) -> Option<u8> {
        match self.name.as_bytes() {
            [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
            _ => None,
        }
    }

    fn attribute(&self, key: &str) -> Option<&'a str> {
        let needle = format!("{key}=");
        for (idx, _) in self.raw.match_indices(&needle) {
            let preceded_by_space = self.raw[..idx]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
            if !preceded_by_space {
                continue;
            }
            let value = &self.raw[idx + needle.len()..];
            let quote = value.chars().next()?;
            if quote == '"' || quote == '\'' {
                let inner = &value[1..];
                return inner.find(quote).map(|end| &inner[..end]);
            }
            let end = value
                .find(|c: char| c.is_whitespace() || c == '/')
                .unwrap_or(value.len());
            return Some(&value[..end]);
        }
        None
    }
}

/// Split `html` into headings, paragraphs and images in document order.
pub fn extract_blocks(html: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open: Option<(Open, String)> = None;
    let mut skip_depth = 0usize;
    let mut rest = html;

    while !rest.is_empty() {
        let Some(start) = rest.find('<') else {
            take_text(rest, skip_depth, &mut open, &mut blocks);
            break;
        };
        if start > 0 {
            take_text(&rest[..start], skip_depth, &mut open, &mut blocks);
        }
        let Some(end) = rest[start..].find('>') else {
            break;
        };
        let tag = Tag::parse(&rest[start + 1..start + end]);
        rest = &rest[start + end + 1..];

        match tag.name.as_str() {
            "head" | "style" | "script" | "title" => {
                if tag.closing {
                    skip_depth = skip_depth.saturating_sub(1);
                } else {
                    skip_depth += 1;
                }
            }
            "p" => {
                flush(&mut open, &mut blocks);
                if !tag.closing {
                    open = Some((Open::Paragraph, String::new()));
                }
            }
            "br" => {
                if let Some((_, text)) = open.as_mut() {
                    text.push(' ');
                }
            }
            "img" if skip_depth == 0 => {
                let kind = open.as_ref().map(|(kind, _)| *kind);
                flush(&mut open, &mut blocks);
                if let Some(src) = tag.attribute("src") {
                    blocks.push(Block::Image {
                        src: decode_entities(src),
                    });
                }
                open = kind.map(|k| (k, String::new()));
            }
            _ => {
                if tag.heading_level().is_some() {
                    flush(&mut open, &mut blocks);
                    if !tag.closing {
                        open = tag.heading_level().map(|l| (Open::Heading(l), String::new()));
                    }
                }
            }
        }
    }

    flush(&mut open, &mut blocks);
    blocks
}

fn take_text(text: &str, skip_depth: usize, open: &mut Option<(Open, String)>, blocks: &mut Vec<Block>) {
    if skip_depth > 0 {
        return;
    }
    match open.as_mut() {
        Some((_, buf)) => {
            buf.push(' ');
            buf.push_str(text);
        }
        None => {
            let text = normalize(text);
            if !text.is_empty() {
                blocks.push(Block::Paragraph(text));
            }
        }
    }
}

fn flush(open: &mut Option<(Open, String)>, blocks: &mut Vec<Block>) {
    if let Some((kind, raw)) = open.take() {
        let text = normalize(&raw);
        if text.is_empty() {
            return;
        }
        blocks.push(match kind {
            Open::Heading(level) => Block::Heading { level, text },
            Open::Paragraph => Block::Paragraph(text),
        });
    }
}

/// Collapse whitespace runs and decode the common entities.
fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    decode_entities(&collapsed)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
