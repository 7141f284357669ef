// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// snapfolio-document: turns the print document into something a desktop
// can hand around: HTML is flattened into headings, paragraphs and image
// captions, then laid out into a PDF.

pub mod html;
pub mod pdf;

pub use html::{Block, extract_blocks};
pub use pdf::writer::PdfWriter;
