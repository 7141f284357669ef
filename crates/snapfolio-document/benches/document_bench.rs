// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the print-to-file path: HTML flattening and PDF
// layout of the bundled document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use snapfolio_core::PrintDocument;
use snapfolio_document::{PdfWriter, extract_blocks};

fn bench_extract_blocks(c: &mut Criterion) {
    let html = PrintDocument::builtin().html();
    c.bench_function("extract_blocks (builtin)", |b| {
        b.iter(|| black_box(extract_blocks(black_box(html))));
    });
}

/// Full render, including printpdf serialisation.
fn bench_render_html(c: &mut Criterion) {
    let html = PrintDocument::builtin().html();
    let writer = PdfWriter::a4();
    c.bench_function("render_html (builtin, A4)", |b| {
        b.iter(|| black_box(writer.render_html(black_box(html))));
    });
}

criterion_group!(benches, bench_extract_blocks, bench_render_html);
criterion_main!(benches);
