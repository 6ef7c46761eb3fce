//! Scanner throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rtflex_scanner::{scan, Scanner};

const HEADER: &str = r"{\rtf1\ansi\ansicpg1252\deff0\nouicompat\deflang1033{\fonttbl{\f0\fnil\fcharset0 Calibri;}{\f1\fswiss\fprq2\fcharset0 Arial;}}
{\colortbl ;\red255\green0\blue0;\red0\green77\blue187;}
{\*\generator Riched20 10.0.19041}\viewkind4\uc1
";

const PARAGRAPH: &str = r"\pard\sa200\sl276\slmult1\f0\fs22\lang9 The quick brown fox jumps over the lazy dog. {\b Bold} and {\i italic} text, a literal \\ backslash and \{braces\}.\par
\pard\li720\ri-360\cf1\tab Indented line with a\~non-breaking space and an \'e9 escape.\par
";

/// A document with `paragraphs` copies of the sample paragraph.
fn generate_document(paragraphs: usize) -> String {
    let mut source = String::with_capacity(HEADER.len() + PARAGRAPH.len() * paragraphs + 1);
    source.push_str(HEADER);
    for _ in 0..paragraphs {
        source.push_str(PARAGRAPH);
    }
    source.push('}');
    source
}

fn bench_scan(c: &mut Criterion) {
    let source = generate_document(100);
    c.bench_function("scan_document_100_paragraphs", |b| {
        b.iter(|| scan(black_box(&source)))
    });

    let plain = "lorem ipsum dolor sit amet ".repeat(2000);
    c.bench_function("scan_plain_text", |b| b.iter(|| scan(black_box(&plain))));

    let controls = r"\b\i\ul\fs24\cf2\highlight3 ".repeat(2000);
    c.bench_function("scan_control_words", |b| {
        b.iter(|| scan(black_box(&controls)))
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for paragraphs in [10, 100, 1000] {
        let source = generate_document(paragraphs);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("scan_with_spans", paragraphs),
            &source,
            |b, source| b.iter(|| Scanner::new(black_box(source)).scan()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scan, bench_scaling);
criterion_main!(benches);
