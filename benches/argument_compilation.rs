//! Benchmarks for Ghostscript argument compilation
//!
//! Tests the cost of resolving option defaults and building argument lists.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdfforge_core::ConversionOptions;
use pdfforge_gs::compile_arguments;
use std::path::{Path, PathBuf};

fn input_path() -> PathBuf {
    Path::new("/srv/archive/2024/invoices")
        .join("Invoice 2024-03-17 (final, signed).pdf")
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_arguments");
    let input = input_path();

    let cases = [
        ("compress", ConversionOptions::default()),
        (
            "compress_preset",
            ConversionOptions::default().with_pdf_settings("ebook"),
        ),
        ("pdfa", ConversionOptions::pdfa()),
        (
            "pdfa_explicit_output",
            ConversionOptions::pdfa()
                .with_pdf_settings("printer")
                .with_output_directory("/srv/archive/pdfa")
                .with_output_file("invoice-2024-03-17"),
        ),
    ];

    for (name, options) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), options, |b, options| {
            b.iter(|| compile_arguments(black_box(&input), black_box(options)))
        });
    }

    group.finish();
}

fn bench_merge_defaults(c: &mut Criterion) {
    let defaults = ConversionOptions::pdfa()
        .with_pdf_settings("prepress")
        .with_output_directory("/srv/out");
    let call = ConversionOptions::default().with_output_file("custom");

    c.bench_function("merged_over", |b| {
        b.iter(|| black_box(&call).merged_over(black_box(&defaults)))
    });
}

criterion_group!(benches, bench_compile, bench_merge_defaults);
criterion_main!(benches);
