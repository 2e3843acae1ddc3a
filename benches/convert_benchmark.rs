//! Benchmarks for textconv cleaning and conversion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;
use textconv::cleanup::{clean_pages, expand_ligatures, is_numeric_row, KNOWN_LIGATURES};
use textconv::{ConvertOverrides, DocumentConverter, Page, TextConverter};

/// Creates synthetic report text mixing prose and numeric rows.
fn create_test_text(page_count: usize) -> String {
    let mut text = String::new();
    for page in 0..page_count {
        if page > 0 {
            text.push('\u{000C}');
        }
        for row in 0..40 {
            if row % 3 == 0 {
                text.push_str(&format!("{} {} {} {}\n", row, row * 7, row * 13, page));
            } else {
                text.push_str("The ﬁgures below summarize the quarter for each region.\n");
            }
        }
    }
    text
}

fn bench_numeric_row(c: &mut Criterion) {
    c.bench_function("is_numeric_row_table", |b| {
        b.iter(|| is_numeric_row(black_box("2019 2020 2021 2022 total")));
    });

    c.bench_function("is_numeric_row_prose", |b| {
        b.iter(|| is_numeric_row(black_box("Revenue grew by 12 percent in 2021.")));
    });
}

fn bench_clean_pages(c: &mut Criterion) {
    let text = create_test_text(50);
    let pages = Page::split_pages(&text);

    c.bench_function("clean_pages_50", |b| {
        b.iter(|| clean_pages(black_box(&pages), true, Path::new("bench.txt")));
    });

    c.bench_function("expand_ligatures_50", |b| {
        b.iter(|| expand_ligatures(black_box(&text), KNOWN_LIGATURES));
    });
}

fn bench_convert_file(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    std::fs::write(&path, create_test_text(50)).unwrap();

    let converter = TextConverter::new();
    let overrides = ConvertOverrides::new().with_remove_numeric_tables(true);

    c.bench_function("convert_file_50", |b| {
        b.iter(|| converter.convert(black_box(&path), None, &overrides).unwrap());
    });
}

criterion_group!(
    benches,
    bench_numeric_row,
    bench_clean_pages,
    bench_convert_file
);
criterion_main!(benches);
