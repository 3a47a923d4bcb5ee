//! Benchmarks for outline derivation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the structure passes over synthetic token streams.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfbrief::{build_outline, classify, Token};

/// Creates a synthetic token stream with the given number of numbered
/// sections, each followed by a block of body words.
fn synthetic_tokens(sections: usize, words_per_section: usize) -> Vec<Token> {
    let mut tokens = vec![Token::new("Benchmark Report", 24)];

    for s in 0..sections {
        tokens.push(Token::new(format!("{}.", s + 1), 14));
        tokens.push(Token::new(format!("Section {}", s + 1), 14));
        tokens.push(Token::new("Details", 14));
        for w in 0..words_per_section {
            tokens.push(Token::new(format!("word{}", w), 11));
        }
    }

    tokens
}

/// Benchmark the full outline derivation at various document sizes.
fn bench_build_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_outline");

    for sections in [10, 100, 1000].iter() {
        let tokens = synthetic_tokens(*sections, 40);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| build_outline(black_box(&tokens)));
        });
    }

    group.finish();
}

/// Benchmark classification across the whole interesting size range.
fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_range", |b| {
        b.iter(|| {
            for size in -10..60 {
                black_box(classify(black_box(size)));
            }
        });
    });
}

criterion_group!(benches, bench_build_outline, bench_classify);
criterion_main!(benches);
