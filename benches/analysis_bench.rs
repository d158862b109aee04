//! Benchmarks for text analysis and line reconstruction at varying sizes.
//!
//! Run with: `cargo bench --bench analysis_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glean::{analyze, LineReconstructor, TextFragment};

/// Generate social-media-flavored text of approximately `target_bytes`.
///
/// Mixes plain words with hashtags, mentions, emoji, and line breaks so every
/// counting rule does real work.
fn generate_text(target_bytes: usize) -> String {
    let blocks = [
        "Launching the new release today and the team could not be prouder. ",
        "Huge thanks to @early_adopters for all the feedback! ",
        "#rustlang #opensource ",
        "Every extraction path got faster 🚀 and the reports got sharper 📊.\n",
        "Tell us what you want next — replies are open. ",
    ];

    let mut text = String::with_capacity(target_bytes + 128);
    let mut idx = 0;
    while text.len() < target_bytes {
        text.push_str(blocks[idx % blocks.len()]);
        idx += 1;
    }
    text
}

/// Generate one page of fragments laid out `lines` tall and `per_line` wide,
/// in shuffled-ish insertion order to make the reconstructor sort.
fn generate_fragments(lines: usize, per_line: usize) -> Vec<TextFragment> {
    let mut fragments = Vec::with_capacity(lines * per_line);
    for line in 0..lines {
        for col in 0..per_line {
            let y = 800.0 - line as f32 * 14.2;
            let x = 40.0 + ((per_line - 1 - col) as f32) * 55.0;
            fragments.push(TextFragment::new(format!("w{line}_{col}"), x, y));
        }
    }
    fragments
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for size in [1_000, 10_000, 100_000] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| analyze(black_box(text)));
        });
    }
    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");
    for lines in [10, 100, 1_000] {
        let fragments = generate_fragments(lines, 8);
        let reconstructor = LineReconstructor::default();
        group.bench_with_input(
            BenchmarkId::from_parameter(lines),
            &fragments,
            |b, fragments| {
                b.iter(|| reconstructor.reconstruct(black_box(fragments)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_analyze, bench_reconstruct);
criterion_main!(benches);
