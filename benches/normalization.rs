//! Benchmarks for series normalization
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trace_charts::geometry::{line_document, SvgStyle};
use trace_charts::{normalize_bar, normalize_line, normalize_step, GeometryCache, Sample};

/// Noisy sine readings with a sprinkling of gaps and status changes
fn sensor_series(len: usize) -> Vec<Sample> {
    (0..len)
        .map(|i| {
            let t = i as f64 * 0.01;
            let value = if i % 97 == 0 {
                f64::NAN
            } else {
                20.0 + 5.0 * t.sin() + (i % 7) as f64 * 0.1
            };
            let status = match i % 50 {
                0 => 20,
                1..=4 => 10,
                _ => 0,
            };
            Sample::new(format!("t{}", i), value).with_status(status)
        })
        .collect()
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [100, 1_000, 10_000].iter() {
        let samples = sensor_series(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("line", size), &samples, |b, s| {
            b.iter(|| normalize_line(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("step", size), &samples, |b, s| {
            b.iter(|| normalize_step(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("bar", size), &samples, |b, s| {
            b.iter(|| normalize_bar(black_box(s)))
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry_cache");

    for size in [1_000, 10_000].iter() {
        let samples = sensor_series(*size);

        group.bench_with_input(BenchmarkId::new("hit", size), &samples, |b, s| {
            let mut cache = GeometryCache::default();
            cache.line(s);
            b.iter(|| cache.line(black_box(s)).points.len())
        });
        group.bench_with_input(BenchmarkId::new("uncached", size), &samples, |b, s| {
            b.iter(|| normalize_line(black_box(s)).points.len())
        });
    }

    group.finish();
}

fn bench_svg_export(c: &mut Criterion) {
    let samples = sensor_series(5_000);
    let geometry = normalize_line(&samples);
    let style = SvgStyle::default();

    c.bench_function("line_document_5000", |b| {
        b.iter(|| line_document(black_box(&geometry), &style))
    });
}

criterion_group!(benches, bench_modes, bench_cache, bench_svg_export);
criterion_main!(benches);
