//! Benchmarks for synthesis and spectrum analysis
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use oscilloscope_rs::analysis::{analyze, SpectrumAnalyzer};
use oscilloscope_rs::synthesis::generate_sine;
use oscilloscope_rs::types::linspace;

fn bench_generate_sine(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_sine");

    for size in [300, 4096, 65_536].iter() {
        let t = linspace(0.0, 3.0, *size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("sine", size), &t, |b, t| {
            b.iter(|| generate_sine(black_box(t), black_box(1.0)));
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    // Non-power-of-two sizes exercise the mixed-radix and prime-length paths
    for size in [300, 1024, 4099, 65_536].iter() {
        let signal = generate_sine(&linspace(0.0, 3.0, *size), 1.0);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("fresh", size), &signal, |b, signal| {
            b.iter(|| analyze(black_box(signal), 3.0));
        });

        let mut analyzer = SpectrumAnalyzer::new();
        group.bench_with_input(BenchmarkId::new("cached_plan", size), &signal, |b, signal| {
            b.iter(|| analyzer.analyze(black_box(signal), 3.0));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate_sine, bench_analyze);
criterion_main!(benches);
