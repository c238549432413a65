//! Record-path benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use latmark_stats::{ExponentialConfig, LatencyTracker, LinearConfig};
use std::hint::black_box;

fn bench_record(c: &mut Criterion) {
    let exponential = LatencyTracker::exponential(ExponentialConfig::default()).unwrap();
    let mut us = 0u64;
    c.bench_function("record_exponential", |b| {
        b.iter(|| {
            us = (us + 137) % 60_000;
            exponential.record(black_box(us), 0, 1);
        })
    });

    let linear = LatencyTracker::linear(LinearConfig::default()).unwrap();
    let mut us = 0u64;
    c.bench_function("record_linear", |b| {
        b.iter(|| {
            us = (us + 137) % 60_000;
            linear.record(black_box(us), 0, 1);
        })
    });
}

criterion_group!(benches, bench_record);
criterion_main!(benches);
