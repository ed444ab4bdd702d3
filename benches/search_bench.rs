//! Benchmarks for the constrained search and the furthest distance estimate.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lodgroup::{furthest_distance, search, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform points over a `side` x `side` square.
fn scatter(n: usize, side: f64, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| vec![rng.random_range(0.0..side), rng.random_range(0.0..side), 0.0])
        .collect()
}

fn bench_furthest(c: &mut Criterion) {
    let mut group = c.benchmark_group("furthest_distance");
    for n in [10, 100, 1_000, 10_000] {
        let points = scatter(n, 1000.0, 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| black_box(furthest_distance(points)))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("constrained_search");
    group.sample_size(10);

    for n in [100, 400] {
        let points = scatter(n, 3000.0, 2);
        for (name, strategy) in [("balanced", Strategy::Balanced), ("uneven", Strategy::Uneven)] {
            group.bench_with_input(BenchmarkId::new(name, n), &points, |b, points| {
                b.iter(|| black_box(search(points, Some(64), 420.0, strategy)))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_furthest, bench_search);
criterion_main!(benches);
