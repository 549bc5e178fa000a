//! Criterion benchmarks for concave hulls and interior fill.
//! Focus sizes: n in {50, 200, 1000} points.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gemmini::calc::{concave_hull, convex_hull, interior_pixels, Point};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_cloud(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(-5.0..5.0), rng.gen_range(-3.0..3.0)))
        .collect()
}

fn ring(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            Point::new(4.0 * t.cos(), 2.0 * t.sin())
        })
        .collect()
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[50usize, 200, 1000] {
        group.bench_with_input(BenchmarkId::new("concave", n), &n, |b, &n| {
            b.iter_batched(
                || random_cloud(n, 7),
                |pts| {
                    let _h = concave_hull(&pts, 0.9);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("convex", n), &n, |b, &n| {
            b.iter_batched(
                || random_cloud(n, 8),
                |pts| {
                    let _h = convex_hull(&pts);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("interior_fill", n), &n, |b, &n| {
            let boundary = ring(n);
            b.iter(|| {
                let _pts = interior_pixels(&boundary, 32).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);
