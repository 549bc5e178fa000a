//! Criterion benchmarks for the transform pipeline.
//! Focus sizes: n in {64, 512, 4096} points.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gemmini::prelude::*;
use gemmini::rand::uniform_points;

fn cloud(n: usize, seed: u64) -> Geometry {
    let points = uniform_points(n, 20.0, 10.0, ReplayToken::new(seed, 0));
    Geometry::new(&PointCloud { points }).unwrap()
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    for &n in &[64usize, 512, 4096] {
        group.bench_with_input(BenchmarkId::new("rigid_chain", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 41),
                |mut g| {
                    g.translate(1.5, -0.5).rotate(0.3).scale(1.2, None).flip_x();
                    g
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("radial", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 42),
                |mut g| {
                    let _ = g
                        .distort(DistortMethod::Barrel, 0.4)
                        .and_then(|g| g.shatter(Point::new(10.0, 5.0), 0.2));
                    g
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("reflect_xy", n), &n, |b, &n| {
            b.iter_batched(
                || cloud(n, 43),
                |mut g| {
                    g.reflect_xy();
                    g
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
