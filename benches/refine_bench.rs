use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use quadbin::prelude::*;

fn scatter(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        // Squaring skews the density toward the origin so refinement depth
        // varies across the grid.
        let u: f64 = rng.gen_range(0.0..1.0);
        let v: f64 = rng.gen_range(0.0..1.0);
        x.push(u * u * 10.0);
        y.push(v * v * 10.0);
    }
    (x, y)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_build");
    for &n in &[10_000usize, 100_000] {
        let (x, y) = scatter(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let points = PointSet::new(&x, &y).unwrap();
                MeshBuilder::new(
                    points,
                    AxisEdges::new(Axis::X, vec![0.0, 2.5, 5.0, 7.5, 10.01]).unwrap(),
                    AxisEdges::new(Axis::Y, vec![0.0, 2.5, 5.0, 7.5, 10.01]).unwrap(),
                    MeshBuilderConfig {
                        min_per_bin: 500,
                        ..Default::default()
                    },
                )
                .unwrap()
                .build()
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let (x, y) = scatter(100_000, 42);
    let points = PointSet::new(&x, &y).unwrap();
    let mesh = MeshBuilder::new(
        points,
        AxisEdges::new(Axis::X, vec![0.0, 2.5, 5.0, 7.5, 10.01]).unwrap(),
        AxisEdges::new(Axis::Y, vec![0.0, 2.5, 5.0, 7.5, 10.01]).unwrap(),
        MeshBuilderConfig {
            min_per_bin: 500,
            ..Default::default()
        },
    )
    .unwrap()
    .build()
    .unwrap();

    c.bench_function("classify_100k", |b| {
        b.iter(|| classify(&mesh, points))
    });
}

criterion_group!(benches, bench_build, bench_classify);
criterion_main!(benches);
