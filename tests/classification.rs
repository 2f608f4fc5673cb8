//! Classifier contracts: completeness, idempotence, visit soundness, and
//! frozen-mesh serialization.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use quadbin::prelude::*;

fn build_mesh(x: &[f64], y: &[f64], min_per_bin: u64) -> Mesh {
    let points = PointSet::new(x, y).unwrap();
    MeshBuilder::new(
        points,
        AxisEdges::new(Axis::X, vec![0.0, 0.5, 1.0]).unwrap(),
        AxisEdges::new(Axis::Y, vec![0.0, 0.5, 1.0]).unwrap(),
        MeshBuilderConfig {
            min_per_bin,
            ..Default::default()
        },
    )
    .unwrap()
    .build()
    .unwrap()
}

fn random_unit_points(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        x.push(rng.gen_range(0.0..1.0));
        y.push(rng.gen_range(0.0..1.0));
    }
    (x, y)
}

/// Every finite point strictly inside the coarse bounds gets a real bin,
/// and the assigned cell actually contains it.
#[test]
fn classification_is_complete_inside_bounds() {
    let (x, y) = random_unit_points(2_000, 21);
    let mesh = build_mesh(&x, &y, 150);
    let points = PointSet::new(&x, &y).unwrap();
    let classification = classify(&mesh, points);

    assert!(classification.is_trusted());
    for (i, bin) in classification.bins().iter().enumerate() {
        let index = bin.index().expect("in-bounds point must be assigned");
        assert!(
            mesh.cells()[index].contains(x[i], y[i]),
            "point {i} assigned to a cell that does not contain it"
        );
    }
}

/// Classifying the same points against the same frozen mesh twice yields
/// identical assignments.
#[test]
fn classification_is_idempotent() {
    let (x, y) = random_unit_points(1_000, 22);
    let mesh = build_mesh(&x, &y, 100);
    let points = PointSet::new(&x, &y).unwrap();

    let first = classify(&mesh, points);
    let second = classify(&mesh, points);
    assert_eq!(first.bins(), second.bins());
    assert_eq!(first.visits(), second.visits());
}

/// Visit counts sum to the number of non-sentinel classifications, with and
/// without out-of-bounds points in the input.
#[test]
fn visit_counts_are_sound() {
    let (mut x, mut y) = random_unit_points(500, 23);
    x.extend([3.0, -1.0, f64::NAN]);
    y.extend([0.5, 0.5, 0.5]);
    let mesh = build_mesh(&x[..500], &y[..500], 80);
    let points = PointSet::new(&x, &y).unwrap();

    let classification = classify(&mesh, points);
    let assigned = classification
        .bins()
        .iter()
        .filter(|b| !b.is_out_of_mesh())
        .count() as u64;
    assert_eq!(classification.visits().iter().sum::<u64>(), assigned);
    assert_eq!(assigned, 500);
}

/// Categories cover exactly the assigned bins, sentinel excluded.
#[test]
fn categories_match_nonzero_visits() {
    let (x, y) = random_unit_points(800, 24);
    let mesh = build_mesh(&x, &y, 120);
    let points = PointSet::new(&x, &y).unwrap();
    let classification = classify(&mesh, points);

    let categories = BinCategories::from_bins(classification.bins());
    for (index, &visits) in classification.visits().iter().enumerate() {
        assert_eq!(categories.contains(index), visits > 0);
    }
}

/// A frozen mesh survives a serde round-trip and classifies identically.
#[test]
fn frozen_mesh_round_trips_through_serde() {
    let (x, y) = random_unit_points(600, 25);
    let mesh = build_mesh(&x, &y, 90);
    let points = PointSet::new(&x, &y).unwrap();

    let json = serde_json::to_string(&mesh).unwrap();
    let restored: Mesh = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.cells(), mesh.cells());
    assert_eq!(
        classify(&restored, points).bins(),
        classify(&mesh, points).bins()
    );
}
