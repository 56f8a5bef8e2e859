//! Criterion microbenches for lazy operator materialization.
//!
//! The Minkowski point stream is the quadratic hot path; the Cartesian
//! product measures per-element padding into the joint space.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DVector;
use polyrep::element::HalfSpace;
use polyrep::ops::{cartesian_product, cartesian_product_v, minkowski_sum};
use polyrep::rep::{HRep, SplitHRep, SplitVRep, VRep};
use rand::{rngs::StdRng, Rng, SeedableRng};

const DIM: usize = 8;

fn random_points(rng: &mut StdRng, count: usize) -> SplitVRep<f64> {
    let points = (0..count)
        .map(|_| DVector::from_fn(DIM, |_, _| rng.gen_range(-1.0..1.0)))
        .collect();
    SplitVRep::from_points(DIM, points).unwrap()
}

fn random_halves(rng: &mut StdRng, count: usize) -> SplitHRep<f64> {
    let halves = (0..count)
        .map(|_| {
            HalfSpace::new(
                DVector::from_fn(DIM, |_, _| rng.gen_range(-1.0..1.0)),
                1.0,
            )
        })
        .collect();
    SplitHRep::new(DIM, Vec::new(), halves).unwrap()
}

fn bench_minkowski(c: &mut Criterion) {
    let mut group = c.benchmark_group("minkowski_sum");
    for count in [8usize, 32] {
        let mut rng = StdRng::seed_from_u64(13);
        let a = random_points(&mut rng, count);
        let b = random_points(&mut rng, count);
        let view = minkowski_sum(&a, &b).unwrap();
        group.bench_function(BenchmarkId::new("materialize_points", count), |b| {
            b.iter(|| view.points().count())
        });
    }
    group.finish();
}

fn bench_cartesian(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartesian_product");
    let mut rng = StdRng::seed_from_u64(29);
    let a = random_halves(&mut rng, 32);
    let b = random_halves(&mut rng, 32);
    let prod = cartesian_product(&a, &b);
    group.bench_function(BenchmarkId::new("h_concrete", 64), |bch| {
        bch.iter(|| prod.concrete())
    });
    let va = random_points(&mut rng, 32);
    let vb = random_points(&mut rng, 32);
    let vprod = cartesian_product_v(&va, &vb);
    group.bench_function(BenchmarkId::new("v_concrete", 64), |bch| {
        bch.iter(|| vprod.concrete())
    });
    group.finish();
}

criterion_group!(benches, bench_minkowski, bench_cartesian);
criterion_main!(benches);
