//! Criterion microbenches for flat construction and membership.
//!
//! Random float hyperplanes; the builder's orthogonalization dominates
//! construction, the sequential residual fold dominates membership.
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::DVector;
use polyrep::affine::{AffineSpace, AffineSpaceBuilder};
use polyrep::element::HyperPlane;
use rand::{rngs::StdRng, Rng, SeedableRng};

const DIM: usize = 16;

fn random_planes(rng: &mut StdRng, count: usize) -> Vec<HyperPlane<f64>> {
    (0..count)
        .map(|_| {
            HyperPlane::new(
                DVector::from_fn(DIM, |_, _| rng.gen_range(-1.0..1.0)),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("affine_build");
    for count in [4usize, 16, 64] {
        let mut rng = StdRng::seed_from_u64(42);
        let planes = random_planes(&mut rng, count);
        group.bench_function(BenchmarkId::new("insert_all", count), |b| {
            b.iter_batched(
                || planes.clone(),
                |planes| {
                    let mut builder = AffineSpaceBuilder::new(DIM);
                    for h in planes {
                        let _ = builder.insert(h);
                    }
                    builder.build()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_membership(c: &mut Criterion) {
    let mut group = c.benchmark_group("affine_membership");
    for count in [4usize, 16, 64] {
        let mut rng = StdRng::seed_from_u64(7);
        let flat = AffineSpace::new(DIM, random_planes(&mut rng, count)).unwrap();
        let probe = random_planes(&mut rng, 1).remove(0);
        group.bench_function(BenchmarkId::new("is_member", count), |b| {
            b.iter(|| flat.is_member(&probe).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_membership);
criterion_main!(benches);
