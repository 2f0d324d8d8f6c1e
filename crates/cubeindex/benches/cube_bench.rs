//! Criterion microbenches for the per-sequence hot path of the builder.
//!
//! - `apply`: a 12-move string on the solved cube.
//! - `encode`: canonical identity over all 24 rotations.
//! - `index_record`: apply + encode + solution packing.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use cubeindex::api::{encode, index_record, random_scramble, CubeState};
use rand::{rngs::StdRng, SeedableRng};

fn scrambles(n: usize, len: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| random_scramble(&mut rng, len)).collect()
}

fn bench_cube(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube");
    let pool = scrambles(64, 12, 42);
    let mut k = 0usize;
    group.bench_function(BenchmarkId::new("apply", 12), |b| {
        b.iter_batched(
            || {
                k = (k + 1) % pool.len();
                pool[k].clone()
            },
            |moves| {
                let _ = CubeState::solved().after(&moves);
            },
            BatchSize::SmallInput,
        )
    });

    let states: Vec<CubeState> = pool
        .iter()
        .filter_map(|m| CubeState::solved().after(m).ok())
        .collect();
    let mut k = 0usize;
    group.bench_function(BenchmarkId::new("encode", "24-rotations"), |b| {
        b.iter_batched(
            || {
                k = (k + 1) % states.len();
                states[k]
            },
            |state| {
                let _ = encode(&state);
            },
            BatchSize::SmallInput,
        )
    });

    for &len in &[4usize, 8, 16] {
        let pool = scrambles(32, len, 7);
        let mut k = 0usize;
        group.bench_with_input(BenchmarkId::new("index_record", len), &len, |b, _| {
            b.iter_batched(
                || {
                    k = (k + 1) % pool.len();
                    pool[k].clone()
                },
                |moves| {
                    let _ = index_record(&moves);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cube);
criterion_main!(benches);
