//! Criterion benchmarks for the expansion engine hot path.
//!
//! Benchmarks:
//!   - frontier push/pop churn with jittered keys
//!   - one round (5 water steps) on a 64x64 Perlin map with two sources
//!   - 500 rounds from a dry start
//!
//! Run with: cargo bench -p simulation --bench expansion_bench

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use simulation::config::{EngineSettings, FloodConfig};
use simulation::frontier::FrontierQueue;
use simulation::grid::Coord;
use simulation::world_init::build_engine;

fn bench_config() -> FloodConfig {
    let mut config = FloodConfig::default();
    config.terrain.cave_threshold = 0.0;
    config
}

// ---------------------------------------------------------------------------
// Benchmark: frontier queue
// ---------------------------------------------------------------------------

fn bench_frontier(c: &mut Criterion) {
    let mut group = c.benchmark_group("frontier");

    group.bench_function("push_pop_1k", |b| {
        b.iter_batched(
            || FrontierQueue::new(EngineSettings::default().depth_first_factor, ChaCha8Rng::seed_from_u64(1)),
            |mut q| {
                for i in 0..1_000usize {
                    let _ = q.push(Coord::new(i % 64, i / 64), Some((i % 9) as u32), 10.0);
                }
                while let Ok(pair) = q.pop() {
                    black_box(pair);
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: engine rounds
// ---------------------------------------------------------------------------

fn bench_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_rounds");
    let config = bench_config();

    group.bench_function("single_round_warm", |b| {
        let mut engine = build_engine(&config);
        for round in 1..=200 {
            let _ = engine.run_round(round);
        }
        let mut round = 200;
        b.iter(|| {
            round += 1;
            black_box(engine.run_round(black_box(round)))
        });
    });

    group.sample_size(20);
    group.bench_function("500_rounds_from_dry", |b| {
        b.iter_batched(
            || build_engine(&config),
            |mut engine| {
                for round in 1..=500 {
                    let _ = engine.run_round(round);
                }
                black_box(engine.total_water())
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_frontier, bench_rounds);
criterion_main!(benches);
