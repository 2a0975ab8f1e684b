//! # Kernel Performance Benchmark
//!
//! Targets:
//! - Pool churn: acquire + release with zero steady-state allocations
//! - Spatial rebuild + query at a few thousand movers
//! - Motion tick well under a microsecond per entity
//!
//! Run with: `cargo bench --package sidestep_core`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sidestep_core::{
    Aabb, MotionController, MotionState, MotionTuning, ObjectPool, SpatialIndex, TickInput, Vec2,
};

/// Fixed simulation timestep used by the motion benchmarks.
const DT: f32 = 1.0 / 60.0;

/// Benchmark: steady-state pool churn, no growth.
fn bench_pool_churn(c: &mut Criterion) {
    c.bench_function("pool_churn_1024", |b| {
        let mut pool = ObjectPool::new(|| [0.0f32; 4], 1024);
        let mut handles = Vec::with_capacity(1024);

        b.iter(|| {
            for _ in 0..1024 {
                handles.push(pool.acquire());
            }
            for handle in handles.drain(..) {
                pool.release(black_box(handle));
            }
            pool.available_count()
        });
    });
}

/// Benchmark: the per-tick clear + re-insert + query cycle.
fn bench_spatial_rebuild_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_rebuild_query");

    for count in [256usize, 1024, 4096] {
        // Deterministic scatter over a 256x256 world, cell size 8.
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let bodies: Vec<(u32, Aabb)> = (0..count)
            .map(|id| {
                let center = Vec2::new(rng.gen_range(0.0..256.0), rng.gen_range(0.0..256.0));
                (id as u32, Aabb::from_center(center, 1.0, 1.0))
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &bodies, |b, bodies| {
            let mut index = SpatialIndex::new(8.0).unwrap();
            b.iter(|| {
                index.clear();
                for &(id, bounds) in bodies.iter() {
                    index.insert(id, bounds);
                }
                let hits = index.query(Aabb::new(
                    Vec2::new(64.0, 64.0),
                    Vec2::new(128.0, 128.0),
                ));
                black_box(hits.len())
            });
        });
    }

    group.finish();
}

/// Benchmark: one motion tick across a crowd of entities.
fn bench_motion_tick(c: &mut Criterion) {
    c.bench_function("motion_tick_1000_entities", |b| {
        let controller = MotionController::new(MotionTuning::default()).unwrap();
        let mut states = vec![MotionState::default(); 1000];
        let input = TickInput {
            axis: 1.0,
            grounded: true,
            ..TickInput::default()
        };

        b.iter(|| {
            for state in &mut states {
                black_box(controller.tick(state, input, DT));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_pool_churn,
    bench_spatial_rebuild_query,
    bench_motion_tick
);
criterion_main!(benches);
