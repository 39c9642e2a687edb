//! Picking and edit latency on filled grids.
//!
//! Run with: cargo bench --package voxmod-model --bench pick_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use voxmod_core::{Ray, Rgba};
use voxmod_model::VoxelModel;

/// Model whose center row along X is filled from the seed to the border.
fn filled_row(size: usize) -> VoxelModel {
    let mut model = VoxelModel::new(size);
    let ray = Ray::new(Vec3::new(1000.0, 0.5, 0.5), Vec3::NEG_X);
    for _ in 0..size {
        model.modify(&ray, Rgba::new(0.8, 0.2, 0.2, 1.0)).unwrap();
    }
    model
}

fn benchmark_pick(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");

    for size in [8, 16, 32] {
        let model = filled_row(size);
        let ray = Ray::new(Vec3::new(1000.0, 0.5, 0.5), Vec3::NEG_X);
        group.bench_with_input(BenchmarkId::from_parameter(size), &model, |b, model| {
            b.iter(|| black_box(model.pick(black_box(&ray))));
        });
    }

    group.finish();
}

fn benchmark_modify(c: &mut Criterion) {
    let mut group = c.benchmark_group("modify");
    group.sample_size(20);

    for size in [8, 16, 32] {
        let model = filled_row(size);
        let ray = Ray::new(Vec3::new(0.5, 1000.0, 0.5), Vec3::NEG_Y);
        group.bench_with_input(BenchmarkId::from_parameter(size), &model, |b, model| {
            b.iter_batched(
                || model.encode(),
                |bytes| {
                    let mut model = VoxelModel::decode(&bytes).unwrap();
                    black_box(model.modify(&ray, Rgba::new(0.2, 0.8, 0.2, 1.0)).unwrap())
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pick, benchmark_modify);
criterion_main!(benches);
