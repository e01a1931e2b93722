//! Benchmarks for spatia operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use spatia_math::{Euler, Mat4, Quat, RotationOrder, Vec3, simd};
use spatia_scene::SceneGraph;

/// Benchmark TRS composition and decomposition.
fn bench_trs(c: &mut Criterion) {
    let mut group = c.benchmark_group("trs");

    let position = Vec3::new(1.0, -2.0, 3.5);
    let rotation = Quat::from_euler(&Euler::new(0.3, 1.1, -0.7, RotationOrder::Xyz));
    let scale = Vec3::new(2.0, 0.5, 1.5);
    let m = Mat4::compose(position, rotation, scale);

    group.bench_function("compose", |b| {
        b.iter(|| Mat4::compose(black_box(position), black_box(rotation), black_box(scale)))
    });

    group.bench_function("decompose", |b| b.iter(|| black_box(&m).decompose()));

    group.bench_function("invert", |b| b.iter(|| black_box(&m).invert()));

    group.finish();
}

/// Benchmark Euler conversions for every order.
fn bench_euler(c: &mut Criterion) {
    let mut group = c.benchmark_group("euler");

    for order in RotationOrder::ALL {
        let e = Euler::new(0.4, -0.9, 2.2, order);
        let m = Mat4::from_euler(&e);

        group.bench_with_input(BenchmarkId::new("to_matrix", order), &e, |b, e| {
            b.iter(|| Mat4::from_euler(black_box(e)))
        });

        group.bench_with_input(BenchmarkId::new("from_matrix", order), &m, |b, m| {
            b.iter(|| Euler::from_rotation_matrix(black_box(m), order))
        });

        group.bench_with_input(BenchmarkId::new("to_quat", order), &e, |b, e| {
            b.iter(|| Quat::from_euler(black_box(e)))
        });
    }

    group.finish();
}

/// Uniform tree with `branching` children per node.
fn build_tree(depth: usize, branching: usize) -> SceneGraph {
    let mut graph = SceneGraph::new();
    let root = graph.create_node("root");
    let mut level = vec![root];

    for d in 0..depth {
        let mut next = Vec::with_capacity(level.len() * branching);
        for &parent in &level {
            for i in 0..branching {
                let child = graph.create_node(format!("{d}.{i}"));
                if let Ok(node) = graph.get_mut(child) {
                    node.set_position(Vec3::new(1.0, 0.0, 0.25 * i as f64));
                    node.rotate_y(0.1 * (i + 1) as f64);
                }
                if graph.add(parent, child).is_ok() {
                    next.push(child);
                }
            }
        }
        level = next;
    }
    graph
}

/// Benchmark forced world-matrix propagation, sequential vs parallel.
fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation");

    for (depth, branching) in [(4, 4), (6, 4), (8, 3)] {
        let mut graph = build_tree(depth, branching);
        let label = format!("{depth}x{branching}");
        group.throughput(Throughput::Elements(graph.len() as u64));

        group.bench_function(BenchmarkId::new("sequential", &label), |b| {
            b.iter(|| graph.update_world_matrices(black_box(true)))
        });

        group.bench_function(BenchmarkId::new("parallel", &label), |b| {
            b.iter(|| graph.update_world_matrices_parallel(black_box(true)))
        });
    }

    group.finish();
}

/// Benchmark batch point transforms.
fn bench_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("points");

    let m = Mat4::compose(
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.5),
        Vec3::splat(2.0),
    );

    for size in [1_000usize, 100_000] {
        let points: Vec<Vec3> = (0..size)
            .map(|i| Vec3::new(i as f64, (i % 7) as f64, -(i as f64) * 0.5))
            .collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &points, |b, p| {
            b.iter(|| p.iter().map(|&v| m.transform_point3(black_box(v))).collect::<Vec<_>>())
        });

        group.bench_with_input(BenchmarkId::new("simd", size), &points, |b, p| {
            b.iter(|| simd::transform_points(black_box(&m), p))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_trs, bench_euler, bench_propagation, bench_points);
criterion_main!(benches);
