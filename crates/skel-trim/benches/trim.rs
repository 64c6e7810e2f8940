use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use skel_core::config::TrimConfig;
use skel_core::model::{Edge, Skeleton};
use skel_trim::trim_skeleton;

/// A long trunk with a short tick every `tick_interval` vertices and a
/// short dust speck every `dust_interval` vertices, roughly approximating
/// the shape of a merged-chunk skeleton before trimming.
fn synthetic_skeleton(trunk_len: usize) -> Skeleton {
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    let mut radii = Vec::new();

    for i in 0..trunk_len {
        vertices.push([i as f64 * 1000.0, 0.0, 0.0]);
        radii.push(50.0);
        if i > 0 {
            edges.push(Edge(i as u32 - 1, i as u32));
        }

        if i % 17 == 3 {
            let tick_index = vertices.len() as u32;
            vertices.push([i as f64 * 1000.0, 500.0, 0.0]);
            radii.push(50.0);
            edges.push(Edge(i as u32, tick_index));
        }

        if i % 31 == 7 {
            let base = vertices.len() as u32;
            vertices.push([i as f64 * 1000.0 + 50_000.0, 50_000.0, 0.0]);
            vertices.push([i as f64 * 1000.0 + 50_001.0, 50_000.0, 0.0]);
            radii.push(10.0);
            radii.push(10.0);
            edges.push(Edge(base, base + 1));
        }
    }

    Skeleton {
        id: 1,
        vertices,
        edges,
        radii,
        vertex_types: None,
    }
}

fn bench_trim(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim_skeleton");
    for trunk_len in [100usize, 1_000, 5_000] {
        let skeleton = synthetic_skeleton(trunk_len);
        group.bench_with_input(BenchmarkId::from_parameter(trunk_len), &skeleton, |b, skeleton| {
            b.iter(|| trim_skeleton(skeleton, TrimConfig::default()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_trim);
criterion_main!(benches);
