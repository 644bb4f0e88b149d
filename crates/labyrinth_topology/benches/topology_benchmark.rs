//! Benchmark for topology index arithmetic.
//!
//! TARGET: branch expansion of every vertex in a 256x256 torus under 5ms
//!
//! Run with: cargo bench --package labyrinth_topology --bench topology_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use labyrinth_topology::{Orientation, Topology, TopologyGraph};

fn benchmark_vertex_round_trip(c: &mut Criterion) {
    let graph = TopologyGraph::new(Topology::Mobius, 256, 256).unwrap();

    c.bench_function("vertex_round_trip_mobius", |b| {
        let mut v = 0u32;
        b.iter(|| {
            v = (v + 7919) % graph.vertex_count();
            let loc = graph.vertex_location_from_index(black_box(v));
            black_box(graph.vertex_index_from_location(loc.x, loc.z))
        });
    });
}

fn benchmark_edge_index(c: &mut Criterion) {
    let graph = TopologyGraph::new(Topology::Outdoor, 256, 256).unwrap();

    c.bench_function("edge_index_outdoor", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = (x + 13) % 256;
            black_box(graph.edge_index_from_location(
                black_box(Orientation::Vertical),
                black_box(x),
                black_box(x / 2),
            ))
        });
    });
}

fn benchmark_full_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_expansion");

    for topology in Topology::ALL {
        let graph = TopologyGraph::new(topology, 256, 256).unwrap();
        group.throughput(Throughput::Elements(u64::from(graph.vertex_count())));
        group.bench_with_input(
            BenchmarkId::from_parameter(topology),
            &graph,
            |b, graph| {
                b.iter(|| {
                    let mut total = 0usize;
                    for v in graph.vertices() {
                        total += graph.branches_of_vertex(v).len();
                    }
                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_vertex_round_trip,
    benchmark_edge_index,
    benchmark_full_expansion
);
criterion_main!(benches);
