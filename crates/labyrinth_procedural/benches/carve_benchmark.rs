//! Benchmark for maze carving.
//!
//! TARGET: a 64x64 carve under 1ms on any topology
//!
//! Run with: cargo bench --package labyrinth_procedural --bench carve_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use labyrinth_procedural::{carve, carve_flat, FlatGrid, MazeLayout, WorldSeed};
use labyrinth_topology::{Topology, TopologyGraph};
use std::num::NonZeroU32;

fn benchmark_carve(c: &mut Criterion) {
    let mut group = c.benchmark_group("carve_64x64");

    for topology in Topology::ALL {
        let graph = TopologyGraph::new(topology, 64, 64).unwrap();
        group.throughput(Throughput::Elements(u64::from(graph.vertex_count())));
        group.bench_with_input(BenchmarkId::from_parameter(topology), &graph, |b, graph| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(carve(graph, &mut WorldSeed::new(seed).rng()))
            });
        });
    }

    group.finish();
}

fn benchmark_carve_flat(c: &mut Criterion) {
    c.bench_function("carve_flat_chunk", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            black_box(carve_flat(FlatGrid::CHUNK, &mut WorldSeed::new(seed).rng()))
        });
    });
}

fn benchmark_layout(c: &mut Criterion) {
    let graph = TopologyGraph::new(Topology::Torus, 64, 64).unwrap();
    let maze = carve(&graph, &mut WorldSeed::new(42).rng());
    let hall = NonZeroU32::new(2).unwrap();

    c.bench_function("layout_torus_64x64", |b| {
        b.iter(|| black_box(MazeLayout::build(&graph, black_box(&maze), hall)));
    });
}

criterion_group!(benches, benchmark_carve, benchmark_carve_flat, benchmark_layout);
criterion_main!(benches);
