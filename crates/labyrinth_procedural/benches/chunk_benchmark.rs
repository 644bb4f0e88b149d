//! Benchmark for maze chunk generation.
//!
//! TARGET: 32x32 chunks in under 250ms with the parallel world
//!
//! Run with: cargo bench --package labyrinth_procedural --bench chunk_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use labyrinth_procedural::{ChunkCoord, GeneratorKind, MazeChunkGenerator, MazeConfig, MazeWorld};

fn benchmark_single_chunk(c: &mut Criterion) {
    let gen = MazeChunkGenerator::new(MazeConfig::default()).unwrap();

    c.bench_function("single_maze_chunk", |b| {
        let mut coord = 0i32;
        b.iter(|| {
            coord = coord.wrapping_add(1);
            black_box(gen.generate(ChunkCoord::new(coord, coord / 2)))
        });
    });
}

fn benchmark_flat_chunk(c: &mut Criterion) {
    let gen = MazeChunkGenerator::new(MazeConfig {
        generator: GeneratorKind::FlatGrid,
        ..MazeConfig::default()
    })
    .unwrap();

    c.bench_function("single_flat_chunk", |b| {
        let mut coord = 0i32;
        b.iter(|| {
            coord = coord.wrapping_add(1);
            black_box(gen.generate(ChunkCoord::new(coord, -coord)))
        });
    });
}

fn benchmark_world_area(c: &mut Criterion) {
    let area: Vec<ChunkCoord> = (0..32)
        .flat_map(|z| (0..32).map(move |x| ChunkCoord::new(x, z)))
        .collect();

    let mut group = c.benchmark_group("maze_world");
    group.sample_size(10);
    group.throughput(Throughput::Elements(area.len() as u64));

    group.bench_function("32x32_chunks_parallel", |b| {
        b.iter(|| {
            let world = MazeWorld::from_config(MazeConfig::default()).unwrap();
            black_box(world.generate_area(&area))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_chunk, benchmark_flat_chunk, benchmark_world_area);
criterion_main!(benches);
