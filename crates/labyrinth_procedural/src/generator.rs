//! # Maze Chunk Generator
//!
//! Turns one chunk coordinate into terrain: a static floor, then a maze
//! standing on it.
//!
//! ## Layers
//!
//! | Y | Content |
//! |---|---------|
//! | 0 | bedrock |
//! | 1-3 | dirt |
//! | 4 | grass (wool on the perimeter with `debug_border`) |
//! | `corridor_floor..=corridor_ceiling` | maze, one pool pick per block |
//!
//! Each chunk draws from its own RNG stream, derived from the world seed
//! and the chunk coordinate, so generation order does not matter.

use std::num::NonZeroU32;

use labyrinth_topology::TopologyGraph;
use rand_chacha::ChaCha8Rng;

use crate::carver::{carve, CarvedMaze};
use crate::chunk::{Block, BlockPool, Chunk, ChunkCoord, TerrainWriter, CHUNK_SIZE};
use crate::config::{GeneratorKind, LayoutFill, MazeConfig};
use crate::error::{MazeError, MazeResult};
use crate::flat::{carve_flat, FlatGrid, FlatMaze};
use crate::layout::MazeLayout;
use crate::seed::WorldSeed;

/// Floor layers, bottom up.
const FLOOR: [Block; 5] = [
    Block::BEDROCK,
    Block::DIRT,
    Block::DIRT,
    Block::DIRT,
    Block::GRASS,
];

/// Layer the debug border is drawn on.
const BORDER_Y: i32 = 4;

/// Per-chunk maze generator.
///
/// Immutable after construction; share it freely between threads.
#[derive(Clone, Debug)]
pub struct MazeChunkGenerator {
    config: MazeConfig,
    graph: TopologyGraph,
    flat: FlatGrid,
    pool: BlockPool,
    hall: NonZeroU32,
    seed: WorldSeed,
}

impl MazeChunkGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn new(config: MazeConfig) -> MazeResult<Self> {
        config.validate()?;

        let graph = TopologyGraph::new(config.topology, config.size_x, config.size_z)?;
        let flat = FlatGrid::new(config.flat_width, config.flat_height)?;
        let pool = BlockPool::new(config.block_pool.clone())?;
        let hall = NonZeroU32::new(config.hall_size)
            .ok_or(MazeError::InvalidHallSize(config.hall_size))?;

        Ok(Self {
            seed: config.world_seed(),
            config,
            graph,
            flat,
            pool,
            hall,
        })
    }

    /// Generator name as registered with a host.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.config.generator {
            GeneratorKind::Topology => "maze",
            GeneratorKind::FlatGrid => "maze_flat",
        }
    }

    /// Spawn position, just above the corridors.
    #[must_use]
    pub const fn spawn_point(&self) -> (i32, i32, i32) {
        (0, self.config.corridor_ceiling as i32 + 1, 0)
    }

    /// Configuration this generator was built from.
    #[must_use]
    pub const fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Topology graph every chunk is carved over.
    #[must_use]
    pub const fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    fn chunk_rng(&self, coord: ChunkCoord) -> ChaCha8Rng {
        self.seed.for_chunk(coord).rng()
    }

    /// The topology maze `generate` carves for `coord`.
    #[must_use]
    pub fn carve_for(&self, coord: ChunkCoord) -> CarvedMaze {
        carve(&self.graph, &mut self.chunk_rng(coord))
    }

    /// The raster `generate` writes for `coord`.
    #[must_use]
    pub fn layout_for(&self, coord: ChunkCoord) -> MazeLayout {
        MazeLayout::build(&self.graph, &self.carve_for(coord), self.hall)
    }

    /// The flat-grid maze `generate` carves for `coord`.
    #[must_use]
    pub fn flat_for(&self, coord: ChunkCoord) -> FlatMaze {
        carve_flat(self.flat, &mut self.chunk_rng(coord))
    }

    /// Generates a fresh chunk.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);
        self.generate_into(coord, &mut chunk);
        chunk
    }

    /// Writes the chunk at `coord` through `writer`.
    ///
    /// Coordinates are chunk-local. A validated config keeps every write
    /// inside `0..CHUNK_SIZE` on X and Z.
    pub fn generate_into<W: TerrainWriter + ?Sized>(&self, coord: ChunkCoord, writer: &mut W) {
        let mut rng = self.chunk_rng(coord);
        write_floor(writer);

        let cells = match self.config.generator {
            GeneratorKind::Topology => {
                let maze = carve(&self.graph, &mut rng);
                let layout = MazeLayout::build(&self.graph, &maze, self.hall);

                let solid = |x: usize, z: usize| match self.config.fill {
                    LayoutFill::Corridors => layout.is_open(x, z),
                    LayoutFill::Walls => !layout.is_open(x, z),
                };
                let mut cells = Vec::new();
                for z in 0..layout.depth() {
                    for x in 0..layout.width() {
                        if solid(x, z) {
                            cells.push((x as i32, z as i32));
                        }
                    }
                }
                cells
            }
            GeneratorKind::FlatGrid => {
                let maze = carve_flat(self.flat, &mut rng);
                maze.visited_cells()
                    .map(|(row, col)| (row as i32, col as i32))
                    .collect()
            }
        };

        for &(x, z) in &cells {
            for y in self.config.corridor_floor..=self.config.corridor_ceiling {
                writer.set_block(x, i32::from(y), z, self.pool.pick(&mut rng));
            }
        }

        if self.config.debug_border {
            write_border(writer);
        }

        tracing::info!(
            "Generated {} chunk ({}, {}): {} maze columns",
            self.name(),
            coord.x,
            coord.z,
            cells.len()
        );
    }
}

fn write_floor<W: TerrainWriter + ?Sized>(writer: &mut W) {
    for z in 0..CHUNK_SIZE as i32 {
        for x in 0..CHUNK_SIZE as i32 {
            for (y, &block) in FLOOR.iter().enumerate() {
                writer.set_block(x, y as i32, z, block);
            }
        }
    }
}

fn write_border<W: TerrainWriter + ?Sized>(writer: &mut W) {
    let last = CHUNK_SIZE as i32 - 1;
    for i in 0..CHUNK_SIZE as i32 {
        writer.set_block(i, BORDER_Y, 0, Block::WOOL);
        writer.set_block(i, BORDER_Y, last, Block::WOOL);
        writer.set_block(0, BORDER_Y, i, Block::WOOL);
        writer.set_block(last, BORDER_Y, i, Block::WOOL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_topology::Topology;
    use std::collections::HashSet;

    /// Records every write instead of storing blocks.
    #[derive(Default)]
    struct RecordingWriter {
        writes: Vec<(i32, i32, i32, Block)>,
    }

    impl TerrainWriter for RecordingWriter {
        fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) {
            self.writes.push((x, y, z, block));
        }
    }

    fn generator(config: MazeConfig) -> MazeChunkGenerator {
        MazeChunkGenerator::new(config).unwrap()
    }

    fn same_blocks(a: &Chunk, b: &Chunk) -> bool {
        (0..16).all(|y| {
            (0..CHUNK_SIZE).all(|z| {
                (0..CHUNK_SIZE).all(|x| a.get_block(x, y, z) == b.get_block(x, y, z))
            })
        })
    }

    #[test]
    fn test_floor_layers() {
        let chunk = generator(MazeConfig::default()).generate(ChunkCoord::new(0, 0));
        assert_eq!(chunk.get_block(3, 0, 9), Block::BEDROCK);
        assert_eq!(chunk.get_block(3, 2, 9), Block::DIRT);
        assert_eq!(chunk.get_block(3, 4, 9), Block::GRASS);
        for y in 0..5 {
            assert_eq!(chunk.solid_in_layer(y), 256);
        }
    }

    #[test]
    fn test_corridors_match_layout() {
        let generator = generator(MazeConfig::default());
        let coord = ChunkCoord::new(2, -3);
        let chunk = generator.generate(coord);
        let layout = generator.layout_for(coord);

        assert_eq!((layout.width(), layout.depth()), (16, 16));
        for y in 5..=11 {
            assert_eq!(chunk.solid_in_layer(y), layout.open_count());
        }
        assert_eq!(chunk.solid_in_layer(12), 0);
        for z in 0..16 {
            for x in 0..16 {
                assert_eq!(!chunk.get_block(x, 8, z).is_air(), layout.is_open(x, z));
            }
        }
    }

    #[test]
    fn test_wall_fill_inverts_layout() {
        let config = MazeConfig {
            fill: LayoutFill::Walls,
            ..MazeConfig::default()
        };
        let generator = generator(config);
        let coord = ChunkCoord::new(0, 1);
        let chunk = generator.generate(coord);
        let layout = generator.layout_for(coord);
        assert_eq!(chunk.solid_in_layer(5), 256 - layout.open_count());
    }

    #[test]
    fn test_same_coord_same_chunk() {
        let generator = generator(MazeConfig {
            topology: Topology::Torus,
            size_x: 5,
            size_z: 5,
            ..MazeConfig::default()
        });
        let a = generator.generate(ChunkCoord::new(-4, 7));
        let b = generator.generate(ChunkCoord::new(-4, 7));
        assert!(same_blocks(&a, &b));
    }

    #[test]
    fn test_pool_materials_only() {
        let generator = generator(MazeConfig {
            block_pool: vec![98, 4, 48],
            ..MazeConfig::default()
        });
        let chunk = generator.generate(ChunkCoord::new(1, 1));
        let mut seen = HashSet::new();
        for z in 0..16 {
            for x in 0..16 {
                let block = chunk.get_block(x, 7, z);
                if !block.is_air() {
                    seen.insert(block.id);
                }
            }
        }
        assert!(seen.is_subset(&HashSet::from([98, 4, 48])));
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_flat_grid_chunk() {
        let generator = generator(MazeConfig {
            generator: GeneratorKind::FlatGrid,
            ..MazeConfig::default()
        });
        assert_eq!(generator.name(), "maze_flat");

        let chunk = generator.generate(ChunkCoord::new(0, 0));
        assert_eq!(chunk.solid_in_layer(5), 225);
        for i in 0..16 {
            assert!(chunk.get_block(15, 6, i).is_air());
            assert!(chunk.get_block(i, 6, 15).is_air());
        }
        assert_eq!(generator.flat_for(ChunkCoord::new(0, 0)).visited_count(), 225);
    }

    #[test]
    fn test_debug_border() {
        let generator = generator(MazeConfig {
            debug_border: true,
            ..MazeConfig::default()
        });
        let chunk = generator.generate(ChunkCoord::new(0, 0));
        assert_eq!(chunk.get_block(0, 4, 7), Block::WOOL);
        assert_eq!(chunk.get_block(15, 4, 15), Block::WOOL);
        assert_eq!(chunk.get_block(7, 4, 7), Block::GRASS);
    }

    #[test]
    fn test_writes_through_custom_writer() {
        let generator = generator(MazeConfig::default());
        let coord = ChunkCoord::new(5, 5);
        let mut writer = RecordingWriter::default();
        generator.generate_into(coord, &mut writer);

        let layout = generator.layout_for(coord);
        assert_eq!(writer.writes.len(), 256 * 5 + layout.open_count() * 7);
        assert!(writer.writes.iter().all(|&(_, y, _, _)| (0..=11).contains(&y)));
    }

    #[test]
    fn test_oversized_maze_rejected() {
        let result = MazeChunkGenerator::new(MazeConfig {
            topology: Topology::Rectangle,
            size_x: 12,
            size_z: 12,
            ..MazeConfig::default()
        });
        assert_eq!(
            result.err(),
            Some(MazeError::LayoutTooLarge { width: 34, depth: 34 })
        );
    }

    #[test]
    fn test_largest_layouts_stay_in_chunk() {
        let configs = [
            MazeConfig::default(),
            MazeConfig {
                topology: Topology::Torus,
                size_x: 1,
                size_z: 1,
                hall_size: 14,
                ..MazeConfig::default()
            },
            MazeConfig {
                topology: Topology::Rectangle,
                size_x: 8,
                size_z: 8,
                hall_size: 1,
                fill: LayoutFill::Walls,
                ..MazeConfig::default()
            },
            MazeConfig {
                generator: GeneratorKind::FlatGrid,
                flat_width: 16,
                flat_height: 16,
                ..MazeConfig::default()
            },
        ];

        for config in configs {
            let generator = generator(config);
            let mut writer = RecordingWriter::default();
            generator.generate_into(ChunkCoord::new(-2, 9), &mut writer);

            assert!(writer.writes.len() <= 256 * 12);
            assert!(writer
                .writes
                .iter()
                .all(|&(x, _, z, _)| (0..16).contains(&x) && (0..16).contains(&z)));
        }
    }

    #[test]
    fn test_name_and_spawn() {
        let generator = generator(MazeConfig::default());
        assert_eq!(generator.name(), "maze");
        assert_eq!(generator.spawn_point(), (0, 12, 0));
        assert_eq!(generator.graph().topology(), Topology::Outdoor);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = MazeChunkGenerator::new(MazeConfig {
            block_pool: Vec::new(),
            ..MazeConfig::default()
        });
        assert_eq!(result.err(), Some(MazeError::EmptyBlockPool));
    }
}
