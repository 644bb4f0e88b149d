//! Maze world management.
//!
//! Holds generated chunks and fills in missing ones on demand. Generation
//! of an area is spread over scoped worker threads; each worker carves its
//! own chunks with its own state, and results are inserted under a single
//! write lock.

use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::thread;

use crate::chunk::{Block, Chunk, ChunkCoord, CHUNK_SIZE};
use crate::config::MazeConfig;
use crate::error::MazeResult;
use crate::generator::MazeChunkGenerator;

/// Initial chunk map capacity.
const INITIAL_CHUNK_CAPACITY: usize = 256;

/// Chunk store backed by a maze generator.
///
/// Safe to share between threads: readers take the chunk map's read lock,
/// loading takes the write lock only to insert.
pub struct MazeWorld {
    generator: MazeChunkGenerator,
    chunks: RwLock<HashMap<ChunkCoord, Chunk>>,
}

impl MazeWorld {
    /// Creates an empty world around `generator`.
    #[must_use]
    pub fn new(generator: MazeChunkGenerator) -> Self {
        Self {
            generator,
            chunks: RwLock::new(HashMap::with_capacity(INITIAL_CHUNK_CAPACITY)),
        }
    }

    /// Creates an empty world from a config.
    ///
    /// # Errors
    ///
    /// Returns any configuration error.
    pub fn from_config(config: MazeConfig) -> MazeResult<Self> {
        Ok(Self::new(MazeChunkGenerator::new(config)?))
    }

    /// The generator filling this world.
    #[must_use]
    pub const fn generator(&self) -> &MazeChunkGenerator {
        &self.generator
    }

    /// Generates the chunk at `coord` unless it is already loaded.
    ///
    /// Returns true if the chunk was newly generated.
    pub fn load_chunk(&self, coord: ChunkCoord) -> bool {
        if self.is_loaded(coord) {
            return false;
        }

        let chunk = self.generator.generate(coord);
        let mut chunks = self.chunks.write();
        if chunks.contains_key(&coord) {
            return false;
        }
        chunks.insert(coord, chunk);
        true
    }

    /// Generates every missing chunk in `coords` in parallel.
    ///
    /// Returns the number of chunks newly inserted.
    pub fn generate_area(&self, coords: &[ChunkCoord]) -> usize {
        let missing: Vec<ChunkCoord> = {
            let chunks = self.chunks.read();
            let mut missing: Vec<ChunkCoord> = coords
                .iter()
                .copied()
                .filter(|coord| !chunks.contains_key(coord))
                .collect();
            missing.sort_unstable_by_key(|coord| (coord.x, coord.z));
            missing.dedup();
            missing
        };
        if missing.is_empty() {
            return 0;
        }

        let workers = thread::available_parallelism()
            .map_or(1, NonZeroUsize::get)
            .min(missing.len());
        let per_worker = missing.len().div_ceil(workers);
        let generator = &self.generator;

        let generated: Vec<Chunk> = thread::scope(|scope| {
            let handles: Vec<_> = missing
                .chunks(per_worker)
                .map(|batch| {
                    scope.spawn(move || {
                        batch
                            .iter()
                            .map(|&coord| generator.generate(coord))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(chunks) => chunks,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut chunks = self.chunks.write();
        let mut inserted = 0;
        for chunk in generated {
            if let Entry::Vacant(slot) = chunks.entry(chunk.coord) {
                slot.insert(chunk);
                inserted += 1;
            }
        }

        tracing::info!(
            "Generated {} chunks on {} workers ({} loaded)",
            inserted,
            workers,
            chunks.len()
        );
        inserted
    }

    /// Returns true if the chunk at `coord` is loaded.
    #[must_use]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.read().contains_key(&coord)
    }

    /// Executes a closure with read access to a chunk.
    pub fn with_chunk<F, R>(&self, coord: ChunkCoord, f: F) -> Option<R>
    where
        F: FnOnce(&Chunk) -> R,
    {
        self.chunks.read().get(&coord).map(f)
    }

    /// Unloads a chunk, returning it if it existed.
    pub fn unload_chunk(&self, coord: ChunkCoord) -> Option<Chunk> {
        self.chunks.write().remove(&coord)
    }

    /// Number of loaded chunks.
    #[must_use]
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.read().len()
    }

    /// Block at world coordinates. `None` if the chunk is not loaded.
    ///
    /// Heights outside the chunk read as air.
    #[must_use]
    pub fn block_at(&self, world_x: i32, world_y: i32, world_z: i32) -> Option<Block> {
        let coord = ChunkCoord::from_block_pos(world_x, world_z);
        let local_x = world_x.rem_euclid(CHUNK_SIZE as i32) as usize;
        let local_z = world_z.rem_euclid(CHUNK_SIZE as i32) as usize;
        self.with_chunk(coord, |chunk| match usize::try_from(world_y) {
            Ok(y) => chunk.get_block(local_x, y, local_z),
            Err(_) => Block::AIR,
        })
    }
}
