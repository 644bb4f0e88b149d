//! # Chunk System
//!
//! The terrain side of maze generation. A maze never touches world storage
//! directly; it hands `(x, y, z, block)` writes to a `TerrainWriter`.
//!
//! ## Chunk Format
//!
//! Chunks are 16x16x256 blocks (width x depth x height).
//! Each block is a material id plus metadata.
//!
//! ## Write Contract
//!
//! Writes are idempotent and order-independent. Coordinates outside the
//! chunk are dropped.

use rand::Rng;

use crate::error::{MazeError, MazeResult};

/// Chunk width/depth in blocks.
pub const CHUNK_SIZE: usize = 16;

/// Chunk height in blocks.
pub const CHUNK_HEIGHT: usize = 256;

/// Total blocks per chunk.
pub const BLOCKS_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT;

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Z coordinate (in chunks, not blocks).
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts world block coordinates to chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn from_block_pos(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x.div_euclid(CHUNK_SIZE as i32),
            z: block_z.div_euclid(CHUNK_SIZE as i32),
        }
    }

    /// Returns the world X coordinate of the chunk's origin (corner).
    #[inline]
    #[must_use]
    pub const fn world_x(self) -> i32 {
        self.x * CHUNK_SIZE as i32
    }

    /// Returns the world Z coordinate of the chunk's origin.
    #[inline]
    #[must_use]
    pub const fn world_z(self) -> i32 {
        self.z * CHUNK_SIZE as i32
    }
}

/// A single block in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    /// Material id.
    pub id: u16,
    /// Block metadata (colour, rotation, etc.).
    pub meta: u16,
}

impl Block {
    /// Air block (empty).
    pub const AIR: Self = Self { id: 0, meta: 0 };
    /// Grass block.
    pub const GRASS: Self = Self { id: 2, meta: 0 };
    /// Dirt block.
    pub const DIRT: Self = Self { id: 3, meta: 0 };
    /// Bedrock block.
    pub const BEDROCK: Self = Self { id: 7, meta: 0 };
    /// Wool block, used for debug markers.
    pub const WOOL: Self = Self { id: 35, meta: 0 };
    /// Stone bricks, the default maze material.
    pub const STONE_BRICK: Self = Self { id: 98, meta: 0 };

    /// Creates a new block with given ID.
    #[inline]
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self { id, meta: 0 }
    }

    /// Returns true if this is an air block.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.id == 0
    }
}

/// Receiver of maze block writes.
///
/// Coordinates are local to the tile being generated. Implementations must
/// treat every write as independent: the same write may arrive more than
/// once and in any order.
pub trait TerrainWriter {
    /// Places `block` at `(x, y, z)`, ignoring coordinates it does not own.
    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block);
}

/// Material ids a maze picks from, uniformly and with replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockPool {
    ids: Vec<u16>,
}

impl BlockPool {
    /// Creates a pool.
    ///
    /// # Errors
    ///
    /// Returns `EmptyBlockPool` if `ids` is empty.
    pub fn new(ids: Vec<u16>) -> MazeResult<Self> {
        if ids.is_empty() {
            return Err(MazeError::EmptyBlockPool);
        }
        Ok(Self { ids })
    }

    /// Material ids in the pool.
    #[must_use]
    pub fn ids(&self) -> &[u16] {
        &self.ids
    }

    /// Picks one block.
    #[inline]
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Block {
        Block::new(self.ids[rng.gen_range(0..self.ids.len())])
    }
}

/// A chunk of world data.
#[derive(Clone)]
pub struct Chunk {
    /// Chunk position in the world.
    pub coord: ChunkCoord,
    /// Block data, indexed as `(y * CHUNK_SIZE + z) * CHUNK_SIZE + x`.
    blocks: Box<[Block]>,
    /// Height map (highest solid block in each column, indexed as [z][x]).
    height_map: [[u8; CHUNK_SIZE]; CHUNK_SIZE],
    /// Whether this chunk has been modified since it was created.
    pub modified: bool,
}

impl Chunk {
    /// Creates a new empty chunk at the given coordinates.
    #[must_use]
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![Block::AIR; BLOCKS_PER_CHUNK].into_boxed_slice(),
            height_map: [[0; CHUNK_SIZE]; CHUNK_SIZE],
            modified: false,
        }
    }

    #[inline]
    const fn index(x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_SIZE + z) * CHUNK_SIZE + x
    }

    /// Gets a block at local coordinates.
    ///
    /// # Arguments
    ///
    /// * `x` - Local X (0-15)
    /// * `y` - Y level (0-255)
    /// * `z` - Local Z (0-15)
    #[inline]
    #[must_use]
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> Block {
        if x < CHUNK_SIZE && y < CHUNK_HEIGHT && z < CHUNK_SIZE {
            self.blocks[Self::index(x, y, z)]
        } else {
            Block::AIR
        }
    }

    /// Sets a block at local coordinates.
    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, block: Block) {
        if x < CHUNK_SIZE && y < CHUNK_HEIGHT && z < CHUNK_SIZE {
            self.blocks[Self::index(x, y, z)] = block;
            self.modified = true;

            if !block.is_air() && y as u8 > self.height_map[z][x] {
                self.height_map[z][x] = y as u8;
            }
        }
    }

    /// Gets the height at a local column.
    #[inline]
    #[must_use]
    pub fn get_height(&self, x: usize, z: usize) -> u8 {
        if x < CHUNK_SIZE && z < CHUNK_SIZE {
            self.height_map[z][x]
        } else {
            0
        }
    }

    /// Number of non-air blocks in one horizontal layer.
    #[must_use]
    pub fn solid_in_layer(&self, y: usize) -> usize {
        if y >= CHUNK_HEIGHT {
            return 0;
        }
        let start = Self::index(0, y, 0);
        self.blocks[start..start + CHUNK_SIZE * CHUNK_SIZE]
            .iter()
            .filter(|block| !block.is_air())
            .count()
    }
}

impl TerrainWriter for Chunk {
    #[inline]
    fn set_block(&mut self, x: i32, y: i32, z: i32, block: Block) {
        if x < 0 || y < 0 || z < 0 {
            return;
        }
        self.set_local(x as usize, y as usize, z as usize, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::WorldSeed;
    use std::collections::HashSet;

    #[test]
    fn test_chunk_coord_from_block() {
        assert_eq!(ChunkCoord::from_block_pos(0, 0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_block_pos(15, 15), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_block_pos(16, 16), ChunkCoord::new(1, 1));
        assert_eq!(ChunkCoord::from_block_pos(-1, -1), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_block_pos(-17, -17), ChunkCoord::new(-2, -2));
        assert_eq!(ChunkCoord::new(-2, 3).world_x(), -32);
    }

    #[test]
    fn test_writer_clips_out_of_range() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set_block(-1, 5, 0, Block::STONE_BRICK);
        chunk.set_block(16, 5, 0, Block::STONE_BRICK);
        chunk.set_block(0, 256, 0, Block::STONE_BRICK);
        assert!(!chunk.modified);

        chunk.set_block(3, 5, 4, Block::STONE_BRICK);
        assert!(chunk.modified);
        assert_eq!(chunk.get_block(3, 5, 4), Block::STONE_BRICK);
        assert_eq!(chunk.get_height(3, 4), 5);
        assert_eq!(chunk.solid_in_layer(5), 1);
    }

    #[test]
    fn test_writes_are_idempotent() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        for _ in 0..3 {
            chunk.set_block(1, 2, 3, Block::DIRT);
        }
        assert_eq!(chunk.get_block(1, 2, 3), Block::DIRT);
        assert_eq!(chunk.solid_in_layer(2), 1);
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert_eq!(BlockPool::new(Vec::new()), Err(MazeError::EmptyBlockPool));
    }

    #[test]
    fn test_pool_picks_every_member() {
        let pool = BlockPool::new(vec![98, 4, 45]).unwrap();
        let mut rng = WorldSeed::new(3).rng();
        let seen: HashSet<u16> = (0..200).map(|_| pool.pick(&mut rng).id).collect();
        assert_eq!(seen, HashSet::from([98, 4, 45]));
    }
}
