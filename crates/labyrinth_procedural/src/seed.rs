//! # World Seeds
//!
//! All randomness in a maze world derives from one `WorldSeed`. Each chunk
//! gets its own stream, so chunks can be generated in any order, on any
//! thread, and still come out the same.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::chunk::ChunkCoord;

/// World seed for deterministic generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Seed used when a config does not name one.
    pub const DEFAULT: Self = Self(0x0DEA_DBEE_FCAF_EBAB);

    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Sub-seed for one chunk.
    #[inline]
    #[must_use]
    pub const fn for_chunk(self, coord: ChunkCoord) -> Self {
        let packed = ((coord.x as u32 as u64) << 32) | coord.z as u32 as u64;
        self.derive(packed)
    }

    /// Fresh RNG seeded from this value.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}
