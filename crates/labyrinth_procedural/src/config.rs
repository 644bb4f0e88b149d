//! # Maze Configuration
//!
//! Everything a generator needs, loadable from TOML.
//!
//! ```toml
//! generator = "topology"
//! topology = "mobius"
//! size_x = 6
//! size_z = 4
//! hall_size = 1
//! block_pool = [98, 4, 48]
//! seed = 1234
//! ```
//!
//! Missing fields take their defaults; unknown fields are rejected.

use std::fs;
use std::path::Path;

use labyrinth_topology::{Axis, Topology, TopologyGraph};
use serde::{Deserialize, Serialize};

use crate::chunk::{BlockPool, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::error::{MazeError, MazeResult};
use crate::flat::FlatGrid;
use crate::seed::WorldSeed;

/// Thickest corridor a chunk can hold.
pub const MAX_HALL_SIZE: u32 = CHUNK_SIZE as u32;

/// Which carver fills a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Frontier growth over a `TopologyGraph`, rasterized with walls.
    #[default]
    Topology,
    /// Frontier growth over a fixed row-major cell grid.
    FlatGrid,
}

/// Which raster cells receive pool material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutFill {
    /// Rooms and opened passages are solid.
    #[default]
    Corridors,
    /// Walls are solid and corridors are left as air.
    Walls,
}

/// Maze generation settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeConfig {
    /// Carver used per chunk.
    pub generator: GeneratorKind,
    /// Surface topology of the grid.
    pub topology: Topology,
    /// Grid size along X.
    pub size_x: u32,
    /// Grid size along Z.
    pub size_z: u32,
    /// Corridor thickness in blocks.
    pub hall_size: u32,
    /// Material ids, picked uniformly per block.
    pub block_pool: Vec<u16>,
    /// Flat-grid row width.
    pub flat_width: u32,
    /// Flat-grid row count.
    pub flat_height: u32,
    /// Lowest corridor layer.
    pub corridor_floor: u8,
    /// Highest corridor layer (inclusive).
    pub corridor_ceiling: u8,
    /// Which raster cells are solid.
    pub fill: LayoutFill,
    /// World seed.
    pub seed: u64,
    /// Mark chunk edges on the floor layer.
    pub debug_border: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::Topology,
            topology: Topology::Outdoor,
            size_x: 4,
            size_z: 4,
            hall_size: 2,
            block_pool: vec![98],
            flat_width: FlatGrid::CHUNK.width(),
            flat_height: FlatGrid::CHUNK.height(),
            corridor_floor: 5,
            corridor_ceiling: 11,
            fill: LayoutFill::Corridors,
            seed: WorldSeed::DEFAULT.value(),
            debug_border: false,
        }
    }
}

impl MazeConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or unknown fields.
    pub fn from_toml_str(text: &str) -> MazeResult<Self> {
        toml::from_str(text).map_err(|e| MazeError::InvalidConfig(e.to_string()))
    }

    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise any parse or
    /// validation error.
    pub fn load<P: AsRef<Path>>(path: P) -> MazeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| MazeError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a value has no TOML form.
    pub fn to_toml_string(&self) -> MazeResult<String> {
        toml::to_string(self).map_err(|e| MazeError::InvalidConfig(e.to_string()))
    }

    /// Checks every field that would make generation degenerate.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> MazeResult<()> {
        BlockPool::new(self.block_pool.clone())?;
        if self.hall_size == 0 || self.hall_size > MAX_HALL_SIZE {
            return Err(MazeError::InvalidHallSize(self.hall_size));
        }
        if self.corridor_floor > self.corridor_ceiling
            || usize::from(self.corridor_ceiling) >= CHUNK_HEIGHT - 1
        {
            return Err(MazeError::InvalidCorridorSpan {
                floor: self.corridor_floor,
                ceiling: self.corridor_ceiling,
            });
        }
        let graph = TopologyGraph::new(self.topology, self.size_x, self.size_z)?;
        let (width, depth) = self.layout_size(&graph);
        if width > CHUNK_SIZE || depth > CHUNK_SIZE {
            return Err(MazeError::LayoutTooLarge { width, depth });
        }
        FlatGrid::new(self.flat_width, self.flat_height)?;
        if self.seed > i64::MAX as u64 {
            return Err(MazeError::InvalidConfig(format!(
                "seed {} does not fit a TOML integer",
                self.seed
            )));
        }
        Ok(())
    }

    /// Raster size `MazeLayout` gives `graph` at this hall size.
    fn layout_size(&self, graph: &TopologyGraph) -> (usize, usize) {
        let pitch = self.hall_size as usize + 1;
        let span = |axis| graph.vertex_extent(axis) as usize * pitch + 1;
        (span(Axis::X), span(Axis::Z))
    }

    /// The configured world seed.
    #[inline]
    #[must_use]
    pub const fn world_seed(&self) -> WorldSeed {
        WorldSeed::new(self.seed)
    }
}
