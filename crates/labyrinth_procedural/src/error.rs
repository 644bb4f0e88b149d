//! # Maze Error Types
//!
//! Everything here is a configuration error, raised before any carving.

use labyrinth_topology::TopologyError;
use thiserror::Error;

use crate::chunk::CHUNK_SIZE;
use crate::config::MAX_HALL_SIZE;

/// Errors that can occur while setting up maze generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// No material ids to pick from.
    #[error("block pool is empty")]
    EmptyBlockPool,

    /// Corridor thickness outside `1..=MAX_HALL_SIZE`.
    #[error("invalid hall size {0}: must be in 1..={max}", max = MAX_HALL_SIZE)]
    InvalidHallSize(u32),

    /// Flat grid with an empty side or a side wider than a chunk.
    #[error("invalid flat grid {width}x{height}: sides must be in 1..={max}", max = CHUNK_SIZE)]
    InvalidFlatGrid {
        /// Row width.
        width: u32,
        /// Row count.
        height: u32,
    },

    /// Flat-grid start cell outside the grid.
    #[error("start cell {start} outside a grid of {cells} cells")]
    InvalidStartCell {
        /// Requested start id.
        start: u32,
        /// Number of cells in the grid.
        cells: u32,
    },

    /// Maze raster wider or deeper than one chunk.
    #[error("maze layout {width}x{depth} does not fit a {max}x{max} chunk", max = CHUNK_SIZE)]
    LayoutTooLarge {
        /// Raster size along X.
        width: usize,
        /// Raster size along Z.
        depth: usize,
    },

    /// Corridor span upside down or above the chunk.
    #[error("invalid corridor span y={floor}..={ceiling}")]
    InvalidCorridorSpan {
        /// Lowest corridor layer.
        floor: u8,
        /// Highest corridor layer.
        ceiling: u8,
    },

    /// Grid size or topology rejected.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// Config file could not be parsed or written.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("io error: {0}")]
    Io(String),
}

/// Result type for maze operations.
pub type MazeResult<T> = Result<T, MazeError>;
