//! # LABYRINTH Procedural Generation
//!
//! Deterministic maze generation for tile worlds.
//!
//! ## Design Principles
//!
//! 1. **Perfect mazes**: every carve is a spanning tree, no cycles
//! 2. **Explicit state**: frontier and filled set live in a `CarveState` owned
//!    by one generation request, never in shared fields
//! 3. **Deterministic**: the same world seed and chunk give the same maze
//! 4. **Chunked**: one maze per chunk, generated and discarded independently
//!
//! ## Core Components
//!
//! - `carve`: randomized frontier growth over a `TopologyGraph`
//! - `carve_flat`: the same growth over plain row-major cell ids
//! - `MazeLayout`: block-scale raster of rooms and opened passages
//! - `MazeChunkGenerator`: floor plus maze, written through a `TerrainWriter`
//! - `MazeWorld`: chunk store that generates missing chunks concurrently
//!
//! ## Example
//!
//! ```rust
//! use labyrinth_procedural::{carve, WorldSeed};
//! use labyrinth_topology::{Topology, TopologyGraph};
//!
//! let graph = TopologyGraph::new(Topology::Outdoor, 7, 7).unwrap();
//! let mut rng = WorldSeed::new(42).rng();
//! let maze = carve(&graph, &mut rng);
//!
//! assert_eq!(maze.filled_count(), graph.vertex_count() as usize);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod carver;
pub mod chunk;
pub mod config;
pub mod error;
pub mod flat;
pub mod generator;
pub mod layout;
pub mod seed;
pub mod world;

pub use carver::{carve, CarveState, CarveStep, CarvedMaze, FrontierEntry, Passage};
pub use chunk::{Block, BlockPool, Chunk, ChunkCoord, TerrainWriter, CHUNK_HEIGHT, CHUNK_SIZE};
pub use config::{GeneratorKind, LayoutFill, MazeConfig, MAX_HALL_SIZE};
pub use error::{MazeError, MazeResult};
pub use flat::{carve_flat, carve_flat_from, FlatGrid, FlatMaze, MAX_FLAT_SIDE};
pub use generator::MazeChunkGenerator;
pub use layout::MazeLayout;
pub use seed::WorldSeed;
pub use world::MazeWorld;
