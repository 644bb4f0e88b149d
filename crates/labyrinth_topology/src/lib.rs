//! # LABYRINTH Topology
//!
//! Index arithmetic for maze grids laid over 2-D surfaces.
//!
//! ## Design Principles
//!
//! 1. **Pure**: every operation is a computation over the grid size and topology
//! 2. **Derived ids**: vertices and edges are never stored, only computed
//! 3. **Wrap-aware**: Loop axes wrap, Twist axes wrap with a half-turn
//!
//! ## Core Components
//!
//! - `Topology`: Rectangle, Outdoor, Cylinder, Torus, Mobius
//! - `EdgeKind`: the per-axis behaviour a topology is built from
//! - `TopologyGraph`: vertex/edge counts, id <-> location, branch enumeration
//!
//! ## Example
//!
//! ```rust
//! use labyrinth_topology::{Topology, TopologyGraph};
//!
//! let graph = TopologyGraph::new(Topology::Rectangle, 3, 3).unwrap();
//! assert_eq!(graph.vertex_count(), 4);
//! assert_eq!(graph.edge_count(), 12);
//!
//! let location = graph.vertex_location_from_index(3);
//! assert_eq!(graph.vertex_index_from_location(location.x, location.z), 3);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod graph;
pub mod kind;

pub use error::{TopologyError, TopologyResult};
pub use graph::{
    Branch, Branches, EdgeId, EdgeLocation, TopologyGraph, VertexId, VertexLocation, MAX_AXIS_SIZE,
};
pub use kind::{Axis, EdgeKind, Orientation, Topology};
