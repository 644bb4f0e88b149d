//! # Topology Graph
//!
//! Maps linear vertex and edge ids to 2-D locations and back.
//!
//! ## Layout
//!
//! Vertices are stored column-major: `id = major * x + z` where
//! `major = size_z + adj(Z)` is the number of vertex rows. Open axes reserve a
//! leading ring, so their coordinates start at `-1` and are shifted by one
//! before indexing.
//!
//! Edges come in two contiguous blocks:
//!
//! ```text
//! [ horizontal: size_x * major ][ vertical: size_z * (size_x + adj(X)) ]
//! ```
//!
//! Horizontal edge `(x, z)` sits between vertex columns `x - 1` and `x`,
//! vertical edge `(x, z)` between vertex rows `z - 1` and `z`. Edges with
//! `x == 0` or `x == size_x` on a walled axis are border edges.
//!
//! ## Twist
//!
//! A Twist axis folds modulo `2 * size`. The second lap is mapped back onto
//! the first with the secondary coordinate reflected, which glues the two
//! ends of the strip with a half-turn.

use std::ops::Deref;

use crate::error::{TopologyError, TopologyResult};
use crate::kind::{Axis, EdgeKind, Orientation, Topology};

/// Linear vertex identifier in `[0, vertex_count)`.
pub type VertexId = u32;

/// Linear edge identifier in `[0, edge_count)`.
pub type EdgeId = u32;

/// Largest accepted axis size. Keeps every id inside `i32`.
pub const MAX_AXIS_SIZE: u32 = 16_384;

/// 2-D location of a vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexLocation {
    /// Column.
    pub x: i32,
    /// Row.
    pub z: i32,
}

impl VertexLocation {
    /// Creates a new vertex location.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// 2-D location of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeLocation {
    /// Which block the edge lives in.
    pub orientation: Orientation,
    /// Column.
    pub x: i32,
    /// Row.
    pub z: i32,
}

impl EdgeLocation {
    /// Creates a new edge location.
    #[inline]
    #[must_use]
    pub const fn new(orientation: Orientation, x: i32, z: i32) -> Self {
        Self { orientation, x, z }
    }
}

/// A candidate step: the vertex it reaches and the edge it crosses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Branch {
    /// Target vertex.
    pub vertex: VertexId,
    /// Connecting edge.
    pub edge: EdgeId,
}

impl Branch {
    /// Creates a new branch.
    #[inline]
    #[must_use]
    pub const fn new(vertex: VertexId, edge: EdgeId) -> Self {
        Self { vertex, edge }
    }
}

/// Up to four branches out of one vertex, stored inline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Branches {
    items: [Branch; 4],
    len: usize,
}

impl Branches {
    #[inline]
    fn push(&mut self, branch: Branch) {
        self.items[self.len] = branch;
        self.len += 1;
    }
}

impl Deref for Branches {
    type Target = [Branch];

    #[inline]
    fn deref(&self) -> &[Branch] {
        &self.items[..self.len]
    }
}

impl<'a> IntoIterator for &'a Branches {
    type Item = &'a Branch;
    type IntoIter = std::slice::Iter<'a, Branch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Vertex/edge index arithmetic for one grid under one topology.
///
/// Stateless apart from the construction-time topology and sizes; cheap to
/// copy and safe to share between threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopologyGraph {
    topology: Topology,
    kind_x: EdgeKind,
    kind_z: EdgeKind,
    size_x: i32,
    size_z: i32,
}

impl TopologyGraph {
    /// Creates a graph for the given topology and grid size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if either size is zero or above `MAX_AXIS_SIZE`.
    pub fn new(topology: Topology, size_x: u32, size_z: u32) -> TopologyResult<Self> {
        for (axis, size) in [(Axis::X, size_x), (Axis::Z, size_z)] {
            if size == 0 || size > MAX_AXIS_SIZE {
                return Err(TopologyError::InvalidSize { axis, size });
            }
        }

        let (kind_x, kind_z) = topology.edge_kinds();
        Ok(Self {
            topology,
            kind_x,
            kind_z,
            size_x: size_x as i32,
            size_z: size_z as i32,
        })
    }

    /// The topology this graph was built for.
    #[inline]
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Raw X size.
    #[inline]
    #[must_use]
    pub const fn size_x(&self) -> u32 {
        self.size_x as u32
    }

    /// Raw Z size.
    #[inline]
    #[must_use]
    pub const fn size_z(&self) -> u32 {
        self.size_z as u32
    }

    /// Edge kind of an axis.
    #[inline]
    #[must_use]
    pub const fn kind(&self, axis: Axis) -> EdgeKind {
        match axis {
            Axis::X => self.kind_x,
            Axis::Z => self.kind_z,
        }
    }

    /// Count adjustment for an edge kind.
    #[inline]
    #[must_use]
    pub const fn edge_count_adjustment(kind: EdgeKind) -> i32 {
        kind.count_adjustment()
    }

    /// Folds a coordinate by the rule of `kind`.
    #[inline]
    #[must_use]
    pub const fn fold_coordinate(value: i32, size: i32, kind: EdgeKind) -> i32 {
        kind.fold(value, size)
    }

    /// Number of vertex columns.
    #[inline]
    const fn extent_x(&self) -> i32 {
        self.size_x + self.kind_x.count_adjustment()
    }

    /// Number of vertex rows, which is also the row count of horizontal edges.
    #[inline]
    const fn major_size(&self) -> i32 {
        self.size_z + self.kind_z.count_adjustment()
    }

    /// Number of vertices along an axis.
    #[must_use]
    pub const fn vertex_extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.extent_x() as u32,
            Axis::Z => self.major_size() as u32,
        }
    }

    /// Inclusive canonical coordinate bounds of vertices along an axis.
    ///
    /// Empty (`min > max`) for a walled axis of size 1.
    #[must_use]
    pub const fn vertex_bounds(&self, axis: Axis) -> (i32, i32) {
        let (kind, size) = match axis {
            Axis::X => (self.kind_x, self.size_x),
            Axis::Z => (self.kind_z, self.size_z),
        };
        match kind {
            EdgeKind::Wall => (0, size - 2),
            EdgeKind::Open => (-1, size - 1),
            EdgeKind::Loop | EdgeKind::Twist => (0, size - 1),
        }
    }

    /// Number of horizontal edges.
    #[inline]
    #[must_use]
    pub const fn horizontal_edge_count(&self) -> u32 {
        (self.size_x * self.major_size()) as u32
    }

    /// Number of vertical edges.
    #[inline]
    #[must_use]
    pub const fn vertical_edge_count(&self) -> u32 {
        (self.size_z * self.extent_x()) as u32
    }

    /// Total number of edges.
    #[inline]
    #[must_use]
    pub const fn edge_count(&self) -> u32 {
        self.horizontal_edge_count() + self.vertical_edge_count()
    }

    /// Total number of vertices.
    #[inline]
    #[must_use]
    pub const fn vertex_count(&self) -> u32 {
        (self.extent_x() * self.major_size()) as u32
    }

    /// All vertex ids.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        0..self.vertex_count()
    }

    /// Edge id at a location.
    ///
    /// Coordinates on wrapping axes may be anything; on Wall and Open axes
    /// they must already lie on the grid.
    #[must_use]
    pub fn edge_index_from_location(&self, orientation: Orientation, x: i32, z: i32) -> EdgeId {
        let mut x = self.kind_x.fold(x, self.size_x);
        let mut z = self.kind_z.fold(z, self.size_z);

        match orientation {
            Orientation::Horizontal => {
                let major = self.major_size();
                if self.kind_z == EdgeKind::Open {
                    z += 1;
                }
                if self.kind_x == EdgeKind::Twist && x >= self.size_x {
                    x -= self.size_x;
                    z = major - 1 - z;
                }
                (x * major + z) as EdgeId
            }
            Orientation::Vertical => {
                if self.kind_x == EdgeKind::Open {
                    x += 1;
                }
                if self.kind_x == EdgeKind::Twist && x >= self.size_x {
                    x -= self.size_x;
                    z = self.size_z - 1 - z;
                }
                (self.horizontal_edge_count() as i32 + x * self.size_z + z) as EdgeId
            }
        }
    }

    /// Canonical location of an edge id.
    ///
    /// Inverse of `edge_index_from_location` on canonical locations.
    #[must_use]
    pub fn edge_location_from_index(&self, edge: EdgeId) -> EdgeLocation {
        debug_assert!(edge < self.edge_count(), "edge {edge} out of range");

        let horizontal = self.horizontal_edge_count();
        if edge < horizontal {
            let major = self.major_size();
            let edge = edge as i32;
            let x = edge / major;
            let mut z = edge % major;
            if self.kind_z == EdgeKind::Open {
                z -= 1;
            }
            EdgeLocation::new(Orientation::Horizontal, x, z)
        } else {
            let edge = (edge - horizontal) as i32;
            let mut x = edge / self.size_z;
            let z = edge % self.size_z;
            if self.kind_x == EdgeKind::Open {
                x -= 1;
            }
            EdgeLocation::new(Orientation::Vertical, x, z)
        }
    }

    /// Vertex id at a location.
    ///
    /// Same coordinate contract as `edge_index_from_location`. On a Twist
    /// axis, the second lap lands on the first with `z` reflected.
    #[must_use]
    pub fn vertex_index_from_location(&self, x: i32, z: i32) -> VertexId {
        let major = self.major_size();
        let mut x = self.kind_x.fold(x, self.size_x);
        let mut z = self.kind_z.fold(z, self.size_z);

        if self.kind_x == EdgeKind::Open {
            x += 1;
        }
        if self.kind_z == EdgeKind::Open {
            z += 1;
        }
        if self.kind_x == EdgeKind::Twist && x >= self.size_x {
            x -= self.size_x;
            z = major - 1 - z;
        }

        (major * x + z) as VertexId
    }

    /// Canonical location of a vertex id.
    ///
    /// # Panics
    ///
    /// Panics on a graph with no vertices.
    #[must_use]
    pub fn vertex_location_from_index(&self, vertex: VertexId) -> VertexLocation {
        debug_assert!(vertex < self.vertex_count(), "vertex {vertex} out of range");

        let major = self.major_size();
        let vertex = vertex as i32;
        let mut x = vertex / major;
        let mut z = vertex % major;

        if self.kind_x == EdgeKind::Open {
            x -= 1;
        }
        if self.kind_z == EdgeKind::Open {
            z -= 1;
        }

        VertexLocation::new(x, z)
    }

    /// Returns true if a one-unit step from `coord` along `axis` stays on the grid.
    #[inline]
    fn can_step(&self, axis: Axis, coord: i32, delta: i32) -> bool {
        if self.kind(axis).wraps() {
            return true;
        }
        let (min, max) = self.vertex_bounds(axis);
        let next = coord + delta;
        next >= min && next <= max
    }

    /// Branches leading out of a vertex to its axis neighbours.
    ///
    /// Walled and open axes stop at their bounds, wrapping axes fold. A step
    /// that folds back onto the vertex itself is dropped.
    #[must_use]
    pub fn branches_of_vertex(&self, vertex: VertexId) -> Branches {
        let VertexLocation { x, z } = self.vertex_location_from_index(vertex);
        let mut branches = Branches::default();

        let steps = [
            (Axis::X, x, 1, (x + 1, z), (Orientation::Horizontal, x + 1, z)),
            (Axis::X, x, -1, (x - 1, z), (Orientation::Horizontal, x, z)),
            (Axis::Z, z, 1, (x, z + 1), (Orientation::Vertical, x, z + 1)),
            (Axis::Z, z, -1, (x, z - 1), (Orientation::Vertical, x, z)),
        ];

        for (axis, coord, delta, (nx, nz), (orientation, ex, ez)) in steps {
            if !self.can_step(axis, coord, delta) {
                continue;
            }
            let target = self.vertex_index_from_location(nx, nz);
            if target == vertex {
                continue;
            }
            branches.push(Branch::new(
                target,
                self.edge_index_from_location(orientation, ex, ez),
            ));
        }

        branches
    }

    /// Neighbouring vertices of a vertex, one per branch.
    pub fn neighbors_of_vertex(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> {
        let branches = self.branches_of_vertex(vertex);
        (0..branches.len()).map(move |i| branches[i].vertex)
    }

    /// Branches through the outer wall, used to seed growth from the border.
    ///
    /// Empty for topologies without a border (Outdoor, Torus).
    #[must_use]
    pub fn border_branches(&self) -> Vec<Branch> {
        let mut branches = Vec::new();

        match self.topology {
            Topology::Rectangle => {
                if self.size_z > 1 {
                    for x in 0..self.size_x - 1 {
                        self.push_z_border(&mut branches, x);
                    }
                }
                if self.size_x > 1 {
                    for z in 0..self.size_z - 1 {
                        branches.push(Branch::new(
                            self.vertex_index_from_location(0, z),
                            self.edge_index_from_location(Orientation::Horizontal, 0, z),
                        ));
                        branches.push(Branch::new(
                            self.vertex_index_from_location(self.size_x - 2, z),
                            self.edge_index_from_location(
                                Orientation::Horizontal,
                                self.size_x - 1,
                                z,
                            ),
                        ));
                    }
                }
            }
            Topology::Cylinder | Topology::Mobius => {
                if self.size_z > 1 {
                    for x in 0..self.size_x {
                        self.push_z_border(&mut branches, x);
                    }
                }
            }
            Topology::Outdoor | Topology::Torus => {}
        }

        branches
    }

    /// Pushes the low and high Z border branches of column `x`.
    fn push_z_border(&self, branches: &mut Vec<Branch>, x: i32) {
        branches.push(Branch::new(
            self.vertex_index_from_location(x, 0),
            self.edge_index_from_location(Orientation::Vertical, x, 0),
        ));
        branches.push(Branch::new(
            self.vertex_index_from_location(x, self.size_z - 2),
            self.edge_index_from_location(Orientation::Vertical, x, self.size_z - 1),
        ));
    }
}
