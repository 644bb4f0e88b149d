//! # Maze Layout
//!
//! Block-scale raster of a carved maze.
//!
//! Each vertex becomes a `hall x hall` room. Rooms sit on a pitch of
//! `hall + 1`, so one-block walls separate them; an opened passage knocks
//! out the wall segment between two rooms.
//!
//! ```text
//! #######
//! #     #     hall = 2, pitch = 3
//! #     #
//! #  #  #
//! #  #  #
//! #  #  #
//! #######
//! ```
//!
//! Wall column `i * pitch` lies between vertex columns `i - 1` and `i`
//! (counted from the lowest canonical column), and likewise for rows. So an
//! edge's wall segment is found directly from its canonical location, and
//! border edges land on the outer wall as entrances. On a wrapping axis the
//! seam edge opens both outer walls; a Twist seam opens the far side with
//! the row band reflected.

use std::num::NonZeroU32;

use labyrinth_topology::{Axis, EdgeKind, Orientation, TopologyGraph, VertexLocation};

use crate::carver::CarvedMaze;

/// Open/wall raster of a carved maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    width: usize,
    depth: usize,
    hall: usize,
    cells: Vec<bool>,
}

impl MazeLayout {
    /// Rasterizes `maze`, carved over `graph`.
    #[must_use]
    pub fn build(graph: &TopologyGraph, maze: &CarvedMaze, hall_size: NonZeroU32) -> Self {
        let hall = hall_size.get() as usize;
        let pitch = hall + 1;
        let extent_x = graph.vertex_extent(Axis::X) as usize;
        let extent_z = graph.vertex_extent(Axis::Z) as usize;
        let (min_x, _) = graph.vertex_bounds(Axis::X);
        let (min_z, _) = graph.vertex_bounds(Axis::Z);

        let width = extent_x * pitch + 1;
        let depth = extent_z * pitch + 1;
        let mut layout = Self {
            width,
            depth,
            hall,
            cells: vec![false; width * depth],
        };

        for vertex in maze.filled_vertices() {
            let VertexLocation { x, z } = graph.vertex_location_from_index(vertex);
            layout.open_room((x - min_x) as usize, (z - min_z) as usize);
        }

        for passage in maze.passages() {
            let edge = graph.edge_location_from_index(passage.edge);
            let column = (edge.x - min_x) as usize;
            let row = (edge.z - min_z) as usize;

            match edge.orientation {
                Orientation::Horizontal => {
                    layout.open_column(column * pitch, row);
                    if edge.x == 0 && graph.kind(Axis::X).wraps() {
                        let mirrored = if graph.kind(Axis::X) == EdgeKind::Twist {
                            extent_z - 1 - row
                        } else {
                            row
                        };
                        layout.open_column(extent_x * pitch, mirrored);
                    }
                }
                Orientation::Vertical => {
                    layout.open_row(row * pitch, column);
                    if edge.z == 0 && graph.kind(Axis::Z).wraps() {
                        layout.open_row(extent_z * pitch, column);
                    }
                }
            }
        }

        layout
    }

    #[inline]
    fn open(&mut self, x: usize, z: usize) {
        self.cells[z * self.width + x] = true;
    }

    fn open_room(&mut self, band_x: usize, band_z: usize) {
        let pitch = self.pitch();
        for dz in 0..self.hall {
            for dx in 0..self.hall {
                self.open(1 + band_x * pitch + dx, 1 + band_z * pitch + dz);
            }
        }
    }

    /// Opens wall column `x` across row band `band`.
    fn open_column(&mut self, x: usize, band: usize) {
        let start = 1 + band * self.pitch();
        for z in start..start + self.hall {
            self.open(x, z);
        }
    }

    /// Opens wall row `z` across column band `band`.
    fn open_row(&mut self, z: usize, band: usize) {
        let start = 1 + band * self.pitch();
        for x in start..start + self.hall {
            self.open(x, z);
        }
    }

    /// Raster size along X.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Raster size along Z.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Corridor thickness.
    #[inline]
    #[must_use]
    pub const fn hall(&self) -> usize {
        self.hall
    }

    /// Distance between neighbouring room origins.
    #[inline]
    #[must_use]
    pub const fn pitch(&self) -> usize {
        self.hall + 1
    }

    /// Returns true if `(x, z)` is corridor. Outside the raster is wall.
    #[inline]
    #[must_use]
    pub fn is_open(&self, x: usize, z: usize) -> bool {
        x < self.width && z < self.depth && self.cells[z * self.width + x]
    }

    /// Number of corridor cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&open| open).count()
    }

    /// One line per row, `#` for wall and a space for corridor.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.depth);
        for row in self.cells.chunks(self.width) {
            out.extend(row.iter().map(|&open| if open { ' ' } else { '#' }));
            out.push('\n');
        }
        out
    }
}
