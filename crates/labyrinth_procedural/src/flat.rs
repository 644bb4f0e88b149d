//! # Flat-Grid Carver
//!
//! The same frontier growth as `carver`, run straight over row-major cell
//! ids of a bounded rectangle. No topology graph, no edges: a cell is either
//! visited or not, and the visited cells are the corridors.
//!
//! Row width comes from one place, `FlatGrid::width`, for both neighbour
//! offsets and `(row, col)` recovery, so steps never wrap across rows.

use rand::Rng;

use crate::chunk::CHUNK_SIZE;
use crate::error::{MazeError, MazeResult};

/// Longest grid side; a flat maze is laid out inside one chunk.
pub const MAX_FLAT_SIDE: u32 = CHUNK_SIZE as u32;

/// A `width x height` block of cells, ids `0..width * height` row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlatGrid {
    width: u32,
    height: u32,
}

impl FlatGrid {
    /// The 15x15 grid that fits inside one chunk.
    pub const CHUNK: Self = Self {
        width: 15,
        height: 15,
    };

    /// Creates a grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFlatGrid` if either side is outside `1..=MAX_FLAT_SIDE`.
    pub fn new(width: u32, height: u32) -> MazeResult<Self> {
        let side = 1..=MAX_FLAT_SIDE;
        if !side.contains(&width) || !side.contains(&height) {
            return Err(MazeError::InvalidFlatGrid { width, height });
        }
        Ok(Self { width, height })
    }

    /// Row width.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Row count.
    #[inline]
    #[must_use]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        self.width * self.height
    }

    /// `(row, col)` of a cell id.
    #[inline]
    #[must_use]
    pub const fn cell(self, id: u32) -> (u32, u32) {
        (id / self.width, id % self.width)
    }

    /// Cell id of `(row, col)`.
    #[inline]
    #[must_use]
    pub const fn id(self, row: u32, col: u32) -> u32 {
        row * self.width + col
    }

    /// Cells sharing a side with `id`, in up, left, right, down order.
    pub fn neighbors(self, id: u32) -> impl Iterator<Item = u32> {
        let (row, col) = self.cell(id);
        [
            (row > 0).then(|| id - self.width),
            (col > 0).then(|| id - 1),
            (col + 1 < self.width).then(|| id + 1),
            (row + 1 < self.height).then(|| id + self.width),
        ]
        .into_iter()
        .flatten()
    }
}

/// Result of a flat-grid carve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatMaze {
    grid: FlatGrid,
    visited: Vec<bool>,
    order: Vec<u32>,
}

impl FlatMaze {
    /// Grid the carve ran over.
    #[must_use]
    pub const fn grid(&self) -> FlatGrid {
        self.grid
    }

    /// Returns true if `id` is a corridor cell.
    #[inline]
    #[must_use]
    pub fn is_visited(&self, id: u32) -> bool {
        self.visited.get(id as usize).copied().unwrap_or(false)
    }

    /// Number of visited cells.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.order.len()
    }

    /// Cell ids in visiting order. The first is the start cell.
    #[must_use]
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// `(row, col)` of every visited cell, in visiting order.
    pub fn visited_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.order.iter().map(|&id| self.grid.cell(id))
    }
}

/// Carves `grid` from a uniformly random start cell.
pub fn carve_flat<R: Rng + ?Sized>(grid: FlatGrid, rng: &mut R) -> FlatMaze {
    let start = rng.gen_range(0..grid.cell_count());
    grow(grid, start, rng)
}

/// Carves `grid` from `start`.
///
/// # Errors
///
/// Returns `InvalidStartCell` if `start` is not a cell of `grid`.
pub fn carve_flat_from<R: Rng + ?Sized>(
    grid: FlatGrid,
    start: u32,
    rng: &mut R,
) -> MazeResult<FlatMaze> {
    if start >= grid.cell_count() {
        return Err(MazeError::InvalidStartCell {
            start,
            cells: grid.cell_count(),
        });
    }
    Ok(grow(grid, start, rng))
}

/// Frontier growth from a start cell known to be in the grid.
fn grow<R: Rng + ?Sized>(grid: FlatGrid, start: u32, rng: &mut R) -> FlatMaze {
    let mut visited = vec![false; grid.cell_count() as usize];
    let mut order = Vec::with_capacity(visited.len());
    let mut frontier: Vec<u32> = Vec::new();

    let mut visit = |id: u32, frontier: &mut Vec<u32>, visited: &mut Vec<bool>| {
        visited[id as usize] = true;
        order.push(id);
        frontier.extend(grid.neighbors(id).filter(|&n| !visited[n as usize]));
    };

    visit(start, &mut frontier, &mut visited);
    while !frontier.is_empty() {
        let id = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        if !visited[id as usize] {
            visit(id, &mut frontier, &mut visited);
        }
    }

    FlatMaze {
        grid,
        visited,
        order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::WorldSeed;
    use std::collections::HashSet;

    #[test]
    fn test_center_neighbors() {
        let neighbors: HashSet<u32> = FlatGrid::CHUNK.neighbors(112).collect();
        assert_eq!(neighbors, HashSet::from([97, 111, 113, 127]));
        assert_eq!(FlatGrid::CHUNK.cell(112), (7, 7));
    }

    #[test]
    fn test_no_row_wrap() {
        let grid = FlatGrid::CHUNK;
        // Last cell of row 0 and first cell of row 1.
        assert_eq!(grid.neighbors(14).collect::<Vec<_>>(), vec![13, 29]);
        assert_eq!(grid.neighbors(15).collect::<Vec<_>>(), vec![0, 16, 30]);
        assert_eq!(grid.neighbors(224).collect::<Vec<_>>(), vec![209, 223]);
    }

    #[test]
    fn test_non_square_grid() {
        let grid = FlatGrid::new(4, 2).unwrap();
        assert_eq!(grid.cell_count(), 8);
        assert_eq!(grid.cell(5), (1, 1));
        assert_eq!(grid.id(1, 3), 7);
        assert_eq!(grid.neighbors(3).collect::<Vec<_>>(), vec![2, 7]);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        assert_eq!(
            FlatGrid::new(0, 15),
            Err(MazeError::InvalidFlatGrid { width: 0, height: 15 })
        );
        assert!(FlatGrid::new(u32::MAX, 2).is_err());
        assert_eq!(
            FlatGrid::new(16, MAX_FLAT_SIDE + 1),
            Err(MazeError::InvalidFlatGrid { width: 16, height: 17 })
        );
        assert_eq!(FlatGrid::new(MAX_FLAT_SIDE, MAX_FLAT_SIDE).map(FlatGrid::cell_count), Ok(256));
    }

    #[test]
    fn test_start_outside_grid_rejected() {
        let grid = FlatGrid::new(4, 3).unwrap();
        let mut rng = WorldSeed::new(8).rng();
        assert_eq!(
            carve_flat_from(grid, 12, &mut rng),
            Err(MazeError::InvalidStartCell { start: 12, cells: 12 })
        );
        assert_eq!(carve_flat_from(grid, 11, &mut rng).map(|maze| maze.order()[0]), Ok(11));
    }

    #[test]
    fn test_carve_visits_every_cell_once() {
        let maze = carve_flat(FlatGrid::CHUNK, &mut WorldSeed::new(17).rng());
        assert_eq!(maze.visited_count(), 225);
        let unique: HashSet<u32> = maze.order().iter().copied().collect();
        assert_eq!(unique.len(), 225);
        assert!((0..225).all(|id| maze.is_visited(id)));
        assert!(!maze.is_visited(225));
    }

    #[test]
    fn test_each_cell_touches_an_earlier_one() {
        let grid = FlatGrid::new(9, 6).unwrap();
        let maze = carve_flat_from(grid, 20, &mut WorldSeed::new(4).rng()).unwrap();
        assert_eq!(maze.order()[0], 20);

        let mut seen = HashSet::from([20]);
        for &id in &maze.order()[1..] {
            assert!(grid.neighbors(id).any(|n| seen.contains(&n)));
            seen.insert(id);
        }
    }

    #[test]
    fn test_flat_carve_is_deterministic() {
        let a = carve_flat(FlatGrid::CHUNK, &mut WorldSeed::new(2024).rng());
        let b = carve_flat(FlatGrid::CHUNK, &mut WorldSeed::new(2024).rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = FlatGrid::new(1, 1).unwrap();
        let maze = carve_flat(grid, &mut WorldSeed::new(0).rng());
        assert_eq!(maze.order(), &[0]);
        assert_eq!(maze.visited_cells().collect::<Vec<_>>(), vec![(0, 0)]);
    }
}
