//! # Maze Carver
//!
//! Randomized frontier growth over a `TopologyGraph`.
//!
//! ## Algorithm
//!
//! 1. Seed the frontier with the border branches, or, on a graph without a
//!    border, fill one random vertex and offer its branches.
//! 2. Pop a uniformly random frontier entry.
//! 3. If its target is unfilled, fill it and offer the target's branches.
//!    Otherwise drop it as stale.
//! 4. Stop when the frontier is empty.
//!
//! Every fill consumes exactly one branch from an already-filled vertex (or
//! from outside the border), so the result is a spanning tree.
//!
//! All state lives in a `CarveState` owned by the caller. Independent carves
//! share nothing and can run on any number of threads.

use labyrinth_topology::{Branch, EdgeId, TopologyGraph, VertexId};
use rand::Rng;

/// A frontier branch together with the vertex that offered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrontierEntry {
    /// Filled vertex the branch leads out of. `None` for border branches.
    pub from: Option<VertexId>,
    /// Candidate step.
    pub branch: Branch,
}

/// One committed step of the carve: an opened edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Passage {
    /// Vertex the carve came from. `None` for an entrance through the border.
    pub from: Option<VertexId>,
    /// Vertex filled by this step.
    pub to: VertexId,
    /// Edge crossed.
    pub edge: EdgeId,
}

/// Outcome of a single `CarveState::step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarveStep {
    /// A new vertex was filled.
    Committed(VertexId),
    /// The popped branch led to an already filled vertex.
    Discarded(Branch),
    /// The frontier is empty.
    Exhausted,
}

/// In-progress carve.
#[derive(Clone, Debug)]
pub struct CarveState {
    frontier: Vec<FrontierEntry>,
    filled: Vec<bool>,
    order: Vec<VertexId>,
    passages: Vec<Passage>,
    seeded_at: Option<VertexId>,
    discarded: usize,
}

impl CarveState {
    /// Seeds a carve over `graph`.
    ///
    /// A graph with no vertices gives an already exhausted state.
    pub fn seed<R: Rng + ?Sized>(graph: &TopologyGraph, rng: &mut R) -> Self {
        let vertex_count = graph.vertex_count();
        let mut state = Self {
            frontier: Vec::new(),
            filled: vec![false; vertex_count as usize],
            order: Vec::with_capacity(vertex_count as usize),
            passages: Vec::with_capacity(vertex_count as usize),
            seeded_at: None,
            discarded: 0,
        };

        let border = graph.border_branches();
        if !border.is_empty() {
            state.frontier = border
                .into_iter()
                .map(|branch| FrontierEntry { from: None, branch })
                .collect();
        } else if vertex_count > 0 {
            let start = rng.gen_range(0..vertex_count);
            state.seeded_at = Some(start);
            state.fill(graph, start);
        }

        state
    }

    fn fill(&mut self, graph: &TopologyGraph, vertex: VertexId) {
        self.filled[vertex as usize] = true;
        self.order.push(vertex);
        let branches = graph.branches_of_vertex(vertex);
        self.frontier.extend(branches.iter().map(|&branch| FrontierEntry {
            from: Some(vertex),
            branch,
        }));
    }

    /// Pops one random frontier entry and resolves it.
    pub fn step<R: Rng + ?Sized>(&mut self, graph: &TopologyGraph, rng: &mut R) -> CarveStep {
        if self.frontier.is_empty() {
            return CarveStep::Exhausted;
        }

        let index = rng.gen_range(0..self.frontier.len());
        let entry = self.frontier.swap_remove(index);
        let target = entry.branch.vertex;

        if self.filled[target as usize] {
            self.discarded += 1;
            return CarveStep::Discarded(entry.branch);
        }

        self.fill(graph, target);
        self.passages.push(Passage {
            from: entry.from,
            to: target,
            edge: entry.branch.edge,
        });
        CarveStep::Committed(target)
    }

    /// Steps until the frontier is empty.
    pub fn run<R: Rng + ?Sized>(&mut self, graph: &TopologyGraph, rng: &mut R) {
        while self.step(graph, rng) != CarveStep::Exhausted {}
    }

    /// Returns true once nothing is left to pop.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Pending frontier entries, stale ones included.
    #[must_use]
    pub fn frontier(&self) -> &[FrontierEntry] {
        &self.frontier
    }

    /// Returns true if `vertex` has been filled.
    #[inline]
    #[must_use]
    pub fn is_filled(&self, vertex: VertexId) -> bool {
        self.filled.get(vertex as usize).copied().unwrap_or(false)
    }

    /// Number of vertices filled so far.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.order.len()
    }

    /// Freezes the state into a result. Pending entries are dropped.
    #[must_use]
    pub fn finish(self) -> CarvedMaze {
        CarvedMaze {
            filled: self.filled,
            order: self.order,
            passages: self.passages,
            seeded_at: self.seeded_at,
            discarded: self.discarded,
        }
    }
}

/// Carves a complete maze over `graph`.
pub fn carve<R: Rng + ?Sized>(graph: &TopologyGraph, rng: &mut R) -> CarvedMaze {
    let mut state = CarveState::seed(graph, rng);
    tracing::debug!(
        "Carving {} {}x{} ({} vertices, seed: {:?})",
        graph.topology(),
        graph.size_x(),
        graph.size_z(),
        graph.vertex_count(),
        state.seeded_at
    );

    state.run(graph, rng);
    let maze = state.finish();

    tracing::debug!(
        "Carved {} vertices, {} stale branches discarded",
        maze.filled_count(),
        maze.stale_discards()
    );
    maze
}

/// Result of a finished carve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarvedMaze {
    filled: Vec<bool>,
    order: Vec<VertexId>,
    passages: Vec<Passage>,
    seeded_at: Option<VertexId>,
    discarded: usize,
}

impl CarvedMaze {
    /// Size of the vertex space the carve ran over.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.filled.len()
    }

    /// Returns true if `vertex` is part of the maze.
    #[inline]
    #[must_use]
    pub fn is_filled(&self, vertex: VertexId) -> bool {
        self.filled.get(vertex as usize).copied().unwrap_or(false)
    }

    /// Filled flag per vertex id.
    #[must_use]
    pub fn filled_states(&self) -> &[bool] {
        &self.filled
    }

    /// Number of filled vertices.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.order.len()
    }

    /// Filled vertex ids in ascending order.
    pub fn filled_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.filled
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(vertex, _)| vertex as VertexId)
    }

    /// Filled vertex ids in the order they were filled.
    #[must_use]
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    /// Opened edges in the order they were opened.
    #[must_use]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// Passages that enter through the border.
    pub fn entrances(&self) -> impl Iterator<Item = &Passage> {
        self.passages.iter().filter(|passage| passage.from.is_none())
    }

    /// Vertex picked to start growth. `None` when seeded from the border.
    #[must_use]
    pub const fn seed(&self) -> Option<VertexId> {
        self.seeded_at
    }

    /// Frontier entries dropped because their target was already filled.
    #[must_use]
    pub const fn stale_discards(&self) -> usize {
        self.discarded
    }

    /// Returns true if every vertex was filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled_count() == self.vertex_count()
    }
}
