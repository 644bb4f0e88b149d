//! # Topology Tables
//!
//! A topology is a pair of edge kinds, one per axis:
//!
//! | Topology  | X axis | Z axis |
//! |-----------|--------|--------|
//! | Rectangle | Wall   | Wall   |
//! | Outdoor   | Open   | Open   |
//! | Cylinder  | Loop   | Wall   |
//! | Torus     | Loop   | Loop   |
//! | Mobius    | Twist  | Wall   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;

/// Grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Primary axis (columns).
    X,
    /// Secondary axis (rows).
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Z => f.write_str("z"),
        }
    }
}

/// Edge orientation.
///
/// Horizontal edges join neighbouring columns, vertical edges
/// neighbouring rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Edge `(x, z)` joins vertices `(x, z - 1)` and `(x, z)`.
    Vertical = 0,
    /// Edge `(x, z)` joins vertices `(x - 1, z)` and `(x, z)`.
    Horizontal = 1,
}

/// Boundary behaviour of one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EdgeKind {
    /// Bounded, no wrap.
    Wall = 0,
    /// Unbounded, with an extra boundary ring.
    Open = 1,
    /// Cyclic wrap.
    Loop = 2,
    /// Cyclic wrap with a half-turn (Möbius identification).
    Twist = 3,
}

impl EdgeKind {
    /// Amount added to the raw axis size to get the vertex extent.
    #[inline]
    #[must_use]
    pub const fn count_adjustment(self) -> i32 {
        match self {
            Self::Wall => -1,
            Self::Open => 1,
            Self::Loop | Self::Twist => 0,
        }
    }

    /// Folds a raw coordinate into this axis' canonical range.
    ///
    /// Wall and Open pass the value through (bounds are the caller's problem).
    /// Loop reduces modulo `size`, Twist modulo `2 * size`; the reflection
    /// for the second lap is applied by the graph.
    #[inline]
    #[must_use]
    pub const fn fold(self, value: i32, size: i32) -> i32 {
        debug_assert!(size > 0);
        match self {
            Self::Wall | Self::Open => value,
            Self::Loop => value.rem_euclid(size),
            Self::Twist => value.rem_euclid(2 * size),
        }
    }

    /// Returns true if stepping off either end comes back on the other.
    #[inline]
    #[must_use]
    pub const fn wraps(self) -> bool {
        matches!(self, Self::Loop | Self::Twist)
    }
}

impl TryFrom<u8> for EdgeKind {
    type Error = TopologyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Wall),
            1 => Ok(Self::Open),
            2 => Ok(Self::Loop),
            3 => Ok(Self::Twist),
            other => Err(TopologyError::UnknownEdgeKind(other)),
        }
    }
}

/// Surface the maze grid is laid on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Walled on all four sides.
    Rectangle,
    /// Open field with a ring of vertices around the grid.
    #[default]
    Outdoor,
    /// X wraps, Z is walled.
    Cylinder,
    /// Both axes wrap.
    Torus,
    /// X wraps with a half-turn, Z is walled.
    Mobius,
}

impl Topology {
    /// Every topology, in table order.
    pub const ALL: [Self; 5] = [
        Self::Rectangle,
        Self::Outdoor,
        Self::Cylinder,
        Self::Torus,
        Self::Mobius,
    ];

    /// Edge kind of the given axis.
    #[inline]
    #[must_use]
    pub const fn kind(self, axis: Axis) -> EdgeKind {
        let (x, z) = self.edge_kinds();
        match axis {
            Axis::X => x,
            Axis::Z => z,
        }
    }

    /// Edge kinds of the X and Z axes.
    #[must_use]
    pub const fn edge_kinds(self) -> (EdgeKind, EdgeKind) {
        match self {
            Self::Rectangle => (EdgeKind::Wall, EdgeKind::Wall),
            Self::Outdoor => (EdgeKind::Open, EdgeKind::Open),
            Self::Cylinder => (EdgeKind::Loop, EdgeKind::Wall),
            Self::Torus => (EdgeKind::Loop, EdgeKind::Loop),
            Self::Mobius => (EdgeKind::Twist, EdgeKind::Wall),
        }
    }

    /// Returns true if growth starts from border branches rather than
    /// a random vertex.
    #[must_use]
    pub const fn has_border(self) -> bool {
        matches!(self, Self::Rectangle | Self::Cylinder | Self::Mobius)
    }

    /// Lowercase name, as used in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Outdoor => "outdoor",
            Self::Cylinder => "cylinder",
            Self::Torus => "torus",
            Self::Mobius => "mobius",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topology {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|topology| topology.name() == lowered)
            .ok_or_else(|| TopologyError::UnknownTopology(s.to_string()))
    }
}
