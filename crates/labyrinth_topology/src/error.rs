//! # Topology Error Types
//!
//! Construction-time failures. Index arithmetic itself never fails.

use thiserror::Error;

use crate::graph::MAX_AXIS_SIZE;
use crate::kind::Axis;

/// Errors that can occur while building a topology graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// An axis size was zero or too large to index.
    #[error("invalid {axis} size {size}: must be in 1..={max}", max = MAX_AXIS_SIZE)]
    InvalidSize {
        /// The offending axis.
        axis: Axis,
        /// The rejected size.
        size: u32,
    },

    /// Topology name not recognised.
    #[error("unknown topology: {0:?}")]
    UnknownTopology(String),

    /// Raw edge kind tag outside the known table.
    #[error("edge kind tag out of range: {0}")]
    UnknownEdgeKind(u8),
}

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;
