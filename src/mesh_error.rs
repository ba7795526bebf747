//! MeshTopologyError: Unified error type for mesh-topology public APIs
//!
//! Computation failures are always [`MeshTopologyError::TopologyInconsistency`]:
//! they are produced from internally generated data, so retrying cannot change
//! the outcome and callers should treat them as fatal. The remaining variants
//! reject bad caller input before any topology is touched.

use std::fmt;
use thiserror::Error;

/// The particular internal-consistency violation behind a
/// [`MeshTopologyError::TopologyInconsistency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// The dimension has a nonzero entity count but its incidence relations are missing.
    EntitiesWithoutConnectivity,
    /// Incidence relations for the dimension exist but its entity count is zero.
    ConnectivityWithoutEntities,
    /// A relation required as a precondition was not materialized.
    MissingRelation { d0: usize, d1: usize },
    /// A cell template produced output that disagrees with its own counts.
    TemplateMismatch { expected: usize, found: usize },
    /// A relation was about to be overwritten.
    RelationAlreadySet { d0: usize, d1: usize },
    /// The entity count of the dimension was about to be overwritten.
    SizeAlreadySet,
    /// Relations `(d0,d1)` and `(d1,d0)` are not inverses of each other.
    InverseMismatch { d0: usize, d1: usize },
    /// Two entities share the same vertex set.
    DuplicateEntity { first: usize, second: usize },
    /// A relation's row count differs from the source dimension's entity count.
    RowCountMismatch { d0: usize, d1: usize, expected: usize, found: usize },
    /// A relation row references an index past the entity count.
    IndexOutOfBounds { d0: usize, d1: usize, index: usize },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Inconsistency::EntitiesWithoutConnectivity => {
                write!(f, "entities exist but connectivity is missing")
            }
            Inconsistency::ConnectivityWithoutEntities => {
                write!(f, "connectivity exists but entities are missing")
            }
            Inconsistency::MissingRelation { d0, d1 } => {
                write!(f, "required connectivity {d0} - {d1} has not been computed")
            }
            Inconsistency::TemplateMismatch { expected, found } => {
                write!(f, "cell template produced {found} items, expected {expected}")
            }
            Inconsistency::RelationAlreadySet { d0, d1 } => {
                write!(f, "connectivity {d0} - {d1} is already set")
            }
            Inconsistency::SizeAlreadySet => write!(f, "entity count is already set"),
            Inconsistency::InverseMismatch { d0, d1 } => {
                write!(f, "connectivity {d0} - {d1} is not the transpose of {d1} - {d0}")
            }
            Inconsistency::DuplicateEntity { first, second } => {
                write!(f, "entities {first} and {second} share a vertex set")
            }
            Inconsistency::RowCountMismatch { d0, d1, expected, found } => {
                write!(f, "connectivity {d0} - {d1} has {found} rows, expected {expected}")
            }
            Inconsistency::IndexOutOfBounds { d0, d1, index } => {
                write!(f, "connectivity {d0} - {d1} references entity {index} past the end")
            }
        }
    }
}

/// Unified error type for mesh-topology operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshTopologyError {
    /// Store contents contradict each other; internal or template bug, never retryable.
    #[error("Topology inconsistency in dimension {dim}: {reason}")]
    TopologyInconsistency { dim: usize, reason: Inconsistency },
    /// A requested dimension exceeds the mesh's top dimension.
    #[error("Dimension {dim} out of range for mesh of topological dimension {top}")]
    DimensionOutOfRange { dim: usize, top: usize },
    /// Cell-to-vertex input rejected at mesh construction.
    #[error("Invalid cell {cell}: {reason}")]
    InvalidCell { cell: usize, reason: String },
    /// A deserialized relation or store has an impossible shape.
    #[error("Malformed topology snapshot: {reason}")]
    MalformedSnapshot { reason: String },
}

impl MeshTopologyError {
    /// Shorthand for building a [`MeshTopologyError::TopologyInconsistency`].
    #[inline]
    pub fn inconsistency(dim: usize, reason: Inconsistency) -> Self {
        MeshTopologyError::TopologyInconsistency { dim, reason }
    }

    /// True for the fatal internal-consistency kind.
    pub fn is_inconsistency(&self) -> bool {
        matches!(self, MeshTopologyError::TopologyInconsistency { .. })
    }
}
