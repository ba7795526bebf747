//! Invariant checking for the topology store and meshes built on it.
//!
//! Validation is read-only, so it may run concurrently with other readers once
//! all writers are done.

use crate::mesh_error::MeshTopologyError;

/// Consistency checks over computed topology.
///
/// For a [`TopologyStore`](crate::topology::TopologyStore) (and the
/// [`Mesh`](crate::mesh::Mesh) owning it) these are:
/// - every dimension with entities has its `(D, d)` and `(d, 0)` relations,
///   and no relation exists for a dimension without entities;
/// - every computed relation has one row per source entity and only
///   references existing target entities;
/// - no two entities of one dimension share a vertex set;
/// - `(d0, d1)` and `(d1, d0)`, when both computed, are mutual inverses.
pub trait DebugInvariants {
    /// Panic on the first violated invariant when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Run all checks and return the first violation as a
    /// [`MeshTopologyError::TopologyInconsistency`].
    fn validate_invariants(&self) -> Result<(), MeshTopologyError>;

    /// `true` iff [`validate_invariants`](Self::validate_invariants) passes.
    fn is_consistent(&self) -> bool {
        self.validate_invariants().is_ok()
    }
}

/// Panic if a topology validation fails, naming the checked type.
///
/// Compiled in for debug builds and with `check-invariants`; a no-op otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $what:literal) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(err) = $check {
            panic!(concat!("[invariants] ", $what, ": {}"), err);
        }
    };
}
