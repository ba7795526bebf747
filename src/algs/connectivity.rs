//! Resolve a requested relation `(d0, d1)` from the building blocks:
//!
//!   1. [`entities`](crate::algs::entities): `(d, 0)` and `(D, d)` from `(D, 0)`
//!   2. [`transpose`](crate::algs::transpose): `(d0, d1)` from `(d1, d0)`
//!   3. [`intersection`](crate::algs::intersection): `(d0, d1)` from `(d0, d)` and `(d, d1)`
//!
//! Each block has preconditions on which relations already exist; the
//! resolver satisfies them recursively before applying it. Every relation is
//! computed at most once, and the recursion bottoms out at relations anchored
//! at dimension `0` or `D`, which entity generation provides.

use crate::algs::entities::generate;
use crate::algs::intersection::from_intersection;
use crate::algs::transpose::from_transpose;
use crate::debug_invariants::DebugInvariants;
use crate::mesh::Mesh;
use crate::mesh_error::{Inconsistency, MeshTopologyError};
use crate::topology::cell_type::CellTemplate;
use crate::topology::store::TopologyStore;

/// Make sure relation `(d0, d1)` is materialized in the mesh's topology.
///
/// A no-op if it already is. On a mesh without cells nothing is computed.
///
/// # Errors
/// [`MeshTopologyError::DimensionOutOfRange`] for dimensions above the mesh
/// dimension, [`MeshTopologyError::TopologyInconsistency`] if a prerequisite
/// is found in a contradictory state.
pub fn compute_connectivity<C: CellTemplate>(
    mesh: &mut Mesh<C>,
    d0: usize,
    d1: usize,
) -> Result<(), MeshTopologyError> {
    let (cell_type, topology) = mesh.split_mut();
    resolve(cell_type, topology, d0, d1)?;
    topology.debug_assert_invariants();
    Ok(())
}

pub(crate) fn resolve<C: CellTemplate + ?Sized>(
    cell_type: &C,
    topology: &mut TopologyStore,
    d0: usize,
    d1: usize,
) -> Result<(), MeshTopologyError> {
    log::trace!("Requesting connectivity {d0} - {d1}.");
    topology.check_dim(d0)?;
    topology.check_dim(d1)?;

    if topology.has_connectivity(d0, d1) {
        return Ok(());
    }
    let top = topology.dim();
    if topology.size(top) == 0 {
        return Ok(());
    }

    if topology.size(d0) == 0 {
        generate(cell_type, topology, d0)?;
    }
    if topology.size(d1) == 0 {
        generate(cell_type, topology, d1)?;
    }
    // A dimension without entities has no incidences to record.
    if topology.size(d0) == 0 || topology.size(d1) == 0 {
        return Ok(());
    }

    // Entity generation may have produced it.
    if topology.has_connectivity(d0, d1) {
        return Ok(());
    }

    if d0 < d1 {
        resolve(cell_type, topology, d1, d0)?;
        from_transpose(topology, d0, d1)
    } else {
        // (d, 0) for d > 0 only ever comes out of entity generation.
        if d0 > 0 && d1 == 0 {
            return Err(MeshTopologyError::inconsistency(
                d0,
                Inconsistency::MissingRelation { d0, d1 },
            ));
        }
        let d = if d0 == 0 && d1 == 0 { top } else { 0 };
        resolve(cell_type, topology, d0, d)?;
        resolve(cell_type, topology, d, d1)?;
        from_intersection(topology, d0, d1, d)
    }
}
