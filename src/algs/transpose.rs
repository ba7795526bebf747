//! Derive relation `(d0, d1)` by inverting `(d1, d0)`.
//!
//! The transpose is computed in two passes without growing any row:
//!
//!   1. Walk every row of `(d1, d0)` and count the connections of each
//!      `d0`-entity.
//!   2. Lay out exact-size rows from the counts, then walk `(d1, d0)` again in
//!      increasing `d1` order and drop each `d1` index into the next free slot
//!      of its `d0`-entity.
//!
//! Rows of the result are therefore sorted by `d1` index, and the output is
//! reproducible for a given input.

use crate::mesh_error::{Inconsistency, MeshTopologyError};
use crate::topology::relation::Relation;
use crate::topology::store::TopologyStore;

/// Invert `relation`, whose entries index into `0..num_targets`.
///
/// Returns `Err(index)` with the first entry that is `>= num_targets`.
pub fn transposed(relation: &Relation, num_targets: usize) -> Result<Relation, usize> {
    let mut degrees = vec![0usize; num_targets];
    for row in relation.rows() {
        for &t in row {
            *degrees.get_mut(t).ok_or(t)? += 1;
        }
    }

    // Prefix sums give the first slot of every row.
    let mut offsets = Vec::with_capacity(num_targets + 1);
    offsets.push(0usize);
    for &d in &degrees {
        offsets.push(offsets[offsets.len() - 1] + d);
    }
    let mut next = offsets[..num_targets].to_vec();

    let mut targets = vec![0usize; offsets[num_targets]];
    for (source, row) in relation.rows().enumerate() {
        for &t in row {
            targets[next[t]] = source;
            next[t] += 1;
        }
    }

    Ok(Relation::from_csr(offsets, targets))
}

/// Compute `(d0, d1)` from the already computed `(d1, d0)`.
pub(crate) fn from_transpose(
    topology: &mut TopologyStore,
    d0: usize,
    d1: usize,
) -> Result<(), MeshTopologyError> {
    log::trace!("Computing mesh connectivity {d0} - {d1} from transpose.");
    let source = topology.require(d1, d0)?;
    let relation = transposed(source, topology.size(d0)).map_err(|index| {
        MeshTopologyError::inconsistency(
            d1,
            Inconsistency::IndexOutOfBounds { d0: d1, d1: d0, index },
        )
    })?;
    topology.set_relation(d0, d1, relation)
}
