//! Derive relation `(d0, d1)`, `d0 >= d1`, by composing `(d0, d)` with
//! `(d, d1)` and filtering the candidates.
//!
//! For each `d0`-entity the candidates are the `d1`-entities reachable through
//! its incident `d`-entities, visited in stored row order. A candidate is kept
//! at most once, and only if
//! - `d0 == d1`: it is not the entity itself (an entity is not its own neighbour),
//! - `d0 != d1`: its vertex set is contained in the `d0`-entity's vertex set.
//!
//! Rows keep the insertion order of that walk.

use crate::mesh_error::{Inconsistency, MeshTopologyError};
use crate::topology::containment::is_subset;
use crate::topology::relation::Relation;
use crate::topology::store::TopologyStore;

/// Compute `(d0, d1)` from `(d0, d)` and `(d, d1)`.
pub(crate) fn from_intersection(
    topology: &mut TopologyStore,
    d0: usize,
    d1: usize,
    d: usize,
) -> Result<(), MeshTopologyError> {
    log::trace!(
        "Computing mesh connectivity {d0} - {d1} from intersection {d0} - {d} - {d1}."
    );
    debug_assert!(d0 >= d1, "intersection requires d0 >= d1");

    let down = topology.require(d0, d)?;
    let up = topology.require(d, d1)?;

    // Vertex sets for the containment filter; (0, 0) is adjacency, not identity.
    let vertex_sets = if d0 == d1 {
        None
    } else if d1 == 0 {
        return Err(MeshTopologyError::inconsistency(
            d0,
            Inconsistency::MissingRelation { d0, d1 },
        ));
    } else {
        Some((topology.require(d0, 0)?, topology.require(d1, 0)?))
    };

    let n0 = topology.size(d0);
    let mut relation = Relation::new();
    // Reused across entities, so it keeps the capacity of the largest row so far.
    let mut found: Vec<usize> = Vec::new();

    for e0 in 0..n0 {
        found.clear();
        for &e in down.row(e0).unwrap_or(&[]) {
            for &e1 in up.row(e).unwrap_or(&[]) {
                if found.contains(&e1) {
                    continue;
                }
                let keep = match vertex_sets {
                    None => e1 != e0,
                    Some((v0, v1)) => is_subset(
                        v1.row(e1).unwrap_or(&[]),
                        v0.row(e0).unwrap_or(&[]),
                    ),
                };
                if keep {
                    found.push(e1);
                }
            }
        }
        relation.push_row(&found);
    }

    topology.set_relation(d0, d1, relation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::transpose::from_transpose;

    /// Two triangles sharing edge {1,2}, with edges and their vertices known.
    fn seeded_without_cell_edges() -> TopologyStore {
        let mut s = TopologyStore::new(2);
        s.init_size(0, 4).unwrap();
        s.init_size(2, 2).unwrap();
        s.init_size(1, 5).unwrap();
        s.set_relation(2, 0, Relation::from_rows([[0, 1, 2], [1, 2, 3]]))
            .unwrap();
        s.set_relation(
            1,
            0,
            Relation::from_rows([[0, 1], [1, 2], [0, 2], [2, 3], [1, 3]]),
        )
        .unwrap();
        s
    }

    fn seeded() -> TopologyStore {
        let mut s = seeded_without_cell_edges();
        s.set_relation(2, 1, Relation::from_rows([[0, 1, 2], [1, 3, 4]]))
            .unwrap();
        s
    }

    #[test]
    fn vertex_neighbours_exclude_self() {
        let mut s = seeded();
        from_transpose(&mut s, 0, 2).unwrap();
        from_intersection(&mut s, 0, 0, 2).unwrap();
        let vv = s.connectivity(0, 0).unwrap();
        assert_eq!(vv.row(0), Some(&[1, 2][..]));
        assert_eq!(vv.row(1), Some(&[0, 2, 3][..]));
        assert_eq!(vv.row(2), Some(&[0, 1, 3][..]));
        assert_eq!(vv.row(3), Some(&[1, 2][..]));
    }

    #[test]
    fn edge_neighbours_through_vertices() {
        let mut s = seeded();
        from_transpose(&mut s, 0, 1).unwrap();
        from_intersection(&mut s, 1, 1, 0).unwrap();
        let ee = s.connectivity(1, 1).unwrap();
        // Edge {1,2} touches every other edge.
        assert_eq!(ee.row(1), Some(&[0, 4, 2, 3][..]));
        assert!(!ee.row(3).unwrap().contains(&3));
    }

    #[test]
    fn containment_filters_non_sub_entities() {
        let mut s = seeded_without_cell_edges();
        from_transpose(&mut s, 0, 1).unwrap();
        from_intersection(&mut s, 2, 1, 0).unwrap();
        let ce = s.connectivity(2, 1).unwrap();
        // Vertex 1 of cell 1 also reaches edge {0,1}, which is not inside the cell.
        assert_eq!(ce.row(0), Some(&[0, 2, 1][..]));
        assert_eq!(ce.row(1), Some(&[1, 4, 3][..]));
    }

    #[test]
    fn vertex_target_is_rejected() {
        let mut s = seeded();
        from_transpose(&mut s, 0, 1).unwrap();
        let err = from_intersection(&mut s, 1, 0, 0);
        assert!(err.unwrap_err().is_inconsistency());
    }
}
