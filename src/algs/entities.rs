//! Generate entities of one dimension from cell→vertex connectivity.
//!
//! Generating the entities of dimension `dim` is the same as generating the
//! relations `(D, dim)` (cells to entities) and `(dim, 0)` (entities to
//! vertices). Cells are visited in index order and each local sub-entity
//! reported by the cell template becomes a new global entity on its first
//! occurrence only. Earlier occurrences are looked up among the entities of
//! neighbouring cells with a smaller index, so the search never scans the whole
//! mesh.

use crate::algs::connectivity::resolve;
use crate::debug_invariants::DebugInvariants;
use crate::mesh::Mesh;
use crate::mesh_error::{Inconsistency, MeshTopologyError};
use crate::topology::cell_type::CellTemplate;
use crate::topology::containment::{same_vertex_set, sorted_key};
use crate::topology::relation::Relation;
use crate::topology::store::TopologyStore;

/// Number of entities of dimension `dim`, generating them if absent.
///
/// Idempotent: once generated, the cached count is returned as is.
///
/// # Errors
/// [`MeshTopologyError::TopologyInconsistency`] if the count and the
/// `(D, dim)`/`(dim, 0)` relations disagree, or if the cell template returns
/// decompositions that contradict its own counts.
/// [`MeshTopologyError::DimensionOutOfRange`] if `dim` exceeds the mesh dimension.
pub fn compute_entities<C: CellTemplate>(
    mesh: &mut Mesh<C>,
    dim: usize,
) -> Result<usize, MeshTopologyError> {
    let (cell_type, topology) = mesh.split_mut();
    let count = generate(cell_type, topology, dim)?;
    topology.debug_assert_invariants();
    Ok(count)
}

pub(crate) fn generate<C: CellTemplate + ?Sized>(
    cell_type: &C,
    topology: &mut TopologyStore,
    dim: usize,
) -> Result<usize, MeshTopologyError> {
    topology.check_dim(dim)?;
    let top = topology.dim();
    let num_cells = topology.size(top);
    let has_ce = topology.has_connectivity(top, dim);
    let has_ev = topology.has_connectivity(dim, 0);

    if topology.size(dim) > 0 {
        let missing_ce = !has_ce && dim != top && num_cells > 0;
        let missing_ev = !has_ev && dim != 0;
        if missing_ce || missing_ev {
            return Err(MeshTopologyError::inconsistency(
                dim,
                Inconsistency::EntitiesWithoutConnectivity,
            ));
        }
        return Ok(topology.size(dim));
    }

    if has_ce || has_ev {
        return Err(MeshTopologyError::inconsistency(
            dim,
            Inconsistency::ConnectivityWithoutEntities,
        ));
    }

    // Nothing to decompose.
    if num_cells == 0 {
        return Ok(0);
    }

    // Restrict duplicate lookups to neighbouring cells.
    resolve(cell_type, topology, top, top)?;

    log::trace!("Creating mesh entities of dimension {dim}.");
    let (cell_entities, entity_vertices) = discover(cell_type, topology, dim)?;
    let count = entity_vertices.num_rows();
    // A template without sub-entities of this dimension leaves nothing to store.
    if count == 0 {
        log::debug!("cell template has no entities of dimension {dim}");
        return Ok(0);
    }

    topology.init_size(dim, count)?;
    topology.set_relation(top, dim, cell_entities)?;
    topology.set_relation(dim, 0, entity_vertices)?;
    log::debug!("created {count} entities of dimension {dim} from {num_cells} cells");
    Ok(count)
}

/// Visit cells in index order and assign global indices on first discovery.
///
/// Returns the `(D, dim)` and `(dim, 0)` relations.
fn discover<C: CellTemplate + ?Sized>(
    cell_type: &C,
    topology: &TopologyStore,
    dim: usize,
) -> Result<(Relation, Relation), MeshTopologyError> {
    let top = topology.dim();
    let cells = topology.require(top, 0)?;
    let neighbours = topology.require(top, top)?;
    let expected_vertices = cell_type.num_vertices();
    let m = cell_type.local_count(dim);
    let n = cell_type.local_vertex_count(dim);

    let mut cell_entities = Relation::new();
    let mut entity_vertices = Relation::new();
    let mut row = Vec::with_capacity(m);

    for (c, vertices) in cells.rows().enumerate() {
        check_count(dim, expected_vertices, vertices.len())?;
        let locals = cell_type.decompose(dim, vertices);
        check_count(dim, m, locals.len())?;

        row.clear();
        for local in &locals {
            check_count(dim, n, local.len())?;
            let key = sorted_key(local);
            let earlier = neighbours.row(c).unwrap_or(&[]);
            let e = match find_existing(&cell_entities, &entity_vertices, earlier, c, &key) {
                Some(e) => e,
                None => {
                    entity_vertices.push_row(&key);
                    entity_vertices.num_rows() - 1
                }
            };
            row.push(e);
        }
        cell_entities.push_row(&row);
    }
    Ok((cell_entities, entity_vertices))
}

/// Look for an entity with vertex set `key` among the entities already
/// recorded on neighbours of `cell` with a smaller index.
fn find_existing(
    cell_entities: &Relation,
    entity_vertices: &Relation,
    neighbours: &[usize],
    cell: usize,
    key: &[usize],
) -> Option<usize> {
    neighbours
        .iter()
        .filter(|&&c0| c0 < cell)
        .flat_map(|&c0| cell_entities.row(c0).unwrap_or(&[]))
        .copied()
        .find(|&e| {
            entity_vertices
                .row(e)
                .is_some_and(|verts| same_vertex_set(verts, key))
        })
}

fn check_count(dim: usize, expected: usize, found: usize) -> Result<(), MeshTopologyError> {
    if expected != found {
        return Err(MeshTopologyError::inconsistency(
            dim,
            Inconsistency::TemplateMismatch { expected, found },
        ));
    }
    Ok(())
}
