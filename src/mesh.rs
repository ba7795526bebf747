//! `Mesh`: owner of a topology store built from cell→vertex connectivity.
//!
//! A mesh is created from the minimal description of an unstructured mesh,
//! one vertex tuple per cell, and derives everything else lazily:
//!
//! ```rust
//! # fn try_main() -> Result<(), mesh_topology::mesh_error::MeshTopologyError> {
//! use mesh_topology::mesh::Mesh;
//! use mesh_topology::topology::CellType;
//!
//! let mut mesh = Mesh::new(CellType::Triangle, 4, [[0, 1, 2], [1, 2, 3]])?;
//! assert_eq!(mesh.init(1)?, 5);
//! mesh.init_connectivity(0, 0)?;
//! let v1 = mesh.entity(0, 1).unwrap();
//! assert_eq!(v1.entities(0), Some(&[0, 2, 3][..]));
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

use std::fmt;

use crate::algs::connectivity::compute_connectivity;
use crate::algs::entities::compute_entities;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshTopologyError;
use crate::topology::cell_type::{CellTemplate, CellType};
use crate::topology::containment::is_subset;
use crate::topology::relation::Relation;
use crate::topology::store::TopologyStore;

/// An unstructured mesh of a single cell type.
#[derive(Clone, Debug)]
pub struct Mesh<C = CellType> {
    cell_type: C,
    topology: TopologyStore,
}

impl<C: CellTemplate> Mesh<C> {
    /// Build a mesh from `num_vertices` vertices and one vertex tuple per cell.
    ///
    /// # Errors
    /// [`MeshTopologyError::InvalidCell`] if a cell has the wrong number of
    /// vertices, references a vertex `>= num_vertices`, or repeats a vertex.
    pub fn new<R>(
        cell_type: C,
        num_vertices: usize,
        cells: impl IntoIterator<Item = R>,
    ) -> Result<Self, MeshTopologyError>
    where
        R: AsRef<[usize]>,
    {
        let top = cell_type.dim();
        let expected = cell_type.num_vertices();
        let mut cell_vertices = Relation::new();
        for (cell, row) in cells.into_iter().enumerate() {
            let row = row.as_ref();
            validate_cell(cell, row, expected, num_vertices)?;
            cell_vertices.push_row(row);
        }

        let mut topology = TopologyStore::new(top);
        topology.init_size(0, num_vertices)?;
        topology.init_size(top, cell_vertices.num_rows())?;
        if !cell_vertices.is_empty() {
            topology.set_relation(top, 0, cell_vertices)?;
        }
        log::debug!(
            "mesh of {} {}-cells on {num_vertices} vertices",
            topology.size(top),
            top
        );
        Ok(Self {
            cell_type,
            topology,
        })
    }

    /// Like [`Mesh::new`], with the vertex count inferred as one past the
    /// largest referenced vertex.
    pub fn from_cells<R>(
        cell_type: C,
        cells: impl IntoIterator<Item = R>,
    ) -> Result<Self, MeshTopologyError>
    where
        R: AsRef<[usize]>,
    {
        let cells: Vec<R> = cells.into_iter().collect();
        let num_vertices = cells
            .iter()
            .filter_map(|c| c.as_ref().iter().copied().max())
            .max()
            .map_or(0, |m| m + 1);
        Self::new(cell_type, num_vertices, cells)
    }

    /// Topological dimension of the cells.
    #[inline]
    pub fn dim(&self) -> usize {
        self.topology.dim()
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.topology.size(self.dim())
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.topology.size(0)
    }

    /// Number of entities of dimension `d` computed so far.
    #[inline]
    pub fn num_entities(&self, d: usize) -> usize {
        self.topology.size(d)
    }

    #[inline]
    pub fn cell_type(&self) -> &C {
        &self.cell_type
    }

    #[inline]
    pub fn topology(&self) -> &TopologyStore {
        &self.topology
    }

    /// Computed relation `(d0, d1)`, if any.
    #[inline]
    pub fn connectivity(&self, d0: usize, d1: usize) -> Option<&Relation> {
        self.topology.connectivity(d0, d1)
    }

    /// Borrow the cell template and the store separately, so computation
    /// routines can read one while writing the other.
    pub(crate) fn split_mut(&mut self) -> (&C, &mut TopologyStore) {
        (&self.cell_type, &mut self.topology)
    }

    /// Compute entities of dimension `dim`; returns their number.
    pub fn init(&mut self, dim: usize) -> Result<usize, MeshTopologyError> {
        compute_entities(self, dim)
    }

    /// Compute relation `(d0, d1)`.
    pub fn init_connectivity(&mut self, d0: usize, d1: usize) -> Result<(), MeshTopologyError> {
        compute_connectivity(self, d0, d1)
    }

    /// Compute entities of every dimension.
    pub fn init_all(&mut self) -> Result<(), MeshTopologyError> {
        for d in 0..=self.dim() {
            self.init(d)?;
        }
        Ok(())
    }

    /// View of entity `index` of dimension `dim`, if it exists.
    pub fn entity(&self, dim: usize, index: usize) -> Option<MeshEntity<'_, C>> {
        (index < self.topology.size(dim)).then_some(MeshEntity {
            mesh: self,
            dim,
            index,
        })
    }

    /// All computed entities of dimension `dim`, in index order.
    pub fn entities(&self, dim: usize) -> impl ExactSizeIterator<Item = MeshEntity<'_, C>> + '_ {
        (0..self.topology.size(dim)).map(move |index| MeshEntity {
            mesh: self,
            dim,
            index,
        })
    }
}

fn validate_cell(
    cell: usize,
    row: &[usize],
    expected: usize,
    num_vertices: usize,
) -> Result<(), MeshTopologyError> {
    if row.len() != expected {
        return Err(MeshTopologyError::InvalidCell {
            cell,
            reason: format!("expected {expected} vertices, got {}", row.len()),
        });
    }
    if let Some(&v) = row.iter().find(|&&v| v >= num_vertices) {
        return Err(MeshTopologyError::InvalidCell {
            cell,
            reason: format!("vertex {v} out of range ({num_vertices} vertices)"),
        });
    }
    for (i, v) in row.iter().enumerate() {
        if row[i + 1..].contains(v) {
            return Err(MeshTopologyError::InvalidCell {
                cell,
                reason: format!("vertex {v} repeated"),
            });
        }
    }
    Ok(())
}

impl<C: CellTemplate> DebugInvariants for Mesh<C> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshTopologyError> {
        self.topology.validate_invariants()
    }
}

impl<C: CellTemplate + fmt::Display> fmt::Display for Mesh<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} mesh", self.cell_type)?;
        write!(f, "{}", self.topology)
    }
}

/// Transient view of one entity: `(mesh, dimension, index)`.
#[derive(Debug)]
pub struct MeshEntity<'a, C = CellType> {
    mesh: &'a Mesh<C>,
    dim: usize,
    index: usize,
}

impl<C> Clone for MeshEntity<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for MeshEntity<'_, C> {}

impl<'a, C: CellTemplate> MeshEntity<'a, C> {
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn mesh(&self) -> &'a Mesh<C> {
        self.mesh
    }

    /// Incident entities of dimension `d`, if relation `(dim, d)` is computed.
    pub fn entities(&self, d: usize) -> Option<&'a [usize]> {
        self.mesh.connectivity(self.dim, d)?.row(self.index)
    }

    /// Number of incident entities of dimension `d`; zero if not computed.
    pub fn num_entities(&self, d: usize) -> usize {
        self.entities(d).map_or(0, <[usize]>::len)
    }

    /// Defining vertices. A vertex is its own vertex set.
    pub fn vertices(&self) -> Option<&[usize]> {
        if self.dim == 0 {
            return Some(std::slice::from_ref(&self.index));
        }
        self.entities(0)
    }

    /// `true` if `other`'s vertex set lies within this entity's vertex set.
    ///
    /// `None` when either vertex set has not been computed.
    pub fn contains(&self, other: &MeshEntity<'_, C>) -> Option<bool> {
        Some(is_subset(other.vertices()?, self.vertices()?))
    }
}

impl<C> PartialEq for MeshEntity<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.mesh, other.mesh) && self.dim == other.dim && self.index == other.index
    }
}

impl<C> Eq for MeshEntity<'_, C> {}
