//! `SharedMesh`: a mesh shared across threads with a single topology writer.
//!
//! Topology computation mutates the store while reading earlier relations, so
//! all computing calls for one mesh go through the write lock. Queries take
//! the read lock and may run concurrently with each other. Requests for
//! relations that already exist only ever take an upgradable read lock.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard};

use crate::mesh::Mesh;
use crate::mesh_error::MeshTopologyError;
use crate::topology::cell_type::{CellTemplate, CellType};

/// Thread-safe handle to a [`Mesh`]; clones share the same mesh.
#[derive(Debug)]
pub struct SharedMesh<C = CellType> {
    inner: Arc<RwLock<Mesh<C>>>,
}

impl<C> Clone for SharedMesh<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: CellTemplate> SharedMesh<C> {
    pub fn new(mesh: Mesh<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(mesh)),
        }
    }

    /// Number of entities of dimension `dim`, computing them under the write
    /// lock if needed.
    pub fn compute_entities(&self, dim: usize) -> Result<usize, MeshTopologyError> {
        let guard = self.inner.upgradable_read();
        let n = guard.num_entities(dim);
        if n > 0 {
            return Ok(n);
        }
        let mut mesh = RwLockUpgradableReadGuard::upgrade(guard);
        mesh.init(dim)
    }

    /// Materialize relation `(d0, d1)`, taking the write lock only if it is missing.
    pub fn compute_connectivity(&self, d0: usize, d1: usize) -> Result<(), MeshTopologyError> {
        let guard = self.inner.upgradable_read();
        if guard.topology().has_connectivity(d0, d1) {
            return Ok(());
        }
        let mut mesh = RwLockUpgradableReadGuard::upgrade(guard);
        mesh.init_connectivity(d0, d1)
    }

    /// Compute every listed relation, in order, under one write lock, so later
    /// readers find them all in place.
    pub fn precompute(&self, pairs: &[(usize, usize)]) -> Result<(), MeshTopologyError> {
        let mut mesh = self.inner.write();
        for &(d0, d1) in pairs {
            mesh.init_connectivity(d0, d1)?;
        }
        Ok(())
    }

    /// Read access for queries. Holding the guard blocks topology computation.
    pub fn read(&self) -> RwLockReadGuard<'_, Mesh<C>> {
        self.inner.read()
    }

    /// Take the mesh back if this is the last handle.
    pub fn try_into_inner(self) -> Result<Mesh<C>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<C: CellTemplate> From<Mesh<C>> for SharedMesh<C> {
    fn from(mesh: Mesh<C>) -> Self {
        Self::new(mesh)
    }
}
