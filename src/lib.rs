#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-topology
//!
//! mesh-topology derives the full topology of an unstructured mesh from its
//! minimal description, the vertices of every cell. Entities of every
//! dimension between vertices and cells (edges, faces, …) and the incidence
//! relation between any two dimensions are computed lazily, on first request,
//! and cached per mesh.
//!
//! ## Features
//! - Entity generation with duplicates across cells collapsed to a single global entity
//! - Relations between any pair of dimensions, derived by transpose or intersection
//! - Compute-once, append-only topology store with invariant validation
//! - Thread-safe shared meshes with a single topology writer
//!
//! ## Usage
//!
//! ```rust
//! # fn try_main() -> Result<(), mesh_topology::mesh_error::MeshTopologyError> {
//! use mesh_topology::prelude::*;
//!
//! let mut mesh = Mesh::new(CellType::Triangle, 4, [[0, 1, 2], [1, 2, 3]])?;
//! assert_eq!(compute_entities(&mut mesh, 1)?, 5);
//! compute_connectivity(&mut mesh, 0, 2)?;
//! assert_eq!(mesh.connectivity(0, 2).unwrap().row(1), Some(&[0, 1][..]));
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```
//!
//! ## Determinism
//!
//! Entity indices follow first discovery while visiting cells in index order,
//! so repeated runs on the same cell ordering give identical stores. Callers
//! should not rely on the indices for anything else.
//!
//! ## Cargo features
//! - `rayon`: validate per-dimension invariants in parallel.
//! - `check-invariants`: keep [`debug_invariants!`] checks in release builds.

pub mod algs;
pub mod debug_invariants;
pub mod mesh;
pub mod mesh_error;
pub mod shared;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::connectivity::compute_connectivity;
    pub use crate::algs::entities::compute_entities;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh::{Mesh, MeshEntity};
    pub use crate::mesh_error::{Inconsistency, MeshTopologyError};
    pub use crate::shared::SharedMesh;
    pub use crate::topology::cell_type::{CellTemplate, CellType};
    pub use crate::topology::relation::Relation;
    pub use crate::topology::store::TopologyStore;
}
