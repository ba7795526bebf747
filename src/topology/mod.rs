//! Top-level module for mesh topology storage.
//!
//! This module provides the data the computation routines in [`crate::algs`]
//! read and write:
//! - [`cell_type`]: the cell template contract and the standard cell types
//! - [`relation`]: compressed incidence rows for one dimension pair
//! - [`store`]: the per-mesh, append-only cache of counts and relations
//! - [`containment`]: vertex-set membership tests

pub mod cell_type;
pub mod containment;
pub mod relation;
pub mod store;

pub use cell_type::{CellTemplate, CellType};
pub use relation::Relation;
pub use store::TopologyStore;
