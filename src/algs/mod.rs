//! Topology computation algorithms.
//!
//! [`connectivity::compute_connectivity`] is the entry point for relations and
//! [`entities::compute_entities`] the one for entities; [`transpose`] and
//! [`intersection`] are the derivation steps the resolver combines.

pub mod connectivity;
pub mod entities;
pub mod intersection;
pub mod transpose;

pub use connectivity::compute_connectivity;
pub use entities::compute_entities;
pub use transpose::transposed;
