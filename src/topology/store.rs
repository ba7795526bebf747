//! Per-mesh topology cache: entity counts per dimension and relations per
//! ordered dimension pair.
//!
//! The store is append-only. A dimension's count and a pair's relation are
//! each written once and never changed afterwards; the computation routines in
//! [`crate::algs`] are the only writers.

use std::fmt;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::{Inconsistency, MeshTopologyError};
use crate::topology::containment::sorted_key;
use crate::topology::relation::Relation;

/// Entity counts and incidence relations of a mesh of topological dimension `dim`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawStore")]
pub struct TopologyStore {
    dim: usize,
    /// `sizes[d]` = number of entities of dimension `d`.
    sizes: Vec<usize>,
    /// Row-major `(dim + 1) x (dim + 1)` table of relations.
    relations: Vec<Relation>,
}

impl TopologyStore {
    /// Empty store for a mesh of topological dimension `dim`.
    pub fn new(dim: usize) -> Self {
        let n = dim + 1;
        Self {
            dim,
            sizes: vec![0; n],
            relations: vec![Relation::new(); n * n],
        }
    }

    /// Topological dimension of the mesh.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of entities of dimension `d`; zero if not computed or out of range.
    #[inline]
    pub fn size(&self, d: usize) -> usize {
        self.sizes.get(d).copied().unwrap_or(0)
    }

    /// Relation `(d0, d1)`, populated or not. `None` only if out of range.
    #[inline]
    pub fn relation(&self, d0: usize, d1: usize) -> Option<&Relation> {
        self.slot(d0, d1).and_then(|i| self.relations.get(i))
    }

    /// Relation `(d0, d1)` if it has been computed.
    #[inline]
    pub fn connectivity(&self, d0: usize, d1: usize) -> Option<&Relation> {
        self.relation(d0, d1).filter(|r| !r.is_empty())
    }

    /// `true` once relation `(d0, d1)` has been populated.
    #[inline]
    pub fn has_connectivity(&self, d0: usize, d1: usize) -> bool {
        self.connectivity(d0, d1).is_some()
    }

    /// Computed relation `(d0, d1)`, or a [`Inconsistency::MissingRelation`] error.
    pub fn require(&self, d0: usize, d1: usize) -> Result<&Relation, MeshTopologyError> {
        self.connectivity(d0, d1).ok_or(MeshTopologyError::inconsistency(
            d0,
            Inconsistency::MissingRelation { d0, d1 },
        ))
    }

    /// Every ordered pair whose relation has been computed.
    pub fn computed_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.dim + 1;
        (0..n * n)
            .map(move |i| (i / n, i % n))
            .filter(|&(d0, d1)| self.has_connectivity(d0, d1))
    }

    /// Record the number of entities of dimension `d`. Only valid once.
    pub(crate) fn init_size(&mut self, d: usize, count: usize) -> Result<(), MeshTopologyError> {
        self.check_dim(d)?;
        if self.sizes[d] != 0 {
            return Err(MeshTopologyError::inconsistency(
                d,
                Inconsistency::SizeAlreadySet,
            ));
        }
        self.sizes[d] = count;
        Ok(())
    }

    /// Store relation `(d0, d1)`. Fails if it was already populated.
    pub(crate) fn set_relation(
        &mut self,
        d0: usize,
        d1: usize,
        relation: Relation,
    ) -> Result<(), MeshTopologyError> {
        self.check_dim(d0)?;
        self.check_dim(d1)?;
        let i = d0 * (self.dim + 1) + d1;
        if !self.relations[i].is_empty() {
            return Err(MeshTopologyError::inconsistency(
                d0,
                Inconsistency::RelationAlreadySet { d0, d1 },
            ));
        }
        log::debug!(
            "connectivity {d0} - {d1}: {} rows, {} connections",
            relation.num_rows(),
            relation.num_connections()
        );
        self.relations[i] = relation;
        Ok(())
    }

    /// Reject dimensions above the mesh dimension.
    pub fn check_dim(&self, d: usize) -> Result<(), MeshTopologyError> {
        if d > self.dim {
            return Err(MeshTopologyError::DimensionOutOfRange {
                dim: d,
                top: self.dim,
            });
        }
        Ok(())
    }

    #[inline]
    fn slot(&self, d0: usize, d1: usize) -> Option<usize> {
        (d0 <= self.dim && d1 <= self.dim).then(|| d0 * (self.dim + 1) + d1)
    }

    /// Counts must agree with the cell→entity and entity→vertex relations.
    fn check_sizes(&self) -> Result<(), MeshTopologyError> {
        let top = self.dim;
        for d in 0..=top {
            let n = self.size(d);
            let ce = self.has_connectivity(top, d);
            let ev = self.has_connectivity(d, 0);
            // Vertices are given, so (0,0) is never implied by the count.
            let ev = ev || d == 0;
            if n > 0 && d != top && !ce && self.size(top) > 0 {
                return Err(MeshTopologyError::inconsistency(
                    d,
                    Inconsistency::EntitiesWithoutConnectivity,
                ));
            }
            if n > 0 && !ev {
                return Err(MeshTopologyError::inconsistency(
                    d,
                    Inconsistency::EntitiesWithoutConnectivity,
                ));
            }
            if n == 0 && ((ce && d != top) || (self.has_connectivity(d, 0) && d != 0)) {
                return Err(MeshTopologyError::inconsistency(
                    d,
                    Inconsistency::ConnectivityWithoutEntities,
                ));
            }
        }
        Ok(())
    }

    fn check_bounds(&self) -> Result<(), MeshTopologyError> {
        for (d0, d1) in self.computed_pairs() {
            let rel = self.require(d0, d1)?;
            if rel.num_rows() != self.size(d0) {
                return Err(MeshTopologyError::inconsistency(
                    d0,
                    Inconsistency::RowCountMismatch {
                        d0,
                        d1,
                        expected: self.size(d0),
                        found: rel.num_rows(),
                    },
                ));
            }
            if let Some(index) = rel.max_target().filter(|&m| m >= self.size(d1)) {
                return Err(MeshTopologyError::inconsistency(
                    d0,
                    Inconsistency::IndexOutOfBounds { d0, d1, index },
                ));
            }
        }
        Ok(())
    }

    /// No two entities of a dimension may share a vertex set.
    fn check_unique(&self, d: usize) -> Result<(), MeshTopologyError> {
        let Some(ev) = self.connectivity(d, 0) else {
            return Ok(());
        };
        if d == 0 {
            return Ok(());
        }
        let mut seen = hashbrown::HashMap::with_capacity(ev.num_rows());
        for (i, verts) in ev.rows().enumerate() {
            if let Some(first) = seen.insert(sorted_key(verts), i) {
                return Err(MeshTopologyError::inconsistency(
                    d,
                    Inconsistency::DuplicateEntity { first, second: i },
                ));
            }
        }
        Ok(())
    }

    /// Computed pairs in both directions must be mutual inverses.
    fn check_inverse(&self, d0: usize, d1: usize) -> Result<(), MeshTopologyError> {
        let (Some(fwd), Some(bwd)) = (self.connectivity(d0, d1), self.connectivity(d1, d0)) else {
            return Ok(());
        };
        let mismatch = || {
            MeshTopologyError::inconsistency(d0, Inconsistency::InverseMismatch { d0, d1 })
        };
        if fwd.num_connections() != bwd.num_connections() {
            return Err(mismatch());
        }
        for (e0, row) in fwd.rows().enumerate() {
            for &e1 in row {
                let back = bwd.row(e1).ok_or_else(mismatch)?;
                if !back.contains(&e0) {
                    return Err(mismatch());
                }
            }
        }
        Ok(())
    }
}

/// Wire form of [`TopologyStore`]; table shapes are checked on decode.
#[derive(serde::Deserialize)]
struct RawStore {
    dim: usize,
    sizes: Vec<usize>,
    relations: Vec<Relation>,
}

impl TryFrom<RawStore> for TopologyStore {
    type Error = MeshTopologyError;

    fn try_from(raw: RawStore) -> Result<Self, Self::Error> {
        let n = raw.dim.checked_add(1);
        let pairs = n.and_then(|n| n.checked_mul(n));
        if n != Some(raw.sizes.len()) || pairs != Some(raw.relations.len()) {
            return Err(MeshTopologyError::MalformedSnapshot {
                reason: format!(
                    "store of dimension {} has {} sizes and {} relations",
                    raw.dim,
                    raw.sizes.len(),
                    raw.relations.len()
                ),
            });
        }
        Ok(Self {
            dim: raw.dim,
            sizes: raw.sizes,
            relations: raw.relations,
        })
    }
}

impl DebugInvariants for TopologyStore {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TopologyStore");
    }

    fn validate_invariants(&self) -> Result<(), MeshTopologyError> {
        self.check_sizes()?;
        self.check_bounds()?;

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            (0..=self.dim)
                .into_par_iter()
                .try_for_each(|d| self.check_unique(d))?;
        }
        #[cfg(not(feature = "rayon"))]
        for d in 0..=self.dim {
            self.check_unique(d)?;
        }

        for d0 in 0..=self.dim {
            for d1 in d0 + 1..=self.dim {
                self.check_inverse(d0, d1)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TopologyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "topology of dimension {}", self.dim)?;
        for d in 0..=self.dim {
            writeln!(f, "  entities of dimension {d}: {}", self.size(d))?;
        }
        for d0 in 0..=self.dim {
            let row: String = (0..=self.dim)
                .map(|d1| if self.has_connectivity(d0, d1) { 'x' } else { '-' })
                .collect();
            writeln!(f, "  {d0}: {row}")?;
        }
        Ok(())
    }
}
