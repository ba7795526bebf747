//! Cell type metadata and the local decomposition of cells into sub-entities.
//!
//! # Local orderings
//! Cells reference their vertices in a standard ordering, and sub-entities are
//! produced in the following (type-defined, not sorted) order:
//!
//! - [`CellType::Interval`]: `(0,1)`
//! - [`CellType::Triangle`]: edges `(0,1),(1,2),(2,0)`
//! - [`CellType::Quadrilateral`]: vertices in cyclic order, edges
//!   `(0,1),(1,2),(2,3),(3,0)`
//! - [`CellType::Tetrahedron`]: edges `(0,1),(1,2),(2,0),(0,3),(1,3),(2,3)`,
//!   faces `(0,1,2),(0,1,3),(1,2,3),(0,2,3)`
//! - [`CellType::Hexahedron`]: `0..=3` the bottom face and `4..=7` the top face,
//!   both cyclic.
//!
//! Dimension `0` decomposes a cell into its vertices one by one and the top
//! dimension yields the cell itself.

use std::fmt;

/// Description of how a cell of the mesh's top dimension splits into local
/// sub-entities.
///
/// Implementations must be consistent: `decompose(d, v)` returns exactly
/// `local_count(d)` tuples of `local_vertex_count(d)` global vertex indices
/// each, taken from `v`. Violations are reported by the entity generator as
/// [`Inconsistency::TemplateMismatch`](crate::mesh_error::Inconsistency::TemplateMismatch).
pub trait CellTemplate {
    /// Topological dimension of the cell.
    fn dim(&self) -> usize;

    /// Number of local sub-entities of dimension `dim` per cell.
    fn local_count(&self, dim: usize) -> usize;

    /// Number of vertices of each local sub-entity of dimension `dim`.
    fn local_vertex_count(&self, dim: usize) -> usize;

    /// Split a cell, given by its global vertex indices, into the vertex tuples
    /// of its local sub-entities of dimension `dim`.
    fn decompose(&self, dim: usize, cell_vertices: &[usize]) -> Vec<Vec<usize>>;

    /// Number of vertices of the cell itself.
    fn num_vertices(&self) -> usize {
        self.local_vertex_count(self.dim())
    }
}

/// Standard cell types.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 1D segment.
    Interval,
    /// 2D simplex.
    Triangle,
    /// 2D tensor-product cell.
    Quadrilateral,
    /// 3D simplex.
    Tetrahedron,
    /// 3D tensor-product cell.
    Hexahedron,
}

const TRIANGLE_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 0]];

const QUADRILATERAL_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 3], &[3, 0]];

const TETRAHEDRON_EDGES: &[&[usize]] = &[&[0, 1], &[1, 2], &[2, 0], &[0, 3], &[1, 3], &[2, 3]];

const TETRAHEDRON_FACES: &[&[usize]] = &[&[0, 1, 2], &[0, 1, 3], &[1, 2, 3], &[0, 2, 3]];

const HEXAHEDRON_EDGES: &[&[usize]] = &[
    &[0, 1],
    &[1, 2],
    &[2, 3],
    &[3, 0],
    &[4, 5],
    &[5, 6],
    &[6, 7],
    &[7, 4],
    &[0, 4],
    &[1, 5],
    &[2, 6],
    &[3, 7],
];

const HEXAHEDRON_FACES: &[&[usize]] = &[
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

impl CellType {
    /// Local sub-entities strictly between vertices and the cell.
    fn interior_table(self, dim: usize) -> Option<&'static [&'static [usize]]> {
        match (self, dim) {
            (CellType::Triangle, 1) => Some(TRIANGLE_EDGES),
            (CellType::Quadrilateral, 1) => Some(QUADRILATERAL_EDGES),
            (CellType::Tetrahedron, 1) => Some(TETRAHEDRON_EDGES),
            (CellType::Tetrahedron, 2) => Some(TETRAHEDRON_FACES),
            (CellType::Hexahedron, 1) => Some(HEXAHEDRON_EDGES),
            (CellType::Hexahedron, 2) => Some(HEXAHEDRON_FACES),
            _ => None,
        }
    }

    fn vertex_count(self) -> usize {
        match self {
            CellType::Interval => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral => 4,
            CellType::Tetrahedron => 4,
            CellType::Hexahedron => 8,
        }
    }
}

impl CellTemplate for CellType {
    fn dim(&self) -> usize {
        match self {
            CellType::Interval => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron => 3,
        }
    }

    fn local_count(&self, dim: usize) -> usize {
        if dim == 0 {
            self.vertex_count()
        } else if dim == self.dim() {
            1
        } else {
            self.interior_table(dim).map_or(0, <[_]>::len)
        }
    }

    fn local_vertex_count(&self, dim: usize) -> usize {
        if dim == 0 {
            1
        } else if dim == self.dim() {
            self.vertex_count()
        } else {
            self.interior_table(dim)
                .and_then(|t| t.first())
                .map_or(0, |e| e.len())
        }
    }

    fn decompose(&self, dim: usize, cell_vertices: &[usize]) -> Vec<Vec<usize>> {
        if dim == 0 {
            return cell_vertices.iter().map(|&v| vec![v]).collect();
        }
        if dim == self.dim() {
            return vec![cell_vertices.to_vec()];
        }
        self.interior_table(dim)
            .unwrap_or(&[])
            .iter()
            .map(|local| {
                local
                    .iter()
                    .filter_map(|&i| cell_vertices.get(i).copied())
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Interval => "interval",
            CellType::Triangle => "triangle",
            CellType::Quadrilateral => "quadrilateral",
            CellType::Tetrahedron => "tetrahedron",
            CellType::Hexahedron => "hexahedron",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CellType; 5] = [
        CellType::Interval,
        CellType::Triangle,
        CellType::Quadrilateral,
        CellType::Tetrahedron,
        CellType::Hexahedron,
    ];

    #[test]
    fn counts_match_decomposition() {
        for ct in ALL {
            let verts: Vec<usize> = (10..10 + ct.num_vertices()).collect();
            for d in 0..=ct.dim() {
                let parts = ct.decompose(d, &verts);
                assert_eq!(parts.len(), ct.local_count(d), "{ct} dim {d}");
                for p in &parts {
                    assert_eq!(p.len(), ct.local_vertex_count(d), "{ct} dim {d}");
                }
            }
        }
    }

    #[test]
    fn euler_characteristic_of_single_cell() {
        // V - E + F - C over the closure of one cell is 1 for a ball.
        for ct in ALL {
            let chi: isize = (0..=ct.dim())
                .map(|d| {
                    let n = ct.local_count(d) as isize;
                    if d % 2 == 0 { n } else { -n }
                })
                .sum();
            assert_eq!(chi, 1, "{ct}");
        }
    }

    #[test]
    fn triangle_edges_use_global_indices() {
        let edges = CellType::Triangle.decompose(1, &[7, 3, 5]);
        assert_eq!(edges, vec![vec![7, 3], vec![3, 5], vec![5, 7]]);
    }

    #[test]
    fn dimension_above_cell_is_empty() {
        assert_eq!(CellType::Triangle.local_count(3), 0);
        assert!(CellType::Triangle.decompose(3, &[0, 1, 2]).is_empty());
    }

    #[test]
    fn serde_roundtrip_name() {
        let s = serde_json::to_string(&CellType::Hexahedron).unwrap();
        assert_eq!(s, "\"Hexahedron\"");
    }
}
