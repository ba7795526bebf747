#![allow(dead_code)]
use std::collections::{BTreeMap, BTreeSet};

use mesh_topology::mesh::Mesh;
use mesh_topology::topology::CellTemplate;

/// Unit square grid of `nx * ny` quads, each split along its (0,0)-(1,1) diagonal.
pub fn triangle_grid(nx: usize, ny: usize) -> Vec<[usize; 3]> {
    let v = |i: usize, j: usize| j * (nx + 1) + i;
    let mut cells = Vec::with_capacity(2 * nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            cells.push([v(i, j), v(i + 1, j), v(i + 1, j + 1)]);
            cells.push([v(i, j), v(i + 1, j + 1), v(i, j + 1)]);
        }
    }
    cells
}

/// `nx * ny` quads with vertices in cyclic order.
pub fn quad_grid(nx: usize, ny: usize) -> Vec<[usize; 4]> {
    let v = |i: usize, j: usize| j * (nx + 1) + i;
    let mut cells = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            cells.push([v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)]);
        }
    }
    cells
}

fn cube_vertex(n: usize) -> impl Fn(usize, usize, usize) -> usize {
    move |i, j, k| (k * (n + 1) + j) * (n + 1) + i
}

/// `n^3` hexahedra, bottom face then top face, both cyclic.
pub fn hex_grid(n: usize) -> Vec<[usize; 8]> {
    let v = cube_vertex(n);
    let mut cells = Vec::with_capacity(n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                cells.push([
                    v(i, j, k),
                    v(i + 1, j, k),
                    v(i + 1, j + 1, k),
                    v(i, j + 1, k),
                    v(i, j, k + 1),
                    v(i + 1, j, k + 1),
                    v(i + 1, j + 1, k + 1),
                    v(i, j + 1, k + 1),
                ]);
            }
        }
    }
    cells
}

/// `n^3` cubes, each split into the six Kuhn tetrahedra sharing its main diagonal.
pub fn tet_grid(n: usize) -> Vec<[usize; 4]> {
    const AXIS_ORDERS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let v = cube_vertex(n);
    let mut cells = Vec::with_capacity(6 * n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                for order in AXIS_ORDERS {
                    let mut p = [i, j, k];
                    let mut tet = [v(p[0], p[1], p[2]); 4];
                    for (step, &axis) in order.iter().enumerate() {
                        p[axis] += 1;
                        tet[step + 1] = v(p[0], p[1], p[2]);
                    }
                    cells.push(tet);
                }
            }
        }
    }
    cells
}

/// Sorted vertex set of every entity of dimension `d`.
pub fn vertex_keys<C: CellTemplate>(mesh: &Mesh<C>, d: usize) -> Vec<Vec<usize>> {
    if d == 0 {
        return (0..mesh.num_vertices()).map(|v| vec![v]).collect();
    }
    mesh.connectivity(d, 0)
        .expect("entities computed")
        .rows()
        .map(|r| {
            let mut k = r.to_vec();
            k.sort_unstable();
            k
        })
        .collect()
}

/// Relation `(d0, d1)` with both sides expressed by vertex sets, so meshes
/// that differ only in entity numbering compare equal.
pub fn relabeled<C: CellTemplate>(
    mesh: &Mesh<C>,
    d0: usize,
    d1: usize,
) -> BTreeMap<Vec<usize>, BTreeSet<Vec<usize>>> {
    let k0 = vertex_keys(mesh, d0);
    let k1 = vertex_keys(mesh, d1);
    let rel = mesh.connectivity(d0, d1).expect("relation computed");
    rel.rows()
        .enumerate()
        .map(|(e0, row)| {
            (
                k0[e0].clone(),
                row.iter().map(|&e1| k1[e1].clone()).collect(),
            )
        })
        .collect()
}

/// Assert `(d0, d1)` and `(d1, d0)` are mutual inverses.
pub fn assert_inverse<C: CellTemplate>(mesh: &Mesh<C>, d0: usize, d1: usize) {
    let fwd = mesh.connectivity(d0, d1).expect("forward relation");
    let bwd = mesh.connectivity(d1, d0).expect("backward relation");
    for (e0, row) in fwd.rows().enumerate() {
        for &e1 in row {
            assert!(
                bwd.row(e1).unwrap().contains(&e0),
                "{e1} lists no {e0} in {d1} - {d0}"
            );
        }
    }
    for (e1, row) in bwd.rows().enumerate() {
        for &e0 in row {
            assert!(
                fwd.row(e0).unwrap().contains(&e1),
                "{e0} lists no {e1} in {d0} - {d1}"
            );
        }
    }
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
