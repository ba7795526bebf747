use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_topology::prelude::*;

fn tet_grid(n: usize) -> Vec<[usize; 4]> {
    const AXIS_ORDERS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let v = |i: usize, j: usize, k: usize| (k * (n + 1) + j) * (n + 1) + i;
    let mut cells = Vec::with_capacity(6 * n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                for order in AXIS_ORDERS {
                    let mut p = [i, j, k];
                    let mut tet = [v(i, j, k); 4];
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

fn triangle_grid(n: usize) -> Vec<[usize; 3]> {
    let v = |i: usize, j: usize| j * (n + 1) + i;
    let mut cells = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            cells.push([v(i, j), v(i + 1, j), v(i + 1, j + 1)]);
            cells.push([v(i, j), v(i + 1, j + 1), v(i, j + 1)]);
        }
    }
    cells
}

fn bench_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("entities");

    for &n in &[32usize, 64] {
        let cells = triangle_grid(n);
        group.bench_with_input(BenchmarkId::new("triangle_edges", n), &n, |b, _| {
            b.iter(|| {
                let mut mesh = Mesh::from_cells(CellType::Triangle, cells.iter()).unwrap();
                black_box(compute_entities(&mut mesh, 1).unwrap());
            });
        });
    }

    for &n in &[4usize, 8] {
        let cells = tet_grid(n);
        group.bench_with_input(BenchmarkId::new("tet_faces", n), &n, |b, _| {
            b.iter(|| {
                let mut mesh = Mesh::from_cells(CellType::Tetrahedron, cells.iter()).unwrap();
                black_box(compute_entities(&mut mesh, 2).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");

    for &n in &[4usize, 8] {
        let cells = tet_grid(n);
        for (d0, d1) in [(0, 0), (1, 2), (3, 3)] {
            group.bench_with_input(
                BenchmarkId::new(format!("tet_{d0}_{d1}"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        let mut mesh =
                            Mesh::from_cells(CellType::Tetrahedron, cells.iter()).unwrap();
                        compute_connectivity(&mut mesh, d0, d1).unwrap();
                        black_box(mesh.connectivity(d0, d1).map(Relation::num_connections));
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_entities, bench_connectivity);
criterion_main!(benches);
