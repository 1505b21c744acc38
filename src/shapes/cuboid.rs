//! Cuboid meshes

use crate::{
    mesh::{SimplexMesh, SimplexMeshBuilder},
    traits::Builder,
    types::RealScalar,
};

/// Create a tetrahedral mesh of the cuboid `[0, width] x [0, depth] x [0, height]`
///
/// The cuboid is split into `nx` by `ny` by `nz` boxes and each box into six tetrahedra.
pub fn cuboid<T: RealScalar>(
    width: T,
    depth: T,
    height: T,
    nx: usize,
    ny: usize,
    nz: usize,
) -> SimplexMesh<T> {
    let mut b = SimplexMeshBuilder::new_with_capacity(
        3,
        3,
        (nx + 1) * (ny + 1) * (nz + 1),
        6 * nx * ny * nz,
    );
    add_cuboid(
        &mut b,
        [T::zero(), T::zero(), T::zero()],
        [width, depth, height],
        [nx, ny, nz],
    );
    b.create_mesh()
}

/// Add a tetrahedral mesh of an axis-aligned cuboid to a builder
///
/// New points and cells get the ids following the points and cells already in the
/// builder, so several cuboids can be added to one mesh.
pub fn add_cuboid<T: RealScalar>(
    b: &mut SimplexMeshBuilder<T>,
    origin: [T; 3],
    size: [T; 3],
    divisions: [usize; 3],
) {
    assert_eq!(b.gdim(), 3);
    assert_eq!(b.tdim(), 3);
    let [nx, ny, nz] = divisions;
    let point_start = b.point_count();
    let cell_start = b.cell_count();
    for i in 0..nx + 1 {
        for j in 0..ny + 1 {
            for k in 0..nz + 1 {
                b.add_point(
                    point_start + (i * (ny + 1) + j) * (nz + 1) + k,
                    &[
                        origin[0] + size[0] * T::from(i).unwrap() / T::from(nx).unwrap(),
                        origin[1] + size[1] * T::from(j).unwrap() / T::from(ny).unwrap(),
                        origin[2] + size[2] * T::from(k).unwrap() / T::from(nz).unwrap(),
                    ],
                );
            }
        }
    }

    let mut cell = cell_start;
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let dx = (ny + 1) * (nz + 1);
                let dy = nz + 1;
                let dz = 1;
                let origin = point_start + i * dx + j * dy + k * dz;
                let opposite = origin + dx + dy + dz;
                for [first, second] in [
                    [dx, dx + dy],
                    [dy, dx + dy],
                    [dx, dx + dz],
                    [dz, dx + dz],
                    [dy, dy + dz],
                    [dz, dy + dz],
                ] {
                    b.add_cell(cell, &[origin, origin + first, origin + second, opposite]);
                    cell += 1;
                }
            }
        }
    }
}
