//! Rectangle meshes

use crate::{
    mesh::{SimplexMesh, SimplexMeshBuilder},
    traits::Builder,
    types::RealScalar,
};

/// Create a triangle mesh of the rectangle `[0, width] x [0, height]`
///
/// The rectangle is split into `nx` by `ny` squares and each square into two triangles.
pub fn rectangle<T: RealScalar>(width: T, height: T, nx: usize, ny: usize) -> SimplexMesh<T> {
    let mut b = SimplexMeshBuilder::new_with_capacity(2, 2, (nx + 1) * (ny + 1), 2 * nx * ny);
    add_rectangle(&mut b, [T::zero(), T::zero()], [width, height], [nx, ny]);
    b.create_mesh()
}

/// Add a triangle mesh of an axis-aligned rectangle to a builder
///
/// New points and cells get the ids following the points and cells already in the
/// builder, so several rectangles can be added to one mesh.
pub fn add_rectangle<T: RealScalar>(
    b: &mut SimplexMeshBuilder<T>,
    origin: [T; 2],
    size: [T; 2],
    divisions: [usize; 2],
) {
    assert_eq!(b.gdim(), 2);
    assert_eq!(b.tdim(), 2);
    let [nx, ny] = divisions;
    let point_start = b.point_count();
    let cell_start = b.cell_count();
    for i in 0..nx + 1 {
        for j in 0..ny + 1 {
            b.add_point(
                point_start + i * (ny + 1) + j,
                &[
                    origin[0] + size[0] * T::from(i).unwrap() / T::from(nx).unwrap(),
                    origin[1] + size[1] * T::from(j).unwrap() / T::from(ny).unwrap(),
                ],
            );
        }
    }

    for i in 0..nx {
        for j in 0..ny {
            let dx = ny + 1;
            let dy = 1;
            let origin = point_start + i * dx + j * dy;
            let cell = cell_start + 2 * (j * nx + i);
            b.add_cell(cell, &[origin, origin + dx, origin + dx + dy]);
            b.add_cell(cell + 1, &[origin, origin + dx + dy, origin + dy]);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::ContactMesh;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle() {
        let mesh = rectangle::<f64>(2.0, 1.0, 2, 1);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.cell_count(), 4);
        assert_eq!(mesh.boundary_facets().len(), 6);
        assert_relative_eq!(mesh.vertex(5)[0], 2.0);
        assert_relative_eq!(mesh.vertex(5)[1], 1.0);
    }

    #[test]
    fn test_two_rectangles() {
        let mut b = SimplexMeshBuilder::<f64>::new(2, 2);
        add_rectangle(&mut b, [0.0, 0.0], [1.0, 1.0], [1, 1]);
        add_rectangle(&mut b, [0.0, 2.0], [1.0, 1.0], [2, 2]);
        let mesh = b.create_mesh();
        assert_eq!(mesh.vertex_count(), 4 + 9);
        assert_eq!(mesh.cell_count(), 2 + 8);
        assert_eq!(mesh.boundary_facets().len(), 4 + 8);
        assert_relative_eq!(mesh.vertex(4)[1], 2.0);
    }
}
