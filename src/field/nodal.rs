//! Piecewise linear vector fields
use crate::{
    traits::{ContactMesh, DisplacementField},
    types::RealScalar,
};
use nalgebra::{Matrix3, Vector3};

/// A continuous piecewise linear vector field, defined by its values at the mesh vertices
#[derive(Debug, Clone)]
pub struct NodalDisplacement<'a, M: ContactMesh> {
    mesh: &'a M,
    value_size: usize,
    values: Vec<M::T>,
}

impl<'a, T: RealScalar, M: ContactMesh<T = T>> NodalDisplacement<'a, M> {
    /// Create a field from `value_size` values per vertex
    pub fn new(mesh: &'a M, value_size: usize, values: Vec<T>) -> Self {
        assert_eq!(
            values.len(),
            value_size * mesh.vertex_count(),
            "Field needs {value_size} values per vertex"
        );
        Self {
            mesh,
            value_size,
            values,
        }
    }

    /// Create a field that has the same value everywhere
    pub fn uniform(mesh: &'a M, value: &[T]) -> Self {
        let values = value.repeat(mesh.vertex_count());
        Self::new(mesh, value.len(), values)
    }

    /// Create a field by interpolating a function at the vertices
    ///
    /// `f` receives the coordinates of a vertex and writes the value into its second argument.
    pub fn from_fn(mesh: &'a M, value_size: usize, f: impl Fn(&[T], &mut [T])) -> Self {
        let mut values = vec![T::zero(); value_size * mesh.vertex_count()];
        for (v, value) in values.chunks_exact_mut(value_size).enumerate() {
            f(mesh.vertex(v), value);
        }
        Self::new(mesh, value_size, values)
    }

    /// The value at a vertex
    pub fn vertex_value(&self, vertex: usize) -> &[T] {
        &self.values[self.value_size * vertex..self.value_size * (vertex + 1)]
    }

    /// The values at all vertices
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Barycentric coordinates of `point` in `cell`, excluding the first
    ///
    /// If the mesh is embedded in a higher dimension, `point` is projected onto the cell.
    /// Returns `None` for degenerate cells.
    fn barycentric(&self, point: &[T], cell: usize) -> Option<[T; 3]> {
        let vertices = self.mesh.cell_vertices(cell);
        let n = vertices.len() - 1;
        let x0 = self.mesh.vertex(vertices[0]);
        let gdim = x0.len();
        let value = |x: T| x.to_f64().unwrap_or(f64::NAN);
        let edge = |k: usize, d: usize| value(self.mesh.vertex(vertices[k + 1])[d] - x0[d]);

        // Normal equations of the edge vectors, padded with the identity below 3D
        let a = Matrix3::from_fn(|i, j| {
            if i < n && j < n {
                (0..gdim).map(|d| edge(i, d) * edge(j, d)).sum::<f64>()
            } else if i == j {
                1.0
            } else {
                0.0
            }
        });
        let b = Vector3::from_fn(|i, _| {
            if i < n {
                (0..gdim)
                    .map(|d| edge(i, d) * value(point[d] - x0[d]))
                    .sum::<f64>()
            } else {
                0.0
            }
        });
        let l = a.lu().solve(&b)?;
        if !l.iter().all(|x| x.is_finite()) {
            return None;
        }
        Some([l[0], l[1], l[2]].map(|x| num::cast(x).unwrap_or_else(T::zero)))
    }
}

impl<T: RealScalar, M: ContactMesh<T = T>> DisplacementField for NodalDisplacement<'_, M> {
    type T = T;

    fn value_size(&self) -> usize {
        self.value_size
    }

    fn evaluate(&self, point: &[T], cell: usize, value: &mut [T]) {
        let vertices = self.mesh.cell_vertices(cell);
        if let Some(v) = vertices
            .iter()
            .find(|v| self.mesh.vertex(**v) == point)
        {
            value.copy_from_slice(self.vertex_value(*v));
            return;
        }

        let n = vertices.len() - 1;
        let weights = match self.barycentric(point, cell) {
            Some(l) => {
                let mut w = [T::zero(); 4];
                w[0] = T::one() - l[..n].iter().fold(T::zero(), |s, x| s + *x);
                w[1..=n].copy_from_slice(&l[..n]);
                w
            }
            None => {
                let average = T::one() / T::from(vertices.len()).unwrap_or_else(T::one);
                [average; 4]
            }
        };
        value.fill(T::zero());
        for (v, w) in vertices.iter().zip(weights) {
            for (a, b) in value.iter_mut().zip(self.vertex_value(*v)) {
                *a = *a + w * *b;
            }
        }
    }

    fn restrict(&self, cell: usize, coefficients: &mut Vec<T>) {
        coefficients.clear();
        for v in self.mesh.cell_vertices(cell) {
            coefficients.extend_from_slice(self.vertex_value(*v));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{mesh::SimplexMeshBuilder, shapes, traits::Builder};
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_field_is_exact() {
        let mesh = shapes::cuboid::<f64>(1.0, 1.0, 1.0, 2, 2, 2);
        let f = |x: &[f64], v: &mut [f64]| {
            v[0] = 1.0 + 2.0 * x[0] - x[2];
            v[1] = x[1];
            v[2] = 0.5;
        };
        let field = NodalDisplacement::from_fn(&mesh, 3, f);
        assert_eq!(field.value_size(), 3);

        let mut value = [0.0; 3];
        let mut expected = [0.0; 3];
        for cell in 0..mesh.cell_count() {
            let vertices = mesh.cell_vertices(cell);
            let mut centroid = [0.0; 3];
            for v in vertices {
                for (c, x) in centroid.iter_mut().zip(mesh.vertex(*v)) {
                    *c += x / 4.0;
                }
            }
            field.evaluate(&centroid, cell, &mut value);
            f(&centroid, &mut expected);
            for (a, b) in value.iter().zip(&expected) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_vertex_values_are_exact() {
        let mesh = shapes::rectangle::<f64>(1.0, 1.0, 1, 1);
        let field = NodalDisplacement::from_fn(&mesh, 2, |x, v| {
            v[0] = 0.1 * x[0];
            v[1] = 3.0;
        });
        let mut value = [0.0; 2];
        for cell in 0..mesh.cell_count() {
            for v in mesh.cell_vertices(cell) {
                field.evaluate(mesh.vertex(*v), cell, &mut value);
                assert_eq!(value, [0.1 * mesh.vertex(*v)[0], 3.0]);
            }
        }
    }

    #[test]
    fn test_restrict() {
        let mesh = shapes::rectangle::<f64>(1.0, 1.0, 1, 1);
        let field = NodalDisplacement::new(&mesh, 2, (0..8).map(|i| i as f64).collect());
        let mut coefficients = vec![];
        field.restrict(0, &mut coefficients);

        let expected = mesh
            .cell_vertices(0)
            .iter()
            .flat_map(|v| [2.0 * *v as f64, 2.0 * *v as f64 + 1.0])
            .collect::<Vec<_>>();
        assert_eq!(coefficients, expected);
    }

    #[test]
    fn test_uniform() {
        let mesh = shapes::rectangle::<f64>(1.0, 1.0, 2, 2);
        let field = NodalDisplacement::uniform(&mesh, &[0.0, 1.0]);
        let mut value = [0.0; 2];
        field.evaluate(&[0.3, 0.1], 0, &mut value);
        assert_relative_eq!(value[0], 0.0);
        assert_relative_eq!(value[1], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_degenerate_cell() {
        let mut b = SimplexMeshBuilder::<f64>::new(2, 2);
        b.add_point(0, &[0.0, 0.0]);
        b.add_point(1, &[1.0, 0.0]);
        b.add_point(2, &[2.0, 0.0]);
        b.add_cell(0, &[0, 1, 2]);
        let mesh = b.create_mesh();
        let field = NodalDisplacement::new(&mesh, 1, vec![0.0, 1.0, 2.0]);

        // The vertex values are averaged when a cell has no area
        let mut value = [0.0];
        field.evaluate(&[0.5, 0.0], 0, &mut value);
        assert_relative_eq!(value[0], 1.0);
    }
}
