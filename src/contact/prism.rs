//! Swept volumes of facets
use crate::{
    error::{ContactError, Result},
    geometry::{
        collides_edge_edge, collides_triangle_triangle, tetrahedron_contains_point,
        triangle_contains_point, BoundingBox,
    },
    traits::{ContactMesh, DisplacementField},
    types::RealScalar,
};
use itertools::Itertools;

/// The triangles bounding a 3D prism
///
/// Prism vertices are ordered `[X0, X1, X2, x0, x1, x2]`, where `X` are the vertices of the
/// facet and `x` the displaced vertices.
pub const TRIANGLES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [0, 1, 3],
    [1, 4, 3],
    [1, 2, 4],
    [2, 5, 4],
    [2, 0, 5],
    [0, 3, 5],
    [3, 4, 5],
];

/// The edges bounding a 2D prism
///
/// Prism vertices are ordered `[X0, X1, x0, x1]`, so the edges run around the boundary of
/// the swept quadrilateral.
pub const EDGES: [[usize; 2]; 4] = [[0, 1], [1, 3], [3, 2], [2, 0]];

/// Number of bounding cells of one prism
pub const fn cells_per_facet(dim: usize) -> usize {
    4 * (dim - 1)
}

/// Number of vertices of one prism
pub const fn vertices_per_facet(dim: usize) -> usize {
    2 * dim
}

/// Number of coordinate values of one prism
pub const fn prism_stride(dim: usize) -> usize {
    vertices_per_facet(dim) * dim
}

/// A borrowed prism
///
/// This is a view into a flat coordinate buffer laid out as described in [TRIANGLES]
/// and [EDGES].
#[derive(Debug, Clone, Copy)]
pub struct Prism<'a, T: RealScalar> {
    dim: usize,
    coordinates: &'a [T],
}

impl<'a, T: RealScalar> Prism<'a, T> {
    /// Create a view of the coordinates of one prism
    pub fn new(dim: usize, coordinates: &'a [T]) -> Result<Self> {
        if dim != 2 && dim != 3 {
            return Err(ContactError::UnsupportedDimension(dim));
        }
        if coordinates.len() != prism_stride(dim) {
            return Err(ContactError::PrismLayout {
                len: coordinates.len(),
                expected: prism_stride(dim),
            });
        }
        Ok(Self { dim, coordinates })
    }

    /// Geometric dimension
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The coordinates of a vertex
    pub fn vertex(&self, index: usize) -> &'a [T] {
        &self.coordinates[index * self.dim..(index + 1) * self.dim]
    }

    /// The raw coordinates
    pub fn coordinates(&self) -> &'a [T] {
        self.coordinates
    }

    /// Bounding box of the prism
    pub fn bounding_box(&self) -> BoundingBox<T> {
        BoundingBox::from_points(self.coordinates, self.dim)
    }

    /// Bounding box of one bounding cell
    pub fn cell_bounding_box(&self, cell: usize) -> BoundingBox<T> {
        let mut b = BoundingBox::empty();
        if self.dim == 3 {
            for v in TRIANGLES[cell] {
                b.add_point(self.vertex(v));
            }
        } else {
            for v in EDGES[cell] {
                b.add_point(self.vertex(v));
            }
        }
        b
    }

    /// Check if a point lies in the convex hull of the prism
    pub fn contains_point(&self, point: &[T]) -> bool {
        if !self
            .bounding_box()
            .overlaps(&BoundingBox::from_points(point, self.dim))
        {
            return false;
        }
        // Every point of the hull lies in a simplex spanned by dim + 1 of the vertices
        (0..vertices_per_facet(self.dim))
            .combinations(self.dim + 1)
            .any(|s| {
                if self.dim == 3 {
                    tetrahedron_contains_point(
                        [s[0], s[1], s[2], s[3]].map(|v| self.vertex(v)),
                        point,
                    )
                } else {
                    triangle_contains_point([s[0], s[1], s[2]].map(|v| self.vertex(v)), point)
                }
            })
    }

    /// Check if two prisms collide
    ///
    /// Every pair of bounding cells is tested until the first hit. If no bounding cells
    /// touch, the prisms collide only if one lies inside the other.
    pub fn collides(&self, other: &Prism<'_, T>) -> bool {
        debug_assert_eq!(self.dim, other.dim);
        let boundaries = if self.dim == 3 {
            TRIANGLES.iter().any(|a| {
                let a = a.map(|v| self.vertex(v));
                TRIANGLES
                    .iter()
                    .any(|b| collides_triangle_triangle(a, b.map(|v| other.vertex(v))))
            })
        } else {
            EDGES.iter().any(|a| {
                let a = a.map(|v| self.vertex(v));
                EDGES
                    .iter()
                    .any(|b| collides_edge_edge(a, b.map(|v| other.vertex(v))))
            })
        };
        boundaries || self.contains_point(other.vertex(0)) || other.contains_point(self.vertex(0))
    }
}

/// The swept volumes of a set of facets
///
/// Each facet is swept along the displacement field into a prism. The prism of the
/// `i`th facet owns cells `i * cells_per_facet(dim)..(i + 1) * cells_per_facet(dim)`.
#[derive(Debug, Clone)]
pub struct SweptMesh<T: RealScalar> {
    dim: usize,
    facets: Vec<usize>,
    coordinates: Vec<T>,
    bounding_boxes: Vec<BoundingBox<T>>,
}

impl<T: RealScalar> SweptMesh<T> {
    /// Sweep `facets` of `mesh` along `field`
    pub fn new<M: ContactMesh<T = T>, F: DisplacementField<T = T>>(
        mesh: &M,
        field: &F,
        facets: &[usize],
    ) -> Result<Self> {
        let dim = mesh.topology_dim();
        if dim != 2 && dim != 3 {
            return Err(ContactError::UnsupportedDimension(dim));
        }
        if mesh.geometry_dim() != dim {
            return Err(ContactError::ManifoldMesh {
                tdim: dim,
                gdim: mesh.geometry_dim(),
            });
        }
        if field.value_size() != dim {
            return Err(ContactError::FieldValueSize {
                value_size: field.value_size(),
                gdim: dim,
            });
        }
        if facets.is_empty() {
            return Err(ContactError::EmptyFacetSet);
        }

        let mut coordinates = Vec::with_capacity(facets.len() * prism_stride(dim));
        let mut displaced = Vec::with_capacity(dim * dim);
        let mut value = vec![T::zero(); dim];
        for facet in facets {
            if *facet >= mesh.facet_count() {
                return Err(ContactError::FacetOutOfRange {
                    facet: *facet,
                    facet_count: mesh.facet_count(),
                });
            }
            let cell = mesh.facet_cell(*facet);
            let vertices = mesh.facet_vertices(*facet);
            if vertices.len() != dim {
                return Err(ContactError::NonSimplexFacet {
                    facet: *facet,
                    vertices: vertices.len(),
                    expected: dim,
                });
            }

            displaced.clear();
            for v in vertices {
                let x = mesh.vertex(*v);
                field.evaluate(x, cell, &mut value);
                coordinates.extend_from_slice(&x[..dim]);
                displaced.extend(x.iter().zip(&value).map(|(a, b)| *a + *b));
            }
            coordinates.extend_from_slice(&displaced);
        }

        Self::from_raw(dim, facets.to_vec(), coordinates)
    }

    /// A swept mesh with no prisms
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            facets: vec![],
            coordinates: vec![],
            bounding_boxes: vec![],
        }
    }

    /// Create a swept mesh from raw prism coordinates
    ///
    /// `coordinates` holds the prisms of `facets` one after another.
    pub fn from_raw(dim: usize, facets: Vec<usize>, coordinates: Vec<T>) -> Result<Self> {
        if dim != 2 && dim != 3 {
            return Err(ContactError::UnsupportedDimension(dim));
        }
        let stride = prism_stride(dim);
        if coordinates.len() != facets.len() * stride {
            return Err(ContactError::PrismLayout {
                len: coordinates.len(),
                expected: facets.len() * stride,
            });
        }
        let bounding_boxes = coordinates
            .chunks_exact(stride)
            .map(|c| BoundingBox::from_points(c, dim))
            .collect();
        Ok(Self {
            dim,
            facets,
            coordinates,
            bounding_boxes,
        })
    }

    /// Geometric dimension
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of prisms
    pub fn prism_count(&self) -> usize {
        self.facets.len()
    }

    /// Number of bounding cells of all prisms
    pub fn cell_count(&self) -> usize {
        self.facets.len() * cells_per_facet(self.dim)
    }

    /// Number of vertices of all prisms
    pub fn vertex_count(&self) -> usize {
        self.facets.len() * vertices_per_facet(self.dim)
    }

    /// Check if the mesh has no prisms
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// The mesh facet that a prism was swept from
    pub fn facet(&self, prism: usize) -> usize {
        self.facets[prism]
    }

    /// The mesh facets of all prisms
    pub fn facets(&self) -> &[usize] {
        &self.facets
    }

    /// The raw coordinates of a prism
    pub fn prism_coordinates(&self, prism: usize) -> &[T] {
        let stride = prism_stride(self.dim);
        &self.coordinates[prism * stride..(prism + 1) * stride]
    }

    /// A prism
    pub fn prism(&self, prism: usize) -> Prism<'_, T> {
        Prism {
            dim: self.dim,
            coordinates: self.prism_coordinates(prism),
        }
    }

    /// Iterate over all prisms
    pub fn prisms(&self) -> impl Iterator<Item = Prism<'_, T>> {
        let dim = self.dim;
        self.coordinates
            .chunks_exact(prism_stride(dim))
            .map(move |coordinates| Prism { dim, coordinates })
    }

    /// Bounding box of a prism
    pub fn prism_bounding_box(&self, prism: usize) -> &BoundingBox<T> {
        &self.bounding_boxes[prism]
    }

    /// Bounding box of a bounding cell
    pub fn cell_bounding_box(&self, cell: usize) -> BoundingBox<T> {
        let cpf = cells_per_facet(self.dim);
        self.prism(cell / cpf).cell_bounding_box(cell % cpf)
    }

    /// Bounding box of the whole mesh
    pub fn bounding_box(&self) -> BoundingBox<T> {
        let mut b = BoundingBox::empty();
        for p in &self.bounding_boxes {
            b.merge(p);
        }
        b
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{field::NodalDisplacement, shapes, traits::ContactMesh};
    use approx::assert_relative_eq;

    fn square() -> crate::mesh::SimplexMesh<f64> {
        shapes::rectangle(1.0, 1.0, 1, 1)
    }

    fn cube() -> crate::mesh::SimplexMesh<f64> {
        shapes::cuboid(1.0, 1.0, 1.0, 1, 1, 1)
    }

    macro_rules! make_tests {
        ($name:ident, $dim:expr) => {
            paste::item! {
                #[test]
                fn [< test_counts_ $name >]() {
                    //! Test the number of vertices and cells per prism
                    let mesh = $name();
                    let mut u = vec![0.0; $dim];
                    u[$dim - 1] = 0.5;
                    let field = NodalDisplacement::uniform(&mesh, &u);
                    let facets = mesh.boundary_facets();
                    let swept = SweptMesh::new(&mesh, &field, &facets).unwrap();

                    assert_eq!(swept.prism_count(), facets.len());
                    assert_eq!(swept.vertex_count(), facets.len() * 2 * $dim);
                    assert_eq!(swept.cell_count(), facets.len() * 4 * ($dim - 1));
                    assert_eq!(swept.prisms().count(), facets.len());
                }

                #[test]
                fn [< test_displaced_vertices_ $name >]() {
                    //! Test that the second half of each prism is the first half moved by the field
                    let mesh = $name();
                    let mut u = vec![0.0; $dim];
                    u[0] = 0.25;
                    let field = NodalDisplacement::uniform(&mesh, &u);
                    let facets = mesh.boundary_facets();
                    let swept = SweptMesh::new(&mesh, &field, &facets).unwrap();

                    for (prism, facet) in swept.prisms().zip(swept.facets()) {
                        for (i, v) in mesh.facet_vertices(*facet).iter().enumerate() {
                            let x = mesh.vertex(*v);
                            for d in 0..$dim {
                                assert_relative_eq!(prism.vertex(i)[d], x[d]);
                                assert_relative_eq!(prism.vertex(i + $dim)[d], x[d] + u[d]);
                            }
                        }
                    }
                }

                #[test]
                fn [< test_prism_self_collision_ $name >]() {
                    //! Test that every prism collides with itself
                    let mesh = $name();
                    let field = NodalDisplacement::uniform(&mesh, &vec![0.0; $dim]);
                    let swept = SweptMesh::new(&mesh, &field, &mesh.boundary_facets()).unwrap();
                    for p in swept.prisms() {
                        assert!(p.collides(&p));
                    }
                }
            }
        };
    }

    make_tests!(square, 2);
    make_tests!(cube, 3);

    #[test]
    fn test_invalid_input() {
        let mesh = square();
        let field = NodalDisplacement::uniform(&mesh, &[0.0, 0.0]);
        assert!(matches!(
            SweptMesh::new(&mesh, &field, &[]),
            Err(ContactError::EmptyFacetSet)
        ));
        assert!(matches!(
            SweptMesh::new(&mesh, &field, &[mesh.facet_count()]),
            Err(ContactError::FacetOutOfRange { .. })
        ));

        let field3 = NodalDisplacement::uniform(&mesh, &[0.0, 0.0, 0.0]);
        assert!(matches!(
            SweptMesh::new(&mesh, &field3, &[0]),
            Err(ContactError::FieldValueSize {
                value_size: 3,
                gdim: 2
            })
        ));
    }

    #[test]
    fn test_from_raw() {
        let coordinates = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let swept = SweptMesh::from_raw(2, vec![7], coordinates.clone()).unwrap();
        assert_eq!(swept.facet(0), 7);
        assert_eq!(swept.prism_coordinates(0), &coordinates[..]);
        assert_eq!(swept.bounding_box().to_flat(), [0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        assert_eq!(swept.cell_bounding_box(1).to_flat(), [1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);

        assert!(matches!(
            SweptMesh::from_raw(2, vec![7, 8], coordinates.clone()),
            Err(ContactError::PrismLayout {
                len: 8,
                expected: 16
            })
        ));
        assert!(matches!(
            Prism::new(4, &coordinates),
            Err(ContactError::UnsupportedDimension(4))
        ));
    }

    #[test]
    fn test_prism_inside_sweep() {
        // (0,0)-(1,0) moved up by 1, and a shorter segment at rest inside the swept quad
        let master = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let slave = [0.25, 0.5, 0.75, 0.5, 0.25, 0.5, 0.75, 0.5];
        let master = Prism::new(2, &master).unwrap();
        let slave = Prism::new(2, &slave).unwrap();
        assert!(master.contains_point(slave.vertex(0)));
        assert!(master.collides(&slave));
        assert!(slave.collides(&master));

        // A triangle at z = 0 moved up by 1, and a smaller triangle at rest at z = 0.5
        let master = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0,
        ];
        let slave = [
            0.1, 0.1, 0.5, 0.4, 0.1, 0.5, 0.1, 0.4, 0.5, //
            0.1, 0.1, 0.5, 0.4, 0.1, 0.5, 0.1, 0.4, 0.5,
        ];
        let master = Prism::new(3, &master).unwrap();
        let slave = Prism::new(3, &slave).unwrap();
        assert!(master.contains_point(slave.vertex(0)));
        assert!(master.collides(&slave));
        assert!(slave.collides(&master));

        // The same triangle above the swept volume
        let above = slave.coordinates().iter().enumerate().map(|(i, x)| {
            if i % 3 == 2 {
                x + 1.0
            } else {
                *x
            }
        });
        let above = above.collect::<Vec<_>>();
        let above = Prism::new(3, &above).unwrap();
        assert!(!master.collides(&above));
    }

    /// A mesh whose facets report the vertices of their whole cell
    struct CellFacetMesh(crate::mesh::SimplexMesh<f64>);

    impl ContactMesh for CellFacetMesh {
        type T = f64;
        fn topology_dim(&self) -> usize {
            self.0.topology_dim()
        }
        fn geometry_dim(&self) -> usize {
            self.0.geometry_dim()
        }
        fn vertex_count(&self) -> usize {
            self.0.vertex_count()
        }
        fn cell_count(&self) -> usize {
            self.0.cell_count()
        }
        fn facet_count(&self) -> usize {
            self.0.facet_count()
        }
        fn vertex(&self, vertex: usize) -> &[f64] {
            self.0.vertex(vertex)
        }
        fn cell_vertices(&self, cell: usize) -> &[usize] {
            self.0.cell_vertices(cell)
        }
        fn facet_vertices(&self, facet: usize) -> &[usize] {
            self.0.cell_vertices(self.0.facet_cell(facet))
        }
        fn facet_cell(&self, facet: usize) -> usize {
            self.0.facet_cell(facet)
        }
        fn facet_local_index(&self, facet: usize) -> usize {
            self.0.facet_local_index(facet)
        }
    }

    #[test]
    fn test_non_simplex_facet() {
        let mesh = CellFacetMesh(square());
        let field = NodalDisplacement::uniform(&mesh, &[0.0, 0.0]);
        assert!(matches!(
            SweptMesh::new(&mesh, &field, &[0]),
            Err(ContactError::NonSimplexFacet {
                facet: 0,
                vertices: 3,
                expected: 2
            })
        ));
    }
}
