//! Mesh service
use crate::types::RealScalar;

/// The part of a mesh that contact resolution needs
///
/// Facets are the codimension-1 sub-entities of the cells. All indices are local to the
/// current process.
pub trait ContactMesh {
    /// Scalar type
    type T: RealScalar;

    /// Dimension of the topology of this mesh
    fn topology_dim(&self) -> usize;

    /// Dimension of the geometry of this mesh
    fn geometry_dim(&self) -> usize;

    /// Number of vertices
    fn vertex_count(&self) -> usize;

    /// Number of cells
    fn cell_count(&self) -> usize;

    /// Number of facets
    fn facet_count(&self) -> usize;

    /// The coordinates of a vertex
    fn vertex(&self, vertex: usize) -> &[Self::T];

    /// The vertices of a cell
    fn cell_vertices(&self, cell: usize) -> &[usize];

    /// The vertices of a facet
    fn facet_vertices(&self, facet: usize) -> &[usize];

    /// The cell that a facet belongs to
    ///
    /// If the facet is shared by two cells, this is the first of them.
    fn facet_cell(&self, facet: usize) -> usize;

    /// The local index of a facet within [ContactMesh::facet_cell]
    fn facet_local_index(&self, facet: usize) -> usize;

    /// Write the coordinates of the vertices of a cell into `coordinates`
    fn cell_coordinates(&self, cell: usize, coordinates: &mut Vec<Self::T>) {
        coordinates.clear();
        for v in self.cell_vertices(cell) {
            coordinates.extend_from_slice(self.vertex(*v));
        }
    }
}
