//! Mesh builder
use crate::{traits::ContactMesh, types::RealScalar};

pub trait Builder {
    //! Object that can be used to build a mesh

    /// The type of the mesh that the builder creates
    type Mesh: ContactMesh<T = Self::T>;
    /// The floating point type used for coordinates
    type T: RealScalar;
    /// The type of the data that is input to add a cell
    type CellData<'a>;

    /// Add a point to the mesh
    fn add_point(&mut self, id: usize, data: &[Self::T]);

    /// Add a cell to the mesh
    fn add_cell(&mut self, id: usize, cell_data: Self::CellData<'_>);

    /// Number of points added so far
    fn point_count(&self) -> usize;

    /// Number of cells added so far
    fn cell_count(&self) -> usize;

    /// The id of each point, in insertion order
    fn point_indices_to_ids(&self) -> &[usize];

    /// The id of each cell, in insertion order
    fn cell_indices_to_ids(&self) -> &[usize];

    /// Create the mesh
    fn create_mesh(&self) -> Self::Mesh;
}
