//! DOF indexing service

pub trait DofMap {
    //! Numbering of the degrees of freedom of a function space

    /// The local DOFs of a cell
    fn cell_dofs(&self, cell: usize) -> &[usize];

    /// Convert a local DOF into its global index
    fn local_to_global(&self, dof: usize) -> usize;

    /// The largest number of DOFs on any cell
    fn max_dofs_per_cell(&self) -> usize;
}
