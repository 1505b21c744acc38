//! Vector P1 DOF numbering
use crate::traits::{ContactMesh, DofMap};

/// DOF numbering of a vector field with `value_size` DOFs at each vertex
///
/// DOF `value_size * v + i` is component `i` at vertex `v`. If global vertex numbers are
/// given, global DOFs are numbered in the same way using the global vertex number.
#[derive(Debug, Clone)]
pub struct NodalDofMap {
    value_size: usize,
    cell_offsets: Vec<usize>,
    cell_dofs: Vec<usize>,
    global_vertices: Option<Vec<usize>>,
}

impl NodalDofMap {
    /// Create a DOF map in which local and global DOFs coincide
    pub fn new<M: ContactMesh>(mesh: &M, value_size: usize) -> Self {
        let mut cell_offsets = Vec::with_capacity(mesh.cell_count() + 1);
        let mut cell_dofs = vec![];
        cell_offsets.push(0);
        for cell in 0..mesh.cell_count() {
            for v in mesh.cell_vertices(cell) {
                cell_dofs.extend((0..value_size).map(|i| value_size * v + i));
            }
            cell_offsets.push(cell_dofs.len());
        }
        Self {
            value_size,
            cell_offsets,
            cell_dofs,
            global_vertices: None,
        }
    }

    /// Create a DOF map with the global number of each local vertex
    pub fn with_global_vertices<M: ContactMesh>(
        mesh: &M,
        value_size: usize,
        global_vertices: Vec<usize>,
    ) -> Self {
        assert_eq!(global_vertices.len(), mesh.vertex_count());
        Self {
            global_vertices: Some(global_vertices),
            ..Self::new(mesh, value_size)
        }
    }

    /// Number of DOFs at each vertex
    pub fn value_size(&self) -> usize {
        self.value_size
    }
}

impl DofMap for NodalDofMap {
    fn cell_dofs(&self, cell: usize) -> &[usize] {
        &self.cell_dofs[self.cell_offsets[cell]..self.cell_offsets[cell + 1]]
    }

    fn local_to_global(&self, dof: usize) -> usize {
        match &self.global_vertices {
            Some(g) => g[dof / self.value_size] * self.value_size + dof % self.value_size,
            None => dof,
        }
    }

    fn max_dofs_per_cell(&self) -> usize {
        self.cell_offsets
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }
}
