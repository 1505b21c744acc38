//! Nodal fields on simplex meshes
mod dofmap;
mod nodal;

pub use dofmap::NodalDofMap;
pub use nodal::NodalDisplacement;
