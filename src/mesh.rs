//! Simplex meshes
mod builder;
mod simplex;

pub use builder::SimplexMeshBuilder;
pub use simplex::SimplexMesh;
