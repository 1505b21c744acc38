//! Traits

mod builder;
mod dofmap;
mod exchange;
mod field;
mod mesh;
mod spatial;

pub use builder::Builder;
pub use dofmap::DofMap;
pub use exchange::{Exchange, Payload};
pub use field::DisplacementField;
pub use mesh::ContactMesh;
pub use spatial::SpatialIndex;
