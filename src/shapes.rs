//! Functions to create simple example meshes

mod cuboid;
mod rectangle;

pub use cuboid::{add_cuboid, cuboid};
pub use rectangle::{add_rectangle, rectangle};
