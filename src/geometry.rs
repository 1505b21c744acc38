//! Geometric primitives
mod bounding_box;
mod collision;
mod vector;

pub use bounding_box::BoundingBox;
pub use collision::{
    collides_edge_edge, collides_tetrahedron_tetrahedron, collides_triangle_triangle,
    tetrahedron_contains_point, triangle_contains_point,
};

use crate::types::RealScalar;

/// Absolute tolerance of all collision tests, in units of length
///
/// Two closed primitives collide if the distance between them is at most `CONTACT_EPS`.
/// Bounding boxes are inflated by the same amount, so touching configurations are
/// always classified the same way.
pub const CONTACT_EPS: f64 = 1e-10;

/// [CONTACT_EPS] as a value of type `T`
pub(crate) fn tolerance<T: RealScalar>() -> T {
    num::cast(CONTACT_EPS).unwrap_or_else(T::epsilon)
}
