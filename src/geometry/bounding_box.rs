//! Axis-aligned bounding boxes
use super::tolerance;
use crate::types::RealScalar;

/// Axis-aligned bounding box in up to three dimensions
///
/// Unused dimensions have zero extent. A box that contains no points is empty and
/// overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<T: RealScalar> {
    min: [T; 3],
    max: [T; 3],
}

impl<T: RealScalar> Default for BoundingBox<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: RealScalar> BoundingBox<T> {
    /// Number of values in the flat representation
    pub const FLAT_SIZE: usize = 6;

    /// Create an empty box
    pub fn empty() -> Self {
        Self {
            min: [T::infinity(); 3],
            max: [T::neg_infinity(); 3],
        }
    }

    /// Create the bounding box of a flat list of points with `gdim` coordinates each
    pub fn from_points(coordinates: &[T], gdim: usize) -> Self {
        let mut b = Self::empty();
        for p in coordinates.chunks_exact(gdim) {
            b.add_point(p);
        }
        b
    }

    /// Grow the box to contain a point
    pub fn add_point(&mut self, point: &[T]) {
        for d in 0..3 {
            let x = point.get(d).copied().unwrap_or_else(T::zero);
            self.min[d] = self.min[d].min(x);
            self.max[d] = self.max[d].max(x);
        }
    }

    /// Grow the box to contain another box
    pub fn merge(&mut self, other: &Self) {
        for d in 0..3 {
            self.min[d] = self.min[d].min(other.min[d]);
            self.max[d] = self.max[d].max(other.max[d]);
        }
    }

    /// Lower corner
    pub fn min(&self) -> &[T; 3] {
        &self.min
    }

    /// Upper corner
    pub fn max(&self) -> &[T; 3] {
        &self.max
    }

    /// Check if the box contains no points
    pub fn is_empty(&self) -> bool {
        (0..3).any(|d| self.min[d] > self.max[d])
    }

    /// Check if two boxes, each inflated by the contact tolerance, intersect
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let eps = tolerance::<T>();
        (0..3).all(|d| self.min[d] - eps <= other.max[d] && other.min[d] - eps <= self.max[d])
    }

    /// Flatten as `[min_x, min_y, min_z, max_x, max_y, max_z]`
    pub fn to_flat(&self) -> [T; 6] {
        [
            self.min[0],
            self.min[1],
            self.min[2],
            self.max[0],
            self.max[1],
            self.max[2],
        ]
    }

    /// Create from the representation returned by [BoundingBox::to_flat]
    pub fn from_flat(data: &[T; 6]) -> Self {
        Self {
            min: [data[0], data[1], data[2]],
            max: [data[3], data[4], data[5]],
        }
    }
}
