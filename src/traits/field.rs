//! Displacement field
use crate::types::RealScalar;

/// A vector field that moves the surfaces
pub trait DisplacementField {
    /// Scalar type
    type T: RealScalar;

    /// Number of components of the field
    fn value_size(&self) -> usize;

    /// Evaluate the field at `point`, which lies in `cell`, and write the result into `value`
    fn evaluate(&self, point: &[Self::T], cell: usize, value: &mut [Self::T]);

    /// Write the expansion coefficients of the field on `cell` into `coefficients`
    fn restrict(&self, cell: usize, coefficients: &mut Vec<Self::T>);
}
