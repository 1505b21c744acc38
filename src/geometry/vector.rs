//! Small fixed-size vector arithmetic
use crate::types::RealScalar;

/// A point or vector, padded with zeros in 2D
pub(crate) type Vec3<T> = [T; 3];

/// Convert a coordinate slice of length at most 3 into a padded point
pub(crate) fn point<T: RealScalar>(coords: &[T]) -> Vec3<T> {
    let mut p = [T::zero(); 3];
    for (a, b) in p.iter_mut().zip(coords) {
        *a = *b;
    }
    p
}

pub(crate) fn sub<T: RealScalar>(a: Vec3<T>, b: Vec3<T>) -> Vec3<T> {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn add<T: RealScalar>(a: Vec3<T>, b: Vec3<T>) -> Vec3<T> {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub(crate) fn scale<T: RealScalar>(a: Vec3<T>, s: T) -> Vec3<T> {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub(crate) fn dot<T: RealScalar>(a: Vec3<T>, b: Vec3<T>) -> T {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross<T: RealScalar>(a: Vec3<T>, b: Vec3<T>) -> Vec3<T> {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm_squared<T: RealScalar>(a: Vec3<T>) -> T {
    dot(a, a)
}

pub(crate) fn norm<T: RealScalar>(a: Vec3<T>) -> T {
    dot(a, a).sqrt()
}

pub(crate) fn clamp01<T: RealScalar>(t: T) -> T {
    t.max(T::zero()).min(T::one())
}
