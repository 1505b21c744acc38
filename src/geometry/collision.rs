//! Collision tests for closed simplices
//!
//! Two primitives collide if the distance between them is at most [CONTACT_EPS](super::CONTACT_EPS).
//! Degenerate primitives are treated as the lower-dimensional sets they span.
use super::{
    tolerance,
    vector::{add, clamp01, cross, dot, norm, norm_squared, point, scale, sub, Vec3},
};
use crate::types::RealScalar;

/// Faces of a tetrahedron, face `i` is opposite vertex `i`
const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// Check if two segments collide
///
/// The segments may be embedded in 2D or 3D.
pub fn collides_edge_edge<T: RealScalar>(a: [&[T]; 2], b: [&[T]; 2]) -> bool {
    let eps = tolerance::<T>();
    let [a0, a1] = a.map(point);
    let [b0, b1] = b.map(point);
    segment_segment_distance_squared(a0, a1, b0, b1) <= eps * eps
        || segment_segment_distance_squared(b0, b1, a0, a1) <= eps * eps
}

/// Check if two triangles in 3D collide
pub fn collides_triangle_triangle<T: RealScalar>(a: [&[T]; 3], b: [&[T]; 3]) -> bool {
    let a = a.map(point);
    let b = b.map(point);
    triangles_collide(&a, &b)
}

/// Check if two tetrahedra collide
pub fn collides_tetrahedron_tetrahedron<T: RealScalar>(a: [&[T]; 4], b: [&[T]; 4]) -> bool {
    let a = a.map(point);
    let b = b.map(point);
    for fa in TETRAHEDRON_FACES {
        let ta = fa.map(|i| a[i]);
        for fb in TETRAHEDRON_FACES {
            if triangles_collide(&ta, &fb.map(|i| b[i])) {
                return true;
            }
        }
    }
    // No boundaries touch, so either one contains the other or they are disjoint
    point_in_tetrahedron(a[0], &b) || point_in_tetrahedron(b[0], &a)
}

/// Check if a point lies in a triangle, up to [CONTACT_EPS](super::CONTACT_EPS)
///
/// The point is assumed to lie in the plane of the triangle. Degenerate triangles contain
/// nothing.
pub fn triangle_contains_point<T: RealScalar>(t: [&[T]; 3], p: &[T]) -> bool {
    point_in_triangle(point(p), &t.map(point))
}

/// Check if a point lies in a tetrahedron, up to [CONTACT_EPS](super::CONTACT_EPS)
///
/// Degenerate tetrahedra contain nothing.
pub fn tetrahedron_contains_point<T: RealScalar>(t: [&[T]; 4], p: &[T]) -> bool {
    point_in_tetrahedron(point(p), &t.map(point))
}

fn triangles_collide<T: RealScalar>(a: &[Vec3<T>; 3], b: &[Vec3<T>; 3]) -> bool {
    (0..3).any(|i| segment_hits_triangle(a[i], a[(i + 1) % 3], b))
        || (0..3).any(|i| segment_hits_triangle(b[i], b[(i + 1) % 3], a))
}

/// The squared distance between segments `p1q1` and `p2q2`
///
/// Ericson, Real-Time Collision Detection, section 5.1.9.
fn segment_segment_distance_squared<T: RealScalar>(
    p1: Vec3<T>,
    q1: Vec3<T>,
    p2: Vec3<T>,
    q2: Vec3<T>,
) -> T {
    let eps = tolerance::<T>();
    let small = eps * eps;
    let d1 = sub(q1, p1);
    let d2 = sub(q2, p2);
    let r = sub(p1, p2);
    let a = norm_squared(d1);
    let e = norm_squared(d2);
    let f = dot(d2, r);

    let (s, t) = if a <= small && e <= small {
        (T::zero(), T::zero())
    } else if a <= small {
        (T::zero(), clamp01(f / e))
    } else {
        let c = dot(d1, r);
        if e <= small {
            (clamp01(-c / a), T::zero())
        } else {
            let b = dot(d1, d2);
            let denom = a * e - b * b;
            let s = if denom > T::zero() {
                clamp01((b * f - c * e) / denom)
            } else {
                T::zero()
            };
            let t = (b * s + f) / e;
            if t < T::zero() {
                (clamp01(-c / a), T::zero())
            } else if t > T::one() {
                (clamp01((b - c) / a), T::one())
            } else {
                (s, t)
            }
        }
    };
    let c1 = add(p1, scale(d1, s));
    let c2 = add(p2, scale(d2, t));
    norm_squared(sub(c1, c2))
}

fn point_segment_distance_squared<T: RealScalar>(p: Vec3<T>, a: Vec3<T>, b: Vec3<T>) -> T {
    let ab = sub(b, a);
    let len2 = norm_squared(ab);
    let t = if len2 > T::zero() {
        clamp01(dot(sub(p, a), ab) / len2)
    } else {
        T::zero()
    };
    norm_squared(sub(p, add(a, scale(ab, t))))
}

/// The unit normal of a triangle, or `None` if the triangle is degenerate
fn triangle_normal<T: RealScalar>(t: &[Vec3<T>; 3]) -> Option<Vec3<T>> {
    let n = cross(sub(t[1], t[0]), sub(t[2], t[0]));
    let longest = (0..3)
        .map(|i| norm(sub(t[(i + 1) % 3], t[i])))
        .fold(T::zero(), T::max);
    let length = norm(n);
    if length <= tolerance::<T>() * longest || length == T::zero() {
        None
    } else {
        Some(scale(n, T::one() / length))
    }
}

/// The closest point to `p` on a non-degenerate triangle
///
/// Ericson, Real-Time Collision Detection, section 5.1.5.
fn closest_point_on_triangle<T: RealScalar>(p: Vec3<T>, t: &[Vec3<T>; 3]) -> Vec3<T> {
    let [a, b, c] = *t;
    let ab = sub(b, a);
    let ac = sub(c, a);

    let ap = sub(p, a);
    let d1 = dot(ab, ap);
    let d2 = dot(ac, ap);
    if d1 <= T::zero() && d2 <= T::zero() {
        return a;
    }

    let bp = sub(p, b);
    let d3 = dot(ab, bp);
    let d4 = dot(ac, bp);
    if d3 >= T::zero() && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= T::zero() && d1 >= T::zero() && d3 <= T::zero() {
        return add(a, scale(ab, d1 / (d1 - d3)));
    }

    let cp = sub(p, c);
    let d5 = dot(ab, cp);
    let d6 = dot(ac, cp);
    if d6 >= T::zero() && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= T::zero() && d2 >= T::zero() && d6 <= T::zero() {
        return add(a, scale(ac, d2 / (d2 - d6)));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= T::zero() && d4 - d3 >= T::zero() && d5 - d6 >= T::zero() {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return add(b, scale(sub(c, b), w));
    }

    let denom = T::one() / (va + vb + vc);
    add(add(a, scale(ab, vb * denom)), scale(ac, vc * denom))
}

fn point_triangle_distance_squared<T: RealScalar>(p: Vec3<T>, t: &[Vec3<T>; 3]) -> T {
    match triangle_normal(t) {
        Some(_) => norm_squared(sub(p, closest_point_on_triangle(p, t))),
        None => (0..3)
            .map(|i| point_segment_distance_squared(p, t[i], t[(i + 1) % 3]))
            .fold(T::infinity(), T::min),
    }
}

/// Check if the segment `pq` is within tolerance of a triangle
fn segment_hits_triangle<T: RealScalar>(p: Vec3<T>, q: Vec3<T>, t: &[Vec3<T>; 3]) -> bool {
    let eps = tolerance::<T>();
    let eps2 = eps * eps;

    if let Some(n) = triangle_normal(t) {
        let dp = dot(n, sub(p, t[0]));
        let dq = dot(n, sub(q, t[0]));
        if (dp > eps && dq > eps) || (dp < -eps && dq < -eps) {
            return false;
        }
        if dp != dq {
            let x = add(p, scale(sub(q, p), clamp01(dp / (dp - dq))));
            if norm_squared(sub(x, closest_point_on_triangle(x, t))) <= eps2 {
                return true;
            }
        }
    }

    point_triangle_distance_squared(p, t) <= eps2
        || point_triangle_distance_squared(q, t) <= eps2
        || (0..3).any(|i| segment_segment_distance_squared(p, q, t[i], t[(i + 1) % 3]) <= eps2)
}

/// Check if a point is inside a tetrahedron
///
/// Degenerate tetrahedra contain nothing; their faces are tested separately.
fn point_in_triangle<T: RealScalar>(p: Vec3<T>, t: &[Vec3<T>; 3]) -> bool {
    let eps = tolerance::<T>();
    let Some(n) = triangle_normal(t) else {
        return false;
    };
    for i in 0..3 {
        let (a, b) = (t[(i + 1) % 3], t[(i + 2) % 3]);
        let length = norm(sub(b, a));
        if length == T::zero() {
            return false;
        }
        // In-plane normal of the edge opposite vertex i
        let mut m = scale(cross(sub(b, a), n), T::one() / length);
        let height = dot(m, sub(t[i], a));
        if height.abs() <= eps {
            return false;
        }
        if height < T::zero() {
            m = scale(m, -T::one());
        }
        if dot(m, sub(p, a)) < -eps {
            return false;
        }
    }
    true
}

fn point_in_tetrahedron<T: RealScalar>(p: Vec3<T>, tet: &[Vec3<T>; 4]) -> bool {
    let eps = tolerance::<T>();
    for (i, face) in TETRAHEDRON_FACES.iter().enumerate() {
        let f = face.map(|j| tet[j]);
        let Some(mut n) = triangle_normal(&f) else {
            return false;
        };
        let height = dot(n, sub(tet[i], f[0]));
        if height.abs() <= eps {
            return false;
        }
        if height < T::zero() {
            n = scale(n, -T::one());
        }
        if dot(n, sub(p, f[0])) < -eps {
            return false;
        }
    }
    true
}
