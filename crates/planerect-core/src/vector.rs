//! 3D vector helpers used by every reconstruction step.
//!
//! All functions take their arguments by value and return new values.

use nalgebra::Vector3;

/// Magnitudes below this are treated as zero when normalizing.
pub const MIN_MAGNITUDE: f64 = 1e-12;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vector3<f64>, b: Vector3<f64>) -> f64 {
    (a - b).norm()
}

/// Elementwise average of two points.
#[inline]
pub fn midpoint(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    (a + b) * 0.5
}

#[inline]
pub fn cross(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    a.cross(&b)
}

#[inline]
pub fn dot(a: Vector3<f64>, b: Vector3<f64>) -> f64 {
    a.dot(&b)
}

#[inline]
pub fn magnitude(v: Vector3<f64>) -> f64 {
    v.norm()
}

/// `v / |v|`, or `None` when `|v|` is (near) zero or not finite.
pub fn normalized(v: Vector3<f64>) -> Option<Vector3<f64>> {
    if !v.norm().is_finite() {
        return None;
    }
    v.try_normalize(MIN_MAGNITUDE)
}

/// Unsigned angle between two directions, in `[0, pi]`.
///
/// Returns `None` if either vector has (near) zero or non-finite magnitude.
pub fn angle_between(a: Vector3<f64>, b: Vector3<f64>) -> Option<f64> {
    let denom = a.norm() * b.norm();
    if !denom.is_finite() || denom < MIN_MAGNITUDE {
        return None;
    }
    Some(a.angle(&b))
}
