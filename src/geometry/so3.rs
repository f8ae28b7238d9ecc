//! Distances and sign handling for rotations represented as quaternions.
//!
//! A rotation has two quaternion representatives, q and −q. Every function
//! here is invariant to that choice, so callers can compare the output of the
//! averager against a reference without first agreeing on a sign.

use nalgebra::Quaternion;

/// Chordal distance between the rotations represented by `a` and `b`.
///
/// ```text
/// d(a, b) = min(‖a − b‖, ‖a + b‖)
/// ```
///
/// This is the metric the averager minimises (summed and squared).
pub fn chordal_distance(a: &Quaternion<f64>, b: &Quaternion<f64>) -> f64 {
    let diff = (a.coords - b.coords).norm();
    let sum = (a.coords + b.coords).norm();
    diff.min(sum)
}

/// Geodesic angle (radians) of the relative rotation between `a` and `b`.
///
/// Inputs are normalised first, so near-unit quaternions give sensible angles.
/// Returns `NaN` if either input has zero norm.
pub fn angle_between(a: &Quaternion<f64>, b: &Quaternion<f64>) -> f64 {
    let cos_half = (a.dot(b) / (a.norm() * b.norm())).abs().min(1.0);
    2.0 * cos_half.acos()
}

/// True if `a` and `b` represent the same rotation: |⟨â, b̂⟩| ≥ 1 − `tolerance`.
pub fn same_rotation(a: &Quaternion<f64>, b: &Quaternion<f64>, tolerance: f64) -> bool {
    let dot = a.dot(b) / (a.norm() * b.norm());
    dot.abs() >= 1.0 - tolerance
}

/// Pick the representative with w ≥ 0.
///
/// When w is exactly zero the first non-zero vector component (x, then y,
/// then z) is made positive, so the result is unique for any non-zero input.
pub fn canonicalize_sign(q: &Quaternion<f64>) -> Quaternion<f64> {
    let leading = [q.w, q.i, q.j, q.k]
        .into_iter()
        .find(|c| *c != 0.0)
        .unwrap_or(0.0);

    if leading < 0.0 {
        -*q
    } else {
        *q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{UnitQuaternion, Vector3};

    fn about_z(angle_rad: f64) -> Quaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle_rad).into_inner()
    }

    #[test]
    fn test_chordal_distance_sign_invariant() {
        let q = about_z(0.4);
        assert_relative_eq!(chordal_distance(&q, &q), 0.0, epsilon = 1e-12);
        assert_relative_eq!(chordal_distance(&q, &-q), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_chordal_distance_symmetric() {
        let a = about_z(0.1);
        let b = about_z(-0.7);
        assert_relative_eq!(
            chordal_distance(&a, &b),
            chordal_distance(&b, &a),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_angle_between_matches_relative_rotation() {
        let a = about_z(10f64.to_radians());
        let b = about_z(-10f64.to_radians());
        assert_relative_eq!(angle_between(&a, &b), 20f64.to_radians(), epsilon = 1e-9);
        assert_relative_eq!(angle_between(&a, &-b), 20f64.to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn test_angle_between_identical_is_zero() {
        let q = about_z(1.2);
        assert_relative_eq!(angle_between(&q, &q), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_same_rotation() {
        let q = about_z(0.3);
        assert!(same_rotation(&q, &-q, 1e-9));
        assert!(!same_rotation(&q, &about_z(0.6), 1e-3));
    }

    #[test]
    fn test_canonicalize_sign_makes_w_non_negative() {
        let q = Quaternion::new(-0.5, 0.5, -0.5, 0.5);
        let c = canonicalize_sign(&q);
        assert!(c.w > 0.0);
        assert_relative_eq!(c.coords, (-q).coords, epsilon = 1e-12);

        let already = Quaternion::new(0.5, -0.5, 0.5, -0.5);
        assert_eq!(canonicalize_sign(&already), already);
    }

    #[test]
    fn test_canonicalize_sign_zero_w() {
        // 180° about -x: w = 0, x < 0
        let q = Quaternion::new(0.0, -1.0, 0.0, 0.0);
        let c = canonicalize_sign(&q);
        assert_eq!(c, Quaternion::new(0.0, 1.0, 0.0, 0.0));
    }
}
