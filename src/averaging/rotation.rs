//! Quaternion averaging under the chordal metric.
//!
//! The mean rotation of q₁..q_N is the unit quaternion q̄ that maximises
//! Σ ⟨q̄, qᵢ⟩², which is the dominant eigenvector of
//!
//! ```text
//! A = (1/N) Σ qᵢ qᵢᵀ
//! ```
//!
//! Each term qᵢ qᵢᵀ is unchanged when qᵢ is replaced by −qᵢ, so the result does
//! not depend on the sign of any input. Reference: Markley et al., "Averaging
//! Quaternions", J. Guidance, Control, and Dynamics 30(4), 2007.
//!
//! Inputs are not re-normalised. With near-unit inputs the result is still the
//! dominant eigenvector of a well-defined PSD matrix; quality degrades but
//! nothing panics or returns NaN.

use nalgebra::{Matrix4, Quaternion, UnitQuaternion};

use crate::error::{EmptyInputError, Result, Samples};

/// Build the accumulation matrix A = (1/N) Σ qᵢ qᵢᵀ.
///
/// A is symmetric positive semi-definite. Storage order of each qᵢ is
/// nalgebra's (x, y, z, w).
pub fn accumulation_matrix(quaternions: &[Quaternion<f64>]) -> Result<Matrix4<f64>> {
    if quaternions.is_empty() {
        return Err(EmptyInputError::new(Samples::Rotations));
    }

    let mut a = Matrix4::zeros();
    for q in quaternions {
        a += q.coords * q.coords.transpose();
    }
    a /= quaternions.len() as f64;

    Ok(a)
}

/// Average a set of quaternions.
///
/// Returns the unit eigenvector of the largest eigenvalue of the
/// accumulation matrix. The sign of the result is whatever the decomposition
/// produces, so two calls on the same multiset in a different order may
/// return q̄ and −q̄. Use [`crate::geometry::canonicalize_sign`] when a
/// canonical sign is needed.
///
/// Exact eigenvalue ties (e.g. two equally weighted, unrelated clusters) are
/// broken by taking the first index in the decomposition's ordering; which
/// rotation wins in that case is implementation-defined.
pub fn average_rotation(quaternions: &[Quaternion<f64>]) -> Result<Quaternion<f64>> {
    let a = accumulation_matrix(quaternions)?;

    // Symmetric eigen-decomposition; for a PSD matrix this coincides with its SVD.
    let eigen = a.symmetric_eigen();

    let mut largest_idx = 0;
    for (i, &value) in eigen.eigenvalues.iter().enumerate().skip(1) {
        if value > eigen.eigenvalues[largest_idx] {
            largest_idx = i;
        }
    }

    let dominant = eigen.eigenvectors.column(largest_idx).into_owned();
    Ok(Quaternion::from_vector(dominant))
}

/// Average unit quaternions, returning a unit quaternion.
pub fn average_unit_rotations(rotations: &[UnitQuaternion<f64>]) -> Result<UnitQuaternion<f64>> {
    let raw: Vec<Quaternion<f64>> = rotations.iter().map(|r| r.into_inner()).collect();
    let mean = average_rotation(&raw)?;
    Ok(UnitQuaternion::new_normalize(mean))
}
