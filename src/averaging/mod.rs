//! Averaging of rotations, positions and whole poses.
//!
//! Everything in here is pure: no logging, no I/O, no shared state. Callers
//! that want diagnostics on bad input go through [`crate::fusion::PoseFuser`].

pub mod position;
pub mod rotation;

pub use position::average_position;
pub use rotation::{accumulation_matrix, average_rotation, average_unit_rotations};

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::error::{EmptyInputError, Result, Samples};
use crate::geometry::Pose;

/// Average a set of poses: chordal mean of the rotations, arithmetic mean of
/// the translations.
pub fn average_poses(poses: &[Pose]) -> Result<Pose> {
    if poses.is_empty() {
        return Err(EmptyInputError::new(Samples::Poses));
    }

    let rotations: Vec<Quaternion<f64>> = poses.iter().map(Pose::raw_quaternion).collect();
    let translations: Vec<Vector3<f64>> = poses.iter().map(|p| p.translation).collect();

    let rotation = average_rotation(&rotations)?;
    let translation = average_position(&translations)?;

    Ok(Pose::new(UnitQuaternion::new_normalize(rotation), translation))
}
