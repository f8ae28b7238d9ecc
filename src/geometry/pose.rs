//! Rigid-body pose: rotation + translation.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

/// A rigid-body pose, typically a marker pose in the camera frame.
///
/// `rotation` is always unit length; raw detector output lives in
/// [`crate::fusion::MarkerDetection`] until it has been averaged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: UnitQuaternion<f64>,
    pub translation: Vector3<f64>,
}

impl Pose {
    pub fn new(rotation: UnitQuaternion<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The rotation as a plain quaternion, as consumed by the averager.
    pub fn raw_quaternion(&self) -> Quaternion<f64> {
        self.rotation.into_inner()
    }
}
