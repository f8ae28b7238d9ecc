//! Detection and fused-pose types.

use nalgebra::{Quaternion, Vector3};

use crate::geometry::Pose;

/// Identifier of a fiducial marker (e.g. an AprilTag id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl MarkerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker {}", self.0)
    }
}

/// One pose estimate of one marker.
///
/// The rotation is kept exactly as reported by the detector, without
/// renormalisation, so the fuser can flag estimates that are not unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerDetection {
    pub marker_id: MarkerId,
    pub rotation: Quaternion<f64>,
    pub translation: Vector3<f64>,
}

/// Result of fusing several pose estimates into one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedPose {
    /// The marker this pose belongs to, if the inputs were grouped by marker.
    pub marker_id: Option<MarkerId>,
    pub pose: Pose,
    /// Number of estimates that went into `pose`.
    pub num_samples: usize,
}
