//! PoseFuser - caller-facing wrapper around the averagers.
//!
//! The averagers in [`crate::averaging`] are pure and report empty input as an
//! error. This layer decides what to do about it. It logs, checks that
//! detector quaternions are finite and close to unit length, picks a canonical
//! sign for the output and groups detections by marker.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::averaging::{average_poses, average_position, average_rotation};
use crate::error::EmptyInputError;
use crate::geometry::{canonicalize_sign, chordal_distance, Pose};

use super::types::{FusedPose, MarkerDetection, MarkerId};

/// Configuration for the PoseFuser.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Flip the fused quaternion so that w ≥ 0.
    pub canonical_sign: bool,

    /// Allowed deviation of an input quaternion norm from 1 before it is
    /// reported. Inputs are never rejected.
    pub unit_norm_tolerance: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            canonical_sign: true,
            unit_norm_tolerance: 1e-3,
        }
    }
}

impl FusionConfig {
    /// Load from a YAML file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let config: Self = serde_yaml::from_reader(file)
            .with_context(|| format!("Failed to parse fusion config {:?}", path))?;
        Ok(config)
    }
}

/// True if a quaternion with this norm should be reported. NaN and infinite
/// norms always are.
fn norm_out_of_tolerance(norm: f64, tolerance: f64) -> bool {
    !norm.is_finite() || (norm - 1.0).abs() > tolerance
}

/// Fuses batches of pose estimates into single poses.
#[derive(Debug, Clone, Default)]
pub struct PoseFuser {
    config: FusionConfig,
}

impl PoseFuser {
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Fuse a batch of pose estimates of the same target.
    ///
    /// Returns `None` (and logs a warning) if `poses` is empty.
    pub fn fuse(&self, poses: &[Pose]) -> Option<FusedPose> {
        let fused = average_poses(poses);
        self.finish(None, fused, poses.len())
    }

    /// Fuse detections per marker. Output is sorted by marker id.
    ///
    /// Detector quaternions are averaged as given; non-unit or non-finite
    /// ones are logged but still used.
    pub fn fuse_by_marker(&self, detections: &[MarkerDetection]) -> Vec<FusedPose> {
        let mut groups: BTreeMap<MarkerId, Vec<&MarkerDetection>> = BTreeMap::new();
        for det in detections {
            groups.entry(det.marker_id).or_default().push(det);
        }

        debug!(
            "Fusing {} detections of {} markers",
            detections.len(),
            groups.len()
        );

        groups
            .into_iter()
            .filter_map(|(id, dets)| self.fuse_marker(id, &dets))
            .collect()
    }

    fn fuse_marker(
        &self,
        marker_id: MarkerId,
        detections: &[&MarkerDetection],
    ) -> Option<FusedPose> {
        let rotations: Vec<Quaternion<f64>> = detections.iter().map(|d| d.rotation).collect();
        let translations: Vec<Vector3<f64>> = detections.iter().map(|d| d.translation).collect();

        for (i, q) in rotations.iter().enumerate() {
            let norm = q.norm();
            if !norm_out_of_tolerance(norm, self.config.unit_norm_tolerance) {
                continue;
            }
            if norm.is_finite() {
                debug!(
                    "{}: detection {} has quaternion norm {:.6}; averaging quality may degrade",
                    marker_id, i, norm
                );
            } else {
                warn!(
                    "{}: detection {} has a non-finite quaternion {:?}",
                    marker_id, i, q.coords
                );
            }
        }

        let fused = average_rotation(&rotations).and_then(|rotation| {
            let translation = average_position(&translations)?;
            Ok(Pose::new(UnitQuaternion::new_normalize(rotation), translation))
        });

        let result = self.finish(Some(marker_id), fused, detections.len())?;

        let spread = rotations
            .iter()
            .map(|q| chordal_distance(result.pose.rotation.quaternion(), q))
            .fold(0.0, f64::max);
        debug!(
            "{}: fused {} detections, max chordal distance to mean {:.4}",
            marker_id,
            detections.len(),
            spread
        );

        Some(result)
    }

    fn finish(
        &self,
        marker_id: Option<MarkerId>,
        fused: std::result::Result<Pose, EmptyInputError>,
        num_samples: usize,
    ) -> Option<FusedPose> {
        let mut pose = match fused {
            Ok(pose) => pose,
            Err(e) => {
                match marker_id {
                    Some(id) => warn!("{}: {}", id, e),
                    None => warn!("{}", e),
                }
                return None;
            }
        };

        if self.config.canonical_sign {
            let q = canonicalize_sign(pose.rotation.quaternion());
            pose.rotation = UnitQuaternion::new_unchecked(q);
        }

        Some(FusedPose {
            marker_id,
            pose,
            num_samples,
        })
    }
}
