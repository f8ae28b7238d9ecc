//! Fusion of repeated marker detections into one pose per marker.
//!
//! Wraps the pure averagers with the policy a detection pipeline needs:
//! logging on empty or suspicious input, sign canonicalisation of the output
//! and per-marker grouping.

mod fuser;
pub mod types;

pub use fuser::{FusionConfig, PoseFuser};
pub use types::{FusedPose, MarkerDetection, MarkerId};
