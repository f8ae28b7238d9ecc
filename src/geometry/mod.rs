//! Geometry utilities: rigid poses and rotation metrics.

pub mod pose;
pub mod so3;

pub use pose::Pose;
pub use so3::{angle_between, canonicalize_sign, chordal_distance, same_rotation};
