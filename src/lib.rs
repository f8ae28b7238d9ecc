pub mod averaging;
pub mod error;
pub mod fusion;
pub mod geometry;
pub mod io;

pub use averaging::{average_poses, average_position, average_rotation, average_unit_rotations};
pub use error::{EmptyInputError, Samples};
