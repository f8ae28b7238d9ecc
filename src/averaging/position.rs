//! Arithmetic mean of 3D positions.

use nalgebra::Vector3;

use crate::error::{EmptyInputError, Result, Samples};

/// Per-component arithmetic mean of `positions`.
pub fn average_position(positions: &[Vector3<f64>]) -> Result<Vector3<f64>> {
    if positions.is_empty() {
        return Err(EmptyInputError::new(Samples::Positions));
    }

    let sum: Vector3<f64> = positions.iter().sum();
    Ok(sum / positions.len() as f64)
}
