//! Error types for pose averaging.

use std::fmt;

use thiserror::Error;

/// Which kind of sample set was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Samples {
    Rotations,
    Positions,
    Poses,
}

impl fmt::Display for Samples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Samples::Rotations => "rotations",
            Samples::Positions => "positions",
            Samples::Poses => "poses",
        };
        f.write_str(name)
    }
}

/// Returned when an averager is handed zero samples.
///
/// There is no meaningful mean of an empty set: the position mean would divide
/// by zero and the rotation accumulation matrix would be all zeros.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot average an empty set of {samples}")]
pub struct EmptyInputError {
    pub samples: Samples,
}

impl EmptyInputError {
    pub fn new(samples: Samples) -> Self {
        Self { samples }
    }
}

pub type Result<T> = std::result::Result<T, EmptyInputError>;
