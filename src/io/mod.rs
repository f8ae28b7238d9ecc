//! File input for detection logs.

pub mod detections;

pub use detections::load_detections;
