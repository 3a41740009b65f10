//! Core data types shared by the sweep stages

mod geometry;
mod object;
mod scan;

pub use geometry::Point2;
pub use object::ScanObject;
pub use scan::{DistanceScan, SCAN_DEGREES};
