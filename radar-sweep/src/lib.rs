//! radar-sweep - Single-revolution obstacle map
//!
//! Spins a range sensor through one full turn, groups close readings into
//! obstacle segments and draws them on a small raster.
//!
//! ## Stages
//!
//! - [`scanner`]: closed-loop sweep producing one sample per degree
//! - [`segmenter`]: edge detection, noise filtering and polar → Cartesian
//! - [`render`]: projection of segments onto a [`drivers::Display`]
//!
//! ## Devices
//!
//! - [`devices::MockTurntable`]: simulated platform for hardware-free runs
//! - [`devices::RasterDisplay`]: in-memory raster with PNG/ASCII export

pub mod config;
pub mod devices;
pub mod drivers;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod scanner;
pub mod segmenter;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, DisplayConfig, SweepConfig};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, SweepResult};
pub use render::Renderer;
pub use scanner::{ScanLimits, ScanReport, Scanner};
pub use segmenter::{EdgeState, Segmentation, Segmenter, Transition};
pub use types::{DistanceScan, Point2, ScanObject, SCAN_DEGREES};
