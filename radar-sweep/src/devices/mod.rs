//! Device implementations

pub mod mock;
pub mod raster;

pub use mock::MockTurntable;
pub use raster::RasterDisplay;
