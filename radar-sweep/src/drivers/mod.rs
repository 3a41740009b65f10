//! Device driver traits

pub mod display;
pub mod sensor;

pub use display::Display;
pub use sensor::SensorSource;
