//! Configuration for radar-sweep
//!
//! Loads configuration from a TOML file. Every field has a default matching
//! the EV3 platform calibration, so a partial file (or no file at all) is
//! enough to run a sweep.

use crate::devices::mock::config::SimulationConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scanner and segmenter calibration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SweepConfig {
    /// Obstacle threshold in cm. Readings below this count as "present";
    /// everything else is stored as the far sentinel `min_distance + 1`.
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,

    /// Nominal rotation command magnitude. Lower means a slower, more
    /// accurate sweep.
    #[serde(default = "default_turn_speed")]
    pub turn_speed: i32,

    /// Amount subtracted from `turn_speed` while an obstacle is in range
    #[serde(default = "default_slow_down")]
    pub slow_down: i32,

    /// Object-array capacity. Spans past this count are dropped.
    #[serde(default = "default_max_objects")]
    pub max_objects: usize,

    /// Distance (cm) from the rotation axis to the range sensor, added to
    /// every raw reading. Major source of error at distance and large angles.
    #[serde(default = "default_calibration_offset")]
    pub calibration_offset: f32,

    /// Minimum per-axis extent (cm) for a span to be kept as an object
    #[serde(default = "default_min_object_size")]
    pub min_object_size: f32,
}

fn default_min_distance() -> f32 {
    30.0
}
fn default_turn_speed() -> i32 {
    4
}
fn default_slow_down() -> i32 {
    2
}
fn default_max_objects() -> usize {
    10
}
fn default_calibration_offset() -> f32 {
    6.1
}
fn default_min_object_size() -> f32 {
    2.0
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_distance: default_min_distance(),
            turn_speed: default_turn_speed(),
            slow_down: default_slow_down(),
            max_objects: default_max_objects(),
            calibration_offset: default_calibration_offset(),
            min_object_size: default_min_object_size(),
        }
    }
}

impl SweepConfig {
    /// Value stored for any reading not below `min_distance`
    #[inline]
    pub fn far_sentinel(&self) -> f32 {
        self.min_distance + 1.0
    }

    /// Builder-style setter for the object capacity.
    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    /// Builder-style setter for the obstacle threshold.
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }
}

/// Target raster geometry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Raster width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Raster height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Pixels per cm
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_width() -> u32 {
    178
}
fn default_height() -> u32 {
    128
}
fn default_scale() -> f32 {
    1.5
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            scale: default_scale(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use radar_sweep::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("radar-sweep.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let sweep = &self.sweep;
        if sweep.max_objects == 0 {
            return Err(Error::InvalidConfig(
                "sweep.max_objects must be at least 1".to_string(),
            ));
        }
        if sweep.turn_speed <= 0 {
            return Err(Error::InvalidConfig(format!(
                "sweep.turn_speed must be positive, got {}",
                sweep.turn_speed
            )));
        }
        if sweep.slow_down < 0 || sweep.slow_down >= sweep.turn_speed {
            return Err(Error::InvalidConfig(format!(
                "sweep.slow_down must be in [0, {}), got {}",
                sweep.turn_speed, sweep.slow_down
            )));
        }
        if !sweep.min_distance.is_finite() || sweep.min_distance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sweep.min_distance must be positive, got {}",
                sweep.min_distance
            )));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "display must be non-empty, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.display.scale.is_nan() || self.display.scale <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "display.scale must be positive, got {}",
                self.display.scale
            )));
        }
        Ok(())
    }
}
