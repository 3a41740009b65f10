//! Mock turntable configuration
//!
//! Every parameter has a default so the `[simulation]` section can be left
//! out entirely. The default scene puts three small obstacles inside the
//! 30 cm detection radius and one large one outside it.
//!
//! ```toml
//! [simulation]
//! start_rotation = 17
//! degrees_per_speed_unit = 0.1
//! sensor_offset = 6.1
//! range_stddev = 0.3
//! random_seed = 42
//!
//! [[simulation.obstacles]]
//! x = -15.0
//! y = 12.0
//! radius = 4.0
//! ```

use serde::{Deserialize, Serialize};

/// Circular obstacle in the sweep frame (cm)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObstacleConfig {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl ObstacleConfig {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }
}

/// Simulated platform and scene
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Gyro reading before the sweep starts (degrees)
    #[serde(default)]
    pub start_rotation: i32,

    /// Heading change per poll for each unit of differential wheel speed
    #[serde(default = "default_degrees_per_speed_unit")]
    pub degrees_per_speed_unit: f32,

    /// Distance from rotation axis to the range sensor (cm). Raw readings
    /// come out this much shorter than the true distance from the axis.
    #[serde(default = "default_sensor_offset")]
    pub sensor_offset: f32,

    /// Reading returned when no obstacle is hit (cm)
    #[serde(default = "default_max_range")]
    pub max_range: f32,

    /// Range noise standard deviation (cm)
    #[serde(default = "default_range_stddev")]
    pub range_stddev: f32,

    /// Noise seed; 0 = random each run
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,

    /// Freeze the platform so the gyro never advances
    #[serde(default)]
    pub stalled: bool,

    #[serde(default = "default_obstacles")]
    pub obstacles: Vec<ObstacleConfig>,
}

fn default_degrees_per_speed_unit() -> f32 {
    0.1
}
fn default_sensor_offset() -> f32 {
    6.1
}
fn default_max_range() -> f32 {
    255.0
}
fn default_range_stddev() -> f32 {
    0.3
}
fn default_random_seed() -> u64 {
    42
}
fn default_obstacles() -> Vec<ObstacleConfig> {
    vec![
        ObstacleConfig::new(-15.0, 12.0, 4.0),
        ObstacleConfig::new(22.0, 5.0, 3.0),
        ObstacleConfig::new(10.0, -18.0, 5.0),
        ObstacleConfig::new(0.0, -90.0, 20.0),
    ]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_rotation: 0,
            degrees_per_speed_unit: default_degrees_per_speed_unit(),
            sensor_offset: default_sensor_offset(),
            max_range: default_max_range(),
            range_stddev: default_range_stddev(),
            random_seed: default_random_seed(),
            stalled: false,
            obstacles: default_obstacles(),
        }
    }
}

impl SimulationConfig {
    /// Noise-free scene with the given obstacles
    pub fn noiseless(obstacles: Vec<ObstacleConfig>) -> Self {
        Self {
            range_stddev: 0.0,
            obstacles,
            ..Self::default()
        }
    }
}
