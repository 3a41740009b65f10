//! Simulated turntable for hardware-free sweeps
//!
//! Stands in for the gyro, ultrasonic sensor and two drive motors of the
//! physical platform.
//!
//! | Component | Simulation Method |
//! |-----------|-------------------|
//! | Gyro | Heading integrated per poll from the differential wheel command, truncated to whole degrees |
//! | Range sensor | Ray cast against circular obstacles, minus the sensor mounting offset, plus Gaussian noise |
//! | Motors | Last commanded speeds, readable for assertions |
//!
//! # Simulation Loop
//!
//! There is no background thread. Each `read_rotation` call is one
//! simulation step:
//!
//! ```text
//! heading += degrees_per_speed_unit * (left - right) / 2
//! ```
//!
//! so the sweep speed scales with the commanded wheel speed just like the
//! real platform, and slowing down near obstacles yields more polls per
//! degree.
//!
//! Handles are cheap clones sharing one state, so a test can keep a handle
//! to inspect motor commands after giving another to the scanner.

pub mod config;
mod noise;
mod scene;

use crate::drivers::SensorSource;
use crate::error::Result;
use config::SimulationConfig;
use noise::RangeJitter;
use parking_lot::Mutex;
use scene::Scene;
use std::sync::Arc;

pub use config::ObstacleConfig;

/// Mock turntable
#[derive(Clone)]
pub struct MockTurntable {
    state: Arc<Mutex<TurntableState>>,
}

struct TurntableState {
    config: SimulationConfig,
    scene: Scene,
    noise: RangeJitter,
    heading: f32,
    left: i32,
    right: i32,
    steps: u64,
    commands: u64,
}

impl MockTurntable {
    /// Create a new turntable at heading 0
    pub fn new(config: SimulationConfig) -> Self {
        let scene = Scene::new(config.obstacles.clone(), config.max_range);
        let noise = RangeJitter::new(config.random_seed);
        Self {
            state: Arc::new(Mutex::new(TurntableState {
                config,
                scene,
                noise,
                heading: 0.0,
                left: 0,
                right: 0,
                steps: 0,
                commands: 0,
            })),
        }
    }

    /// Heading in degrees since creation
    pub fn heading(&self) -> f32 {
        self.state.lock().heading
    }

    /// Last commanded wheel speeds (left, right)
    pub fn wheel_speeds(&self) -> (i32, i32) {
        let state = self.state.lock();
        (state.left, state.right)
    }

    /// Number of gyro reads so far
    pub fn steps(&self) -> u64 {
        self.state.lock().steps
    }

    /// Number of motor commands received
    pub fn commands(&self) -> u64 {
        self.state.lock().commands
    }
}

impl SensorSource for MockTurntable {
    fn read_rotation(&mut self) -> Result<i32> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if !state.config.stalled {
            let differential = (state.left - state.right) as f32 / 2.0;
            state.heading += state.config.degrees_per_speed_unit * differential;
        }
        state.steps += 1;
        Ok(state.config.start_rotation + state.heading.trunc() as i32)
    }

    fn read_range(&mut self) -> Result<f32> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let distance = state.scene.ray_cast(state.heading);
        let noisy = distance + state.noise.next_cm(state.config.range_stddev);
        Ok((noisy - state.config.sensor_offset).clamp(0.0, state.config.max_range))
    }

    fn set_motor_speed(&mut self, left: i32, right: i32) -> Result<()> {
        let mut state = self.state.lock();
        state.left = left;
        state.right = right;
        state.commands += 1;
        Ok(())
    }
}
