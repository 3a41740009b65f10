//! Rotating range sensor driver trait

use crate::error::Result;

/// Gyro, range finder and differential drive of a turning platform.
///
/// The scanner only ever talks to hardware through this trait.
pub trait SensorSource {
    /// Cumulative signed rotation in degrees since power-on or reset
    fn read_rotation(&mut self) -> Result<i32>;

    /// Distance to the nearest obstacle in cm, uncalibrated
    fn read_range(&mut self) -> Result<f32>;

    /// Set drive speed per wheel. Sign is direction; zero stops the wheel.
    fn set_motor_speed(&mut self, left: i32, right: i32) -> Result<()>;

    /// Stop both wheels
    fn stop(&mut self) -> Result<()> {
        self.set_motor_speed(0, 0)
    }
}

impl<S: SensorSource + ?Sized> SensorSource for &mut S {
    fn read_rotation(&mut self) -> Result<i32> {
        (**self).read_rotation()
    }

    fn read_range(&mut self) -> Result<f32> {
        (**self).read_range()
    }

    fn set_motor_speed(&mut self, left: i32, right: i32) -> Result<()> {
        (**self).set_motor_speed(left, right)
    }

    fn stop(&mut self) -> Result<()> {
        (**self).stop()
    }
}
