//! Planar geometry in the sweep frame

/// Point in the sweep frame (cm).
///
/// The frame is centred on the rotation axis. Angle 0 points along +Y and
/// angles grow towards -X, matching the direction the platform turns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    /// Origin of the sweep frame
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create new point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a polar reading (integer degrees, cm) into the sweep frame.
    ///
    /// `x = d * sin(-angle)`, `y = d * cos(angle)`.
    #[inline]
    pub fn from_polar_degrees(angle: i32, distance: f32) -> Self {
        let theta = (angle as f32).to_radians();
        Self {
            x: distance * (-theta).sin(),
            y: distance * theta.cos(),
        }
    }

    /// Per-axis absolute difference to another point
    #[inline]
    pub fn abs_diff(&self, other: &Self) -> (f32, f32) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }
}
