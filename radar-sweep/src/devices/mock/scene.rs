//! Ray casting against circular obstacles

use super::config::ObstacleConfig;

/// Obstacles around the rotation axis
#[derive(Debug, Clone)]
pub struct Scene {
    obstacles: Vec<ObstacleConfig>,
    max_range: f32,
}

impl Scene {
    pub fn new(obstacles: Vec<ObstacleConfig>, max_range: f32) -> Self {
        Self {
            obstacles,
            max_range,
        }
    }

    /// Distance from the axis to the first obstacle along the sweep angle
    /// (degrees), or `max_range` on a miss.
    pub fn ray_cast(&self, angle_deg: f32) -> f32 {
        let theta = angle_deg.to_radians();
        let (ux, uy) = (-theta.sin(), theta.cos());

        self.obstacles
            .iter()
            .filter_map(|o| {
                let b = ux * o.x + uy * o.y;
                let c = o.x * o.x + o.y * o.y - o.radius * o.radius;
                if c <= 0.0 {
                    // Axis inside the obstacle
                    return Some(0.0);
                }
                let disc = b * b - c;
                if disc < 0.0 {
                    return None;
                }
                let t = b - disc.sqrt();
                (t >= 0.0).then_some(t)
            })
            .fold(self.max_range, f32::min)
    }
}
