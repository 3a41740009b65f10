//! Projection of detected objects onto a display

use crate::config::DisplayConfig;
use crate::drivers::Display;
use crate::types::{Point2, ScanObject};
use log::debug;

/// Title written above the map
pub const TITLE: &str = "    ENEMY TARGETS";

/// Status line the title goes on
pub const TITLE_LINE: usize = 1;

/// Draws object segments centred on the raster.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: DisplayConfig,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Map a sweep-frame point (cm) to integer pixels.
    ///
    /// `pixel = center + scale * coordinate`, truncated toward zero.
    #[inline]
    pub fn project(&self, point: Point2) -> (i32, i32) {
        self.project_on(point, self.config.width, self.config.height)
    }

    /// [`Self::project`] centred on a raster of the given size.
    ///
    /// Coordinates far off the raster saturate at the `i32` limits.
    #[inline]
    pub fn project_on(&self, point: Point2, width: u32, height: u32) -> (i32, i32) {
        let cx = (width / 2) as f32;
        let cy = (height / 2) as f32;
        (
            (cx + self.config.scale * point.x) as i32,
            (cy + self.config.scale * point.y) as i32,
        )
    }

    /// Clear the display, write the title and draw every enabled object.
    ///
    /// Returns the number of segments drawn.
    pub fn render<D: Display + ?Sized>(&self, objects: &[ScanObject], display: &mut D) -> usize {
        display.clear();
        display.write_text(TITLE_LINE, TITLE);

        let (width, height) = (display.width(), display.height());
        if (width, height) != (self.config.width, self.config.height) {
            debug!(
                "Display is {}x{}, configured {}x{}; centring on the display",
                width, height, self.config.width, self.config.height
            );
        }

        let mut drawn = 0;
        for object in objects.iter().filter(|o| o.enabled) {
            let (x0, y0) = self.project_on(object.start, width, height);
            let (x1, y1) = self.project_on(object.end, width, height);
            display.draw_line(x0, y0, x1, y1);
            drawn += 1;
        }

        debug!("Rendered {} of {} object slots", drawn, objects.len());
        drawn
    }
}
