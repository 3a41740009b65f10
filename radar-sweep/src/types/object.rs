//! Detected obstacle records

use super::geometry::Point2;

/// One obstacle reconstructed from a contiguous run of close readings.
///
/// A default (disabled) object has all-zero geometry, so anything that draws
/// it without checking `enabled` produces a degenerate point rather than
/// garbage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScanObject {
    /// Start index while the span is open, midpoint index once finalised
    pub angle: i32,
    /// Reading at the midpoint angle (cm)
    pub distance: f32,
    /// Sweep-frame position of the first sample in the span
    pub start: Point2,
    /// Sweep-frame position of the last sample in the span
    pub end: Point2,
    /// True only for spans that passed the size filter
    pub enabled: bool,
}

impl ScanObject {
    /// Reset to the inert default
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Length of the segment between `start` and `end` (cm)
    pub fn extent(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}
