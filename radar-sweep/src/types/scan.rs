//! Per-degree distance array produced by one sweep

use crate::error::{Error, Result};
use std::ops::Index;

/// Number of slots in a sweep, one per degree of rotation
pub const SCAN_DEGREES: usize = 360;

/// One revolution of range samples indexed by integer degree.
///
/// Slot `i` holds the reading taken when the rotation magnitude first reached
/// `i + 1` degrees. Readings below the obstacle threshold are kept verbatim;
/// everything else is the far sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceScan {
    samples: [f32; SCAN_DEGREES],
}

impl DistanceScan {
    /// Create a scan with every slot set to `fill`
    pub fn filled(fill: f32) -> Self {
        Self {
            samples: [fill; SCAN_DEGREES],
        }
    }

    /// Build a scan from an explicit sample list.
    ///
    /// Fails unless exactly [`SCAN_DEGREES`] samples are given.
    pub fn from_samples(samples: &[f32]) -> Result<Self> {
        let samples: [f32; SCAN_DEGREES] = samples.try_into().map_err(|_| {
            Error::Other(format!(
                "scan needs {} samples, got {}",
                SCAN_DEGREES,
                samples.len()
            ))
        })?;
        Ok(Self { samples })
    }

    /// Overwrite one slot
    #[inline]
    pub(crate) fn set(&mut self, index: usize, distance: f32) {
        self.samples[index] = distance;
    }

    /// Sample at `index`, or `None` past the end
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.samples.get(index).copied()
    }

    /// All samples in degree order
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of slots (always [`SCAN_DEGREES`])
    #[inline]
    pub fn len(&self) -> usize {
        SCAN_DEGREES
    }

    /// A sweep is never empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Count of slots strictly below `threshold`
    pub fn count_below(&self, threshold: f32) -> usize {
        self.samples.iter().filter(|&&d| d < threshold).count()
    }
}

impl Index<usize> for DistanceScan {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.samples[index]
    }
}
