//! Obstacle segmentation of a distance sweep.
//!
//! Walks the 360 samples once, tracking whether each sample is below the
//! obstacle threshold. A run of "present" samples becomes one
//! [`ScanObject`]:
//!
//! ```text
//! index:    ...  9   10  11  12  13  14  15 ...
//! state:       Abs  Pre Pre Pre Pre Pre Abs
//! event:            Enter              Exit
//!                   start=polar(10)    end=polar(14)
//!                                      angle=(10+14)/2
//! ```
//!
//! The end of a span is only known one sample late, so its geometry comes
//! from index `i - 1`.
//!
//! # Noise filter
//!
//! A finished span is rejected when its end point lies within
//! `min_object_size` of the previous accepted object's end point on either
//! axis. The comparison is against the previous object, not against the
//! span's own start, so a short blip right after an object is dropped while
//! an isolated one survives. The first span has nothing to compare with and
//! is always kept.

use crate::config::SweepConfig;
use crate::types::{DistanceScan, Point2, ScanObject, SCAN_DEGREES};
use log::{debug, warn};

/// Per-sample classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    /// Reading at or beyond the threshold
    Absent,
    /// Reading below the threshold
    Present,
}

impl EdgeState {
    /// Classify a reading against the obstacle threshold.
    ///
    /// NaN never compares below, so invalid readings count as absent.
    #[inline]
    pub fn classify(distance: f32, threshold: f32) -> Self {
        if distance < threshold {
            Self::Present
        } else {
            Self::Absent
        }
    }
}

/// Edge event between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Absent → Present: a span begins at this sample
    Enter,
    /// Present → Absent: the span ended at the previous sample
    Exit,
    /// No change
    Hold,
}

impl Transition {
    /// Transition table
    #[inline]
    pub fn between(prev: EdgeState, curr: EdgeState) -> Self {
        match (prev, curr) {
            (EdgeState::Absent, EdgeState::Present) => Self::Enter,
            (EdgeState::Present, EdgeState::Absent) => Self::Exit,
            _ => Self::Hold,
        }
    }
}

/// Output of one segmentation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// Exactly `max_objects` slots; the first `count` hold accepted objects,
    /// the rest are disabled and zeroed
    pub objects: Vec<ScanObject>,
    /// Accepted objects
    pub count: usize,
    /// Spans removed by the noise filter
    pub rejected: usize,
    /// Spans ignored because every slot was already taken
    pub dropped: usize,
    /// A span was still open at the last sample and was discarded
    pub unterminated: bool,
}

impl Segmentation {
    /// Accepted objects in ascending angle order
    pub fn enabled(&self) -> impl Iterator<Item = &ScanObject> {
        self.objects.iter().filter(|o| o.enabled)
    }

    /// Number of slots with `enabled` set
    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }
}

/// Turns a [`DistanceScan`] into obstacle records.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SweepConfig,
}

impl Segmenter {
    /// Create a new segmenter with the given configuration.
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// Run one pass over the scan.
    pub fn segment(&self, scan: &DistanceScan) -> Segmentation {
        let threshold = self.config.min_distance;
        let min_size = self.config.min_object_size;
        let capacity = self.config.max_objects;

        let mut objects = vec![ScanObject::default(); capacity];
        let mut count = 0usize;
        let mut rejected = 0usize;
        let mut dropped = 0usize;
        let mut open = false;
        let mut last_end: Option<Point2> = None;
        let mut prev = EdgeState::Absent;

        for i in 0..SCAN_DEGREES {
            let curr = EdgeState::classify(scan[i], threshold);

            match Transition::between(prev, curr) {
                Transition::Enter if count < capacity => {
                    let slot = &mut objects[count];
                    slot.start = Point2::from_polar_degrees(i as i32, scan[i]);
                    slot.angle = i as i32;
                    slot.enabled = true;
                    open = true;
                }
                Transition::Enter => {
                    dropped += 1;
                }
                Transition::Exit if open => {
                    open = false;
                    let last = i - 1;
                    let end = Point2::from_polar_degrees(last as i32, scan[last]);
                    let slot = &mut objects[count];

                    let too_small = last_end.is_some_and(|prev_end| {
                        let (dx, dy) = end.abs_diff(&prev_end);
                        dx < min_size || dy < min_size
                    });

                    if too_small {
                        debug!("Rejected span {}..={} as noise", slot.angle, last);
                        slot.clear();
                        rejected += 1;
                    } else {
                        slot.end = end;
                        slot.angle = (slot.angle + last as i32) / 2;
                        slot.distance = scan[slot.angle as usize];
                        debug!(
                            "Object {} at {} degrees, {:.1} cm",
                            count, slot.angle, slot.distance
                        );
                        last_end = Some(end);
                        count += 1;
                    }
                }
                Transition::Exit | Transition::Hold => {}
            }

            prev = curr;
        }

        if open {
            debug!(
                "Span starting at {} degrees never closed; discarded",
                objects[count].angle
            );
            objects[count].clear();
        }
        if dropped > 0 {
            warn!(
                "Object capacity {} exhausted, {} spans dropped",
                capacity, dropped
            );
        }

        Segmentation {
            objects,
            count,
            rejected,
            dropped,
            unterminated: open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FAR: f32 = 31.0;

    fn config(max_objects: usize) -> SweepConfig {
        SweepConfig::default().with_max_objects(max_objects)
    }

    fn scan_with_runs(runs: &[(usize, usize, f32)]) -> DistanceScan {
        let mut samples = vec![FAR; SCAN_DEGREES];
        for &(from, to, value) in runs {
            for sample in &mut samples[from..=to] {
                *sample = value;
            }
        }
        DistanceScan::from_samples(&samples).unwrap()
    }

    #[test]
    fn test_transition_table() {
        use EdgeState::*;
        assert_eq!(Transition::between(Absent, Present), Transition::Enter);
        assert_eq!(Transition::between(Present, Absent), Transition::Exit);
        assert_eq!(Transition::between(Absent, Absent), Transition::Hold);
        assert_eq!(Transition::between(Present, Present), Transition::Hold);
    }

    #[test]
    fn test_classify() {
        assert_eq!(EdgeState::classify(29.9, 30.0), EdgeState::Present);
        assert_eq!(EdgeState::classify(30.0, 30.0), EdgeState::Absent);
        assert_eq!(EdgeState::classify(f32::NAN, 30.0), EdgeState::Absent);
    }

    #[test]
    fn test_empty_scan_has_no_objects() {
        let result = Segmenter::new(config(10)).segment(&DistanceScan::filled(FAR));
        assert_eq!(result.count, 0);
        assert_eq!(result.enabled_count(), 0);
        assert_eq!(result.objects.len(), 10);
        assert!(result.objects.iter().all(|o| *o == ScanObject::default()));
    }

    #[test]
    fn test_single_run() {
        let scan = scan_with_runs(&[(10, 14, 5.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);

        assert_eq!(result.count, 1);
        assert_eq!(result.enabled_count(), 1);
        let obj = &result.objects[0];
        assert!(obj.enabled);
        assert_eq!(obj.angle, 12);
        assert_eq!(obj.distance, 5.0);

        let start = Point2::from_polar_degrees(10, 5.0);
        let end = Point2::from_polar_degrees(14, 5.0);
        assert_relative_eq!(obj.start.x, start.x);
        assert_relative_eq!(obj.start.y, start.y);
        assert_relative_eq!(obj.end.x, end.x);
        assert_relative_eq!(obj.end.y, end.y);
    }

    #[test]
    fn test_midpoint_rounds_down() {
        let scan = scan_with_runs(&[(40, 45, 8.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);
        assert_eq!(result.objects[0].angle, 42);
        assert_eq!(result.objects[0].distance, 8.0);
    }

    #[test]
    fn test_midpoint_distance_from_scan() {
        let mut samples = vec![FAR; SCAN_DEGREES];
        for (i, sample) in samples.iter_mut().enumerate().take(75).skip(60) {
            *sample = 10.0 + (i - 60) as f32;
        }
        let scan = DistanceScan::from_samples(&samples).unwrap();
        let result = Segmenter::new(config(10)).segment(&scan);

        let obj = &result.objects[0];
        assert_eq!(obj.angle, 67);
        assert_eq!(obj.distance, 17.0);
    }

    #[test]
    fn test_two_runs_in_order() {
        let scan = scan_with_runs(&[(10, 14, 5.0), (200, 205, 5.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);

        assert_eq!(result.count, 2);
        let angles: Vec<i32> = result.enabled().map(|o| o.angle).collect();
        assert_eq!(angles, vec![12, 202]);
    }

    #[test]
    fn test_capacity_keeps_first_object() {
        let scan = scan_with_runs(&[(10, 14, 5.0), (200, 205, 5.0)]);
        let result = Segmenter::new(config(1)).segment(&scan);

        assert_eq!(result.objects.len(), 1);
        assert_eq!(result.count, 1);
        assert_eq!(result.dropped, 1);
        assert_eq!(result.objects[0].angle, 12);
        assert_eq!(result.objects[0].distance, 5.0);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let scan = scan_with_runs(&[
            (10, 14, 5.0),
            (100, 104, 5.0),
            (200, 204, 5.0),
            (300, 304, 5.0),
        ]);
        let result = Segmenter::new(config(2)).segment(&scan);

        assert_eq!(result.objects.len(), 2);
        assert_eq!(result.count, 2);
        assert_eq!(result.dropped, 2);
        assert_eq!(result.objects[1].angle, 102);
    }

    #[test]
    fn test_blip_after_object_rejected() {
        // End of the blip at 20 degrees is within 2cm of the end at 14.
        let scan = scan_with_runs(&[(10, 14, 5.0), (20, 20, 5.0), (200, 205, 5.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);

        assert_eq!(result.rejected, 1);
        assert_eq!(result.count, 2);
        assert_eq!(result.objects[0].angle, 12);
        assert_eq!(result.objects[1].angle, 202);
    }

    #[test]
    fn test_close_on_one_axis_is_enough_to_reject() {
        // Previous end is polar(14, 5) = (-1.21, 4.85).
        // polar(40, 6) = (-3.86, 4.60): 2.65 apart on x, 0.25 on y.
        let scan = scan_with_runs(&[(10, 14, 5.0), (40, 40, 6.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);
        assert_eq!(result.rejected, 1);
        assert_eq!(result.count, 1);

        // polar(16, 10) = (-2.76, 9.61): 1.55 apart on x, 4.76 on y.
        let scan = scan_with_runs(&[(10, 14, 5.0), (16, 16, 10.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);
        assert_eq!(result.rejected, 1);
        assert_eq!(result.count, 1);
    }

    #[test]
    fn test_far_on_both_axes_is_kept() {
        // polar(90, 5) = (-5.0, 0.0): 3.79 apart on x, 4.85 on y.
        let scan = scan_with_runs(&[(10, 14, 5.0), (90, 90, 5.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);

        assert_eq!(result.rejected, 0);
        assert_eq!(result.count, 2);
        assert_eq!(result.objects[1].angle, 90);
        assert!(result.objects[1].enabled);
    }

    #[test]
    fn test_rejected_slot_is_disabled_and_zeroed() {
        // A rejected slot must not leave a dot at the screen centre.
        let scan = scan_with_runs(&[(10, 14, 5.0), (20, 20, 5.0)]);
        let result = Segmenter::new(config(2)).segment(&scan);

        assert_eq!(result.count, 1);
        assert_eq!(result.rejected, 1);
        assert_eq!(result.objects[1], ScanObject::default());
        assert!(!result.objects[1].enabled);
        assert_eq!(result.enabled_count(), 1);
    }

    #[test]
    fn test_first_span_is_never_filtered() {
        let scan = scan_with_runs(&[(90, 90, 1.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);

        assert_eq!(result.count, 1);
        assert_eq!(result.objects[0].angle, 90);
    }

    #[test]
    fn test_span_at_start_of_sweep() {
        let scan = scan_with_runs(&[(0, 3, 12.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);

        assert_eq!(result.count, 1);
        assert_eq!(result.objects[0].angle, 1);
    }

    #[test]
    fn test_open_span_discarded() {
        let scan = scan_with_runs(&[(10, 14, 5.0), (350, 359, 5.0)]);
        let result = Segmenter::new(config(10)).segment(&scan);

        assert!(result.unterminated);
        assert_eq!(result.count, 1);
        assert_eq!(result.enabled_count(), 1);
        assert_eq!(result.objects[1], ScanObject::default());
    }
}
