//! Single-revolution range sweep
//!
//! Spins the platform in place and samples the range sensor once per degree
//! of rotation. The polling loop runs much faster than the platform turns,
//! so a slot is written only when the rotation magnitude passes the highest
//! degree recorded so far.
//!
//! # Speed policy
//!
//! ```text
//! reading < min_distance   →  (turn_speed - slow_down, -(turn_speed - slow_down))
//! otherwise                →  (turn_speed, -turn_speed)
//! ```
//!
//! Slowing down while something is in range gives more samples per degree
//! around obstacle edges.
//!
//! # Termination
//!
//! The sweep ends when the rotation magnitude reaches 360. Without
//! [`ScanLimits`] a rotation sensor that never advances blocks forever; the
//! limits turn that into [`Error::Stalled`], [`Error::Timeout`] or
//! [`Error::Cancelled`]. Motors are stopped on every exit path.

use crate::config::SweepConfig;
use crate::drivers::SensorSource;
use crate::error::{Error, Result};
use crate::types::{DistanceScan, SCAN_DEGREES};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const FULL_TURN: u32 = SCAN_DEGREES as u32;

/// Optional guards against a sweep that never finishes.
///
/// All `None` by default, which blocks until a full revolution.
#[derive(Debug, Clone, Default)]
pub struct ScanLimits {
    /// Wall-clock limit for the whole sweep
    pub timeout: Option<Duration>,
    /// Consecutive polls without rotation progress before giving up
    pub stall_polls: Option<u64>,
    /// Set to true from another thread to abort the sweep
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ScanLimits {
    /// Builder-style setter for the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder-style setter for the stall detector.
    pub fn with_stall_polls(mut self, polls: u64) -> Self {
        self.stall_polls = Some(polls);
        self
    }

    /// Builder-style setter for the cancellation flag.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// Result of a completed sweep
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Per-degree samples
    pub scan: DistanceScan,
    /// Sensor polls performed
    pub polls: u64,
    /// Slots written
    pub samples: usize,
    /// Polls that ran at reduced speed
    pub slowed_polls: u64,
    /// Slots jumped over because rotation advanced several degrees in one poll
    pub skipped_degrees: usize,
}

/// Drives a [`SensorSource`] through one revolution.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: SweepConfig,
    limits: ScanLimits,
}

impl Scanner {
    /// Create a scanner with no limits
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            limits: ScanLimits::default(),
        }
    }

    /// Attach sweep limits
    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Sweep one revolution and leave the motors stopped.
    pub fn run<S: SensorSource>(&self, source: &mut S) -> Result<ScanReport> {
        let outcome = self.sweep(source);
        let stopped = source.stop();

        match outcome {
            Ok(report) => {
                stopped?;
                info!(
                    "Sweep complete: {} samples in {} polls ({} slowed, {} skipped)",
                    report.samples, report.polls, report.slowed_polls, report.skipped_degrees
                );
                Ok(report)
            }
            Err(e) => {
                if let Err(stop_err) = stopped {
                    warn!("Failed to stop motors after sweep error: {}", stop_err);
                }
                Err(e)
            }
        }
    }

    fn sweep<S: SensorSource>(&self, source: &mut S) -> Result<ScanReport> {
        let cfg = &self.config;
        let far = cfg.far_sentinel();
        let nominal = cfg.turn_speed;
        let slowed = cfg.turn_speed - cfg.slow_down;

        let mut scan = DistanceScan::filled(far);
        let mut polls = 0u64;
        let mut samples = 0usize;
        let mut slowed_polls = 0u64;
        let mut skipped_degrees = 0usize;

        // Highest rotation magnitude written so far; slot index is magnitude - 1
        let mut recorded = 0u32;
        let mut idle_polls = 0u64;
        let mut slow = false;

        let zero = source.read_rotation()?;
        debug!("Sweep zero reference at {} degrees", zero);

        let started = Instant::now();
        source.set_motor_speed(nominal, -nominal)?;

        loop {
            if let Some(flag) = &self.limits.cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(Error::Cancelled { degrees: recorded });
                }
            }
            if let Some(timeout) = self.limits.timeout {
                if started.elapsed() >= timeout {
                    return Err(Error::Timeout { degrees: recorded });
                }
            }

            let rotation = source.read_rotation()?;
            let magnitude = rotation.wrapping_sub(zero).unsigned_abs();
            let distance = source.read_range()? + cfg.calibration_offset;
            polls += 1;

            let near = distance < cfg.min_distance;
            if magnitude < FULL_TURN {
                if near {
                    source.set_motor_speed(slowed, -slowed)?;
                    slowed_polls += 1;
                } else {
                    source.set_motor_speed(nominal, -nominal)?;
                }
                if near != slow {
                    debug!(
                        "{} at {} degrees ({:.1} cm)",
                        if near { "Slowing" } else { "Resuming" },
                        magnitude,
                        distance
                    );
                    slow = near;
                }
            }

            let reached = magnitude.min(FULL_TURN);
            if reached > recorded {
                skipped_degrees += (reached - recorded - 1) as usize;
                let value = if near { distance } else { far };
                scan.set((reached - 1) as usize, value);
                samples += 1;
                recorded = reached;
                idle_polls = 0;
            } else {
                idle_polls += 1;
                if let Some(limit) = self.limits.stall_polls {
                    if idle_polls >= limit {
                        return Err(Error::Stalled {
                            degrees: recorded,
                            polls: idle_polls,
                        });
                    }
                }
            }

            if magnitude >= FULL_TURN {
                break;
            }
        }

        if skipped_degrees > 0 {
            warn!(
                "Rotation outran polling: {} degrees left at the far sentinel",
                skipped_degrees
            );
        }

        Ok(ScanReport {
            scan,
            polls,
            samples,
            slowed_polls,
            skipped_degrees,
        })
    }
}
