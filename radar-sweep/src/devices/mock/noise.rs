//! Range-sensor jitter for the simulated turntable

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

/// Zero-mean normal jitter added to every simulated range reading.
///
/// A fixed seed replays the same jitter sequence, so noisy sweeps are
/// repeatable in tests.
#[derive(Clone)]
pub struct RangeJitter {
    rng: SmallRng,
}

impl RangeJitter {
    /// Seed 0 draws from OS entropy.
    pub fn new(seed: u64) -> Self {
        let rng = match seed {
            0 => SmallRng::from_entropy(),
            s => SmallRng::seed_from_u64(s),
        };
        Self { rng }
    }

    /// Next offset in cm; always 0.0 when `stddev` is not positive
    #[inline]
    pub fn next_cm(&mut self, stddev: f32) -> f32 {
        if stddev <= 0.0 {
            return 0.0;
        }
        let z: f32 = self.rng.sample(StandardNormal);
        z * stddev
    }
}
