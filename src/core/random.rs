// Platkit - core/random.rs
//
// Seeded pseudo-random draws. Not suitable for anything security-related.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 2^32: one past the largest 32-bit draw.
const DRAW_RANGE: f64 = 4_294_967_296.0;

/// Pseudo-random generator seeded once at construction.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    /// Seed from the current wall-clock time in whole seconds.
    pub fn from_time() -> Self {
        let seed = chrono::Utc::now().timestamp() as u64;
        tracing::debug!(seed, "Random generator seeded from clock");
        Self::with_seed(seed)
    }

    /// Seed explicitly, for reproducible sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        let r = f64::from(self.rng.gen::<u32>()) / DRAW_RANGE;
        debug_assert!((0.0..1.0).contains(&r));
        r
    }

    /// Uniform integer in `[0, n)`. `n` must be positive.
    pub fn next_int(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "next_int: n must be positive");

        let r = (self.next_double() * f64::from(n)).floor() as u32;
        // Rounding in the product must never yield `n` itself.
        r.min(n.saturating_sub(1))
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_time()
    }
}
