//! Pluggable per-step delay sources.
//!
//! The simulator never reaches for ambient randomness; it asks an injected
//! `DelaySource` for each step's delay. Production runs use `UniformDelay`,
//! tests use a seeded `UniformDelay` or `FixedDelay` for determinism.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of per-step processing delays.
pub trait DelaySource: Send {
    /// Delay to apply before the current step completes.
    fn next_delay(&mut self) -> Duration;
}

/// Uniformly distributed delay within a closed interval.
pub struct UniformDelay {
    min_ms: u64,
    max_ms: u64,
    rng: StdRng,
}

impl UniformDelay {
    /// Default lower bound, matching the reference run (1.0s).
    pub const DEFAULT_MIN_MS: u64 = 1000;
    /// Default upper bound, matching the reference run (3.0s).
    pub const DEFAULT_MAX_MS: u64 = 3000;

    /// Create a source drawing from `[min, max]`, seeded from the OS.
    ///
    /// Reversed bounds are reordered.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, StdRng::from_os_rng())
    }

    /// Create a deterministically seeded source (for tests).
    pub fn seeded(min: Duration, max: Duration, seed: u64) -> Self {
        Self::with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: Duration, max: Duration, rng: StdRng) -> Self {
        let a = min.as_millis() as u64;
        let b = max.as_millis() as u64;
        Self {
            min_ms: a.min(b),
            max_ms: a.max(b),
            rng,
        }
    }
}

impl Default for UniformDelay {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(Self::DEFAULT_MIN_MS),
            Duration::from_millis(Self::DEFAULT_MAX_MS),
        )
    }
}

impl DelaySource for UniformDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.random_range(self.min_ms..=self.max_ms))
    }
}

/// Constant delay, for deterministic tests and demos.
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}
