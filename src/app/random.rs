//! Injectable randomness.
//!
//! Every random decision (ambient chance, glitch rolls, link destinations,
//! card placement) goes through [`RandomSource`], so tests can script the
//! outcomes and hosts can pin a seed for reproducible sessions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random decisions.
pub trait RandomSource: std::fmt::Debug {
    /// Returns `true` with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform integer in `low..high`.
    fn percent_between(&mut self, low: u8, high: u8) -> u8;
}

/// Production source backed by [`StdRng`].
#[derive(Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded source, for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }

    fn percent_between(&mut self, low: u8, high: u8) -> u8 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}

/// Scripted source for tests: replays queued answers, then falls back to
/// "never" for chances and the lower bound for everything else.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    chances: std::collections::VecDeque<bool>,
    indices: std::collections::VecDeque<usize>,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_chances(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(answers);
        self
    }

    #[must_use]
    pub fn with_indices(mut self, answers: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(answers);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len.max(1)
    }

    fn percent_between(&mut self, low: u8, _high: u8) -> u8 {
        low
    }
}
