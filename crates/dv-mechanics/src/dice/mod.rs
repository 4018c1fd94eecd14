//! Sources of randomness.
//!
//! Every random decision in the game goes through the [`Roller`] trait, so a
//! game can run on a seeded [`Dice`] or replay a fixed script in tests with
//! [`ScriptedRoller`]. Weighted outcomes are percentile rolls matched
//! against enumerated bands.

pub mod scripted;

pub use scripted::ScriptedRoller;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of random integers.
pub trait Roller {
    /// A uniform value in the half-open range `low..high`.
    ///
    /// Returns `low` when the range is empty.
    fn range(&mut self, low: i32, high: i32) -> i32;

    /// A percentile roll in `0..100`.
    fn percent(&mut self) -> u32 {
        u32::try_from(self.range(0, 100)).unwrap_or(0)
    }

    /// True with `percent` in 100 odds.
    fn chance(&mut self, percent: u32) -> bool {
        self.percent() < percent
    }

    /// A uniform index into a slice of length `len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let high = i32::try_from(len).unwrap_or(i32::MAX);
        usize::try_from(self.range(0, high)).unwrap_or(0)
    }
}

/// A [`Roller`] backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// Dice that produce the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Roller for Dice {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }
}
