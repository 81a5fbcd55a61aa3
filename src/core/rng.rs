//! Deterministic random number generation for roster fills, eliminations,
//! and vote tallies.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rosters and eliminations
//! - **Serializable**: O(1) state capture so a suspended run resumes exactly
//!
//! ```
//! use squid_run::core::RunRng;
//!
//! let mut a = RunRng::new(7);
//! let mut b = RunRng::new(7);
//! assert_eq!(a.gen_index(20), b.gen_index(20));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seedable RNG shared by every random decision in a run.
///
/// Uses ChaCha8 so checkpoints only need the seed and word position.
#[derive(Clone, Debug)]
pub struct RunRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl RunRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy. Used when the host does not care about replay.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform value in `low..high` (half-open).
    pub fn gen_range_u16(&mut self, low: u16, high: u16) -> u16 {
        self.inner.gen_range(low..high)
    }

    /// Uniform value in `low..=high`.
    pub fn gen_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.inner.gen_range(low..=high)
    }

    /// True with `percent`% probability. Values above 100 always pass.
    pub fn roll_percent(&mut self, percent: u8) -> bool {
        self.inner.gen_range(0..100u8) < percent
    }

    /// Fisher–Yates shuffle in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> RunRngState {
        RunRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &RunRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
