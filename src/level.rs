use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution};
use tracing::trace;

use crate::error::SkipSetError;

/// The number of levels a skip set has unless told otherwise.
pub const DEFAULT_LEVELS: usize = 4;

/// The chance that a single coin flip lands heads unless told otherwise.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Upon insertion of a new value, the value is replicated to higher levels as determined by a
/// `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level generator.
    fn total(&self) -> usize;

    /// Generate the highest level a new value will occupy, in the range `[0, total)`.
    ///
    /// This must never return a level that is `>= self.total()`.
    fn random(&mut self) -> usize;
}

/// A level generator that flips `total - 1` independent coins and counts the heads.
///
/// With the defaults this yields a level in `0..=3` following a binomial spread rather than the
/// geometric spread of a classical skip list, so the upper levels are more densely populated.
#[derive(Debug, Clone)]
pub struct CoinFlipLevels<R = StdRng> {
    total: usize,
    coin: Bernoulli,
    rng: R,
}

impl CoinFlipLevels<StdRng> {
    /// Create a generator with [`DEFAULT_LEVELS`] levels and a fair coin, seeded from the
    /// operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self::fair(DEFAULT_LEVELS, StdRng::from_entropy())
    }
}

impl<R: Rng> CoinFlipLevels<R> {
    /// Create a new generator with `total` levels drawing from `rng`.
    ///
    /// `probability` is the chance that each coin flip lands heads. Defaults to 0.5.
    ///
    /// # Examples
    /// ```
    /// use hopscotch_set::level::{CoinFlipLevels, LevelGenerator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut levels = CoinFlipLevels::new(4, None, StdRng::seed_from_u64(7)).unwrap();
    /// assert!(levels.random() < 4);
    /// ```
    pub fn new(total: usize, probability: Option<f64>, rng: R) -> Result<Self, SkipSetError> {
        if total == 0 {
            return Err(SkipSetError::ZeroLevels);
        }

        let coin = Bernoulli::new(probability.unwrap_or(DEFAULT_PROBABILITY))?;
        Ok(CoinFlipLevels { total, coin, rng })
    }

    /// A generator with a fair coin. `total` must be non-zero.
    pub(crate) fn fair(total: usize, rng: R) -> Self {
        debug_assert!(total > 0);
        CoinFlipLevels {
            total,
            coin: Bernoulli::new(DEFAULT_PROBABILITY).expect("0.5 is a valid probability"),
            rng,
        }
    }
}

impl<R: Rng> LevelGenerator for CoinFlipLevels<R> {
    fn total(&self) -> usize {
        self.total
    }

    fn random(&mut self) -> usize {
        let heads = (1..self.total)
            .filter(|_| self.coin.sample(&mut self.rng))
            .count();
        trace!(level = heads, "drew level");

        heads
    }
}
