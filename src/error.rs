use rand_distr::BernoulliError;
use thiserror::Error;

/// Errors that can occur while building a [`SkipSet`](crate::SkipSet).
///
/// Once built, the set's operations cannot fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipSetError {
    #[error("a skip set must have at least one level")]
    ZeroLevels,
    #[error("invalid coin probability: {0}")]
    InvalidProbability(#[from] BernoulliError),
}
