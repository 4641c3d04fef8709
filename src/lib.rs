//! # Hopscotch Set - a skip list set implemented in rust
//! What it says. Cuz it still skips.
//!
//! The set stores unique values of any ordered type with a minimum and maximum value. Those two
//! values double as the sentinels that bound every level of the list.
//!
//! ```
//! use hopscotch_set::SkipSet;
//!
//! let mut skipset = SkipSet::new();
//! skipset.insert(0);
//! skipset.insert(5);
//! assert!(skipset.search(&5));
//!
//! skipset.remove(&5);
//! assert!(!skipset.search(&5));
//! ```

mod error;
pub mod level;
pub mod skipset;

// Re-export the SkipSet struct and show at the top level of docs
#[doc(inline)]
pub use crate::skipset::SkipSet;

#[doc(inline)]
pub use crate::error::SkipSetError;

#[doc(inline)]
pub use crate::level::{CoinFlipLevels, LevelGenerator};
