//! Core types: card indices, RNG, configuration, errors.
//!
//! Nothing in here knows the game rules; the session module builds on it.

pub mod index;
pub mod rng;
pub mod config;
pub mod error;

pub use index::CardIndex;
pub use rng::{GameRng, GameRngState};
pub use config::{
    PairCount, SessionConfig, DEFAULT_FLIP_BACK_DELAY, DEFAULT_PAIR_CHOICES, DEFAULT_PAIR_COUNT,
};
pub use error::{GameError, Result};
