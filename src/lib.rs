//! # memory-match
//!
//! A matching-pairs ("memory") card game session.
//!
//! The player picks a number of pairs, the board is dealt with each symbol
//! twice in a uniformly random order, and cards are revealed two at a time.
//! A matching pair leaves play immediately; a mismatched pair flips back
//! down after a short delay.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: `GameSession` owns all game state. The presentation
//!    layer holds the session, calls into it, and renders from `snapshot()`.
//!
//! 2. **Tolerant Input**: Selections that cannot apply are ignored, not
//!    errors. Only configuration can fail.
//!
//! 3. **Guarded Timers**: Flip-backs are tickets tied to a round. A ticket
//!    that outlives its round is a no-op, so reconfiguring never races a
//!    pending flip-back.
//!
//! ## Modules
//!
//! - `core`: Card indices, RNG, configuration, errors
//! - `cards`: Symbols, cards, and the dealt board
//! - `session`: The game session and its snapshots
//! - `runtime`: Mutex-guarded session with tokio-driven flip-backs

pub mod core;
pub mod cards;
pub mod session;
#[cfg(feature = "runtime")]
pub mod runtime;

// Re-export commonly used types
pub use crate::core::{
    CardIndex, GameError, GameRng, GameRngState, PairCount, Result, SessionConfig,
};

pub use crate::cards::{Board, Card, Symbol, PALETTE, PALETTE_SIZE};

pub use crate::session::{
    CardState, CardView, FlipBack, GameSession, IgnoreReason, MoveOutcome, MoveRecord,
    Selection, SessionStats, Snapshot,
};

#[cfg(feature = "runtime")]
pub use crate::runtime::SharedSession;
