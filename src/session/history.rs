//! Move history and statistics for the current round.
//!
//! A move is one comparison of two face-up cards. Un-flipping a single card
//! is not a move.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Symbol;
use crate::core::index::CardIndex;

/// Result of comparing two face-up cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    Match,
    Mismatch,
}

/// A recorded comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Sequence number within the round (starts at 0).
    pub sequence: u32,

    /// Cards compared, in reveal order.
    pub cards: [CardIndex; 2],

    /// Symbols of the compared cards, in reveal order.
    pub symbols: [Symbol; 2],

    pub outcome: MoveOutcome,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(sequence: u32, cards: [CardIndex; 2], symbols: [Symbol; 2]) -> Self {
        let outcome = if symbols[0] == symbols[1] {
            MoveOutcome::Match
        } else {
            MoveOutcome::Mismatch
        };

        Self {
            sequence,
            cards,
            symbols,
            outcome,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.outcome == MoveOutcome::Match
    }
}

/// Summary of the moves made this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Comparisons made.
    pub attempts: u32,

    /// Comparisons that found a pair.
    pub matches: u32,

    /// Comparisons that did not.
    pub mismatches: u32,
}

impl SessionStats {
    /// Tally a move history.
    #[must_use]
    pub fn from_history(history: &Vector<MoveRecord>) -> Self {
        history.iter().fold(Self::default(), |mut stats, record| {
            stats.attempts += 1;
            match record.outcome {
                MoveOutcome::Match => stats.matches += 1,
                MoveOutcome::Mismatch => stats.mismatches += 1,
            }
            stats
        })
    }

    /// Fraction of attempts that found a pair.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.matches as f64 / self.attempts as f64
        }
    }
}
