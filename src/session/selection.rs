//! What a selection did, and the flip-back it may have scheduled.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::index::CardIndex;

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The index is not on the board.
    OutOfRange,
    /// The card's pair has already been found.
    AlreadyMatched,
    /// Two cards are face-up and waiting to flip back.
    AwaitingFlipBack,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IgnoreReason::OutOfRange => "out of range",
            IgnoreReason::AlreadyMatched => "already matched",
            IgnoreReason::AwaitingFlipBack => "awaiting flip-back",
        };
        f.write_str(label)
    }
}

/// A scheduled flip-back of a mismatched pair.
///
/// Tickets are tied to the round they were issued in. Resolving a ticket
/// from an earlier round, or one that has already been resolved, does
/// nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlipBack {
    /// Round the pair was revealed in.
    pub round: u64,

    /// First card revealed.
    pub first: CardIndex,

    /// Second card revealed.
    pub second: CardIndex,

    /// Session clock time at which the pair flips back.
    pub due: Duration,
}

impl FlipBack {
    /// Does this ticket cover `index`?
    #[must_use]
    pub fn covers(&self, index: CardIndex) -> bool {
        self.first == index || self.second == index
    }

    /// Time left until the flip-back, measured from `now`.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.due.saturating_sub(now)
    }
}

/// Outcome of `GameSession::select_card`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The card turned face-up; no comparison yet.
    Revealed(CardIndex),
    /// The lone face-up card was turned back down.
    Concealed(CardIndex),
    /// The two face-up cards matched and left play.
    Matched(CardIndex, CardIndex),
    /// The two face-up cards differ; they flip back when the ticket fires.
    Mismatched(FlipBack),
}

impl Selection {
    /// Did the selection change any state?
    #[must_use]
    pub fn changed(&self) -> bool {
        !matches!(self, Selection::Ignored(_))
    }

    /// The flip-back scheduled by this selection, if any.
    #[must_use]
    pub fn flip_back(&self) -> Option<FlipBack> {
        match self {
            Selection::Mismatched(ticket) => Some(*ticket),
            _ => None,
        }
    }
}
