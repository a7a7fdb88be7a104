//! Read-only view of a session for the presentation layer.
//!
//! A snapshot lists every card in board order with its visibility. Symbols
//! are only included for cards the player can see: face-up cards and
//! matched cards. Hidden cards carry no symbol.

use serde::{Deserialize, Serialize};

use crate::cards::Symbol;
use crate::core::config::PairCount;
use crate::core::index::CardIndex;

/// Visibility of a single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// Face-down and selectable.
    Hidden,
    /// Face-up, waiting for a comparison or a flip-back.
    FaceUp,
    /// Pair found; out of play.
    Matched,
}

/// One card as the player sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub index: CardIndex,
    pub symbol: Option<Symbol>,
    pub state: CardState,
}

impl CardView {
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }
}

/// Every card of the current board, in board order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Round the snapshot was taken in.
    pub round: u64,

    /// Pairs on the board.
    pub pair_count: PairCount,

    /// Card views in board order.
    pub cards: Vec<CardView>,
}

impl Snapshot {
    /// Number of cards in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over card views in board order.
    pub fn iter(&self) -> impl Iterator<Item = &CardView> {
        self.cards.iter()
    }

    /// Get the view at `index`.
    #[must_use]
    pub fn get(&self, index: CardIndex) -> Option<&CardView> {
        self.cards.get(index.as_usize())
    }

    /// Number of cards in `state`.
    #[must_use]
    pub fn count(&self, state: CardState) -> usize {
        self.cards.iter().filter(|card| card.state == state).count()
    }

    /// Indices of the face-up cards.
    pub fn face_up(&self) -> impl Iterator<Item = CardIndex> + '_ {
        self.cards
            .iter()
            .filter(|card| card.state == CardState::FaceUp)
            .map(|card| card.index)
    }

    /// Is every card matched?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count(CardState::Matched) == self.pair_count.card_count()
    }
}
