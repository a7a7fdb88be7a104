//! A dealt card: a position and the symbol it hides.

use serde::{Deserialize, Serialize};

use super::symbol::Symbol;
use crate::core::index::CardIndex;

/// A card on the board.
///
/// Cards never change once dealt. Whether a card is face-up or matched is
/// session state, not card state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Position on the board.
    pub index: CardIndex,

    /// Face symbol.
    pub symbol: Symbol,
}

impl Card {
    #[must_use]
    pub const fn new(index: CardIndex, symbol: Symbol) -> Self {
        Self { index, symbol }
    }

    /// Do two cards form a pair?
    ///
    /// A card never pairs with itself.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.index != other.index && self.symbol == other.symbol
    }
}
