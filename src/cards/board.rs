//! The dealt board.
//!
//! A `Board` is an ordered sequence of `2 * pairs` cards holding exactly two
//! cards per symbol, taken from the front of the palette. Boards are
//! immutable; reconfiguring a session deals a fresh one.
//!
//! ## Usage
//!
//! ```
//! use memory_match::cards::{Board, Symbol};
//! use memory_match::core::{GameRng, PairCount};
//!
//! let mut rng = GameRng::new(42);
//! let board = Board::deal(PairCount::new(3).unwrap(), &mut rng);
//!
//! assert_eq!(board.len(), 6);
//! assert_eq!(board.positions_of(Symbol::Red).len(), 2);
//! assert!(board.positions_of(Symbol::Cyan).is_empty());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use super::symbol::Symbol;
use crate::core::config::PairCount;
use crate::core::error::{GameError, Result};
use crate::core::index::CardIndex;
use crate::core::rng::GameRng;

/// An ordered, shuffled board of paired cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
    pairs: PairCount,
}

impl Board {
    /// Deal a shuffled board with `pairs` pairs.
    ///
    /// Takes the first `pairs` palette symbols, duplicates each, and applies
    /// a uniform random permutation.
    #[must_use]
    pub fn deal(pairs: PairCount, rng: &mut GameRng) -> Self {
        let mut symbols: Vec<Symbol> = Symbol::first(pairs.get())
            .iter()
            .flat_map(|&symbol| [symbol, symbol])
            .collect();

        rng.shuffle(&mut symbols);

        Self::from_ordered(symbols, pairs)
    }

    /// Build a board from a fixed layout.
    ///
    /// Every symbol in `symbols` must appear exactly twice, and the symbols
    /// must be a palette prefix, as `deal` would pick. Useful for hosts that
    /// restore a saved layout and for scripted games.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Result<Self> {
        let mut counts: FxHashMap<Symbol, usize> = FxHashMap::default();
        for &symbol in &symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        if let Some((&symbol, &count)) = symbols
            .iter()
            .filter_map(|symbol| counts.get_key_value(symbol))
            .find(|&(_, &count)| count != 2)
        {
            return Err(GameError::UnpairedSymbol { symbol, count });
        }

        let pairs = PairCount::new(counts.len())?;
        let allowed = Symbol::first(pairs.get());
        if let Some(&symbol) = symbols.iter().find(|symbol| !allowed.contains(symbol)) {
            return Err(GameError::OffPalette {
                symbol,
                pairs: pairs.get(),
            });
        }

        Ok(Self::from_ordered(symbols, pairs))
    }

    fn from_ordered(symbols: Vec<Symbol>, pairs: PairCount) -> Self {
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| Card::new(CardIndex::from(i), symbol))
            .collect();

        Self { cards, pairs }
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> PairCount {
        self.pairs
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Does `index` address a card on this board?
    #[must_use]
    pub fn contains(&self, index: CardIndex) -> bool {
        index.as_usize() < self.cards.len()
    }

    /// Get the card at `index`.
    #[must_use]
    pub fn get(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index.as_usize())
    }

    /// Get the symbol at `index`.
    #[must_use]
    pub fn symbol_at(&self, index: CardIndex) -> Option<Symbol> {
        self.get(index).map(|card| card.symbol)
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Iterate over symbols in board order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cards.iter().map(|card| card.symbol)
    }

    /// Positions holding `symbol`: two for symbols in play, none otherwise.
    #[must_use]
    pub fn positions_of(&self, symbol: Symbol) -> SmallVec<[CardIndex; 2]> {
        self.cards
            .iter()
            .filter(|card| card.symbol == symbol)
            .map(|card| card.index)
            .collect()
    }

    /// The position holding the other card of `index`'s pair.
    #[must_use]
    pub fn partner_of(&self, index: CardIndex) -> Option<CardIndex> {
        let card = self.get(index)?;
        self.cards
            .iter()
            .find(|other| card.pairs_with(other))
            .map(|other| other.index)
    }
}
