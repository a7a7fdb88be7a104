//! Card position identification.
//!
//! Every card on a board has a stable `CardIndex`: its 0-based position in
//! the board's ordered sequence. Indices are only meaningful for the board
//! they were dealt on; a reconfiguration deals a new board and reuses the
//! same index range with different symbols.
//!
//! ```
//! use memory_match::core::CardIndex;
//!
//! let first = CardIndex::new(0);
//! assert_eq!(first.as_usize(), 0);
//! assert_eq!(CardIndex::from(7usize), CardIndex::new(7));
//! ```

use serde::{Deserialize, Serialize};

/// Position of a card on the board (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIndex(pub u32);

impl CardIndex {
    /// Create a new card index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into a slice.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every index of a board with `len` cards.
    pub fn all(len: usize) -> impl Iterator<Item = CardIndex> {
        (0..len).map(CardIndex::from)
    }
}

impl From<u32> for CardIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// Saturates at `u32::MAX`, which no board can address.
impl From<usize> for CardIndex {
    fn from(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_index() {
        let index = CardIndex::new(5);
        assert_eq!(index.raw(), 5);
        assert_eq!(index.as_usize(), 5);
    }

    #[test]
    fn test_all() {
        let indices: Vec<_> = CardIndex::all(4).collect();
        assert_eq!(
            indices,
            vec![CardIndex(0), CardIndex(1), CardIndex(2), CardIndex(3)]
        );
        assert_eq!(CardIndex::all(0).count(), 0);
    }

    #[test]
    fn test_ordering() {
        assert!(CardIndex(1) < CardIndex(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardIndex(12)), "Card(12)");
    }

    #[test]
    fn test_serialization() {
        let index = CardIndex(19);
        let json = serde_json::to_string(&index).unwrap();
        let deserialized: CardIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(index, deserialized);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_from_usize_saturates() {
        let index = CardIndex::from(u32::MAX as usize + 5);
        assert_eq!(index, CardIndex(u32::MAX));

        let board = crate::cards::Board::from_symbols(vec![crate::cards::Symbol::Red; 2]).unwrap();
        assert!(!board.contains(index));
    }
}
