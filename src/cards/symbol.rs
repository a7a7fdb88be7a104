//! Card faces.
//!
//! A `Symbol` is compared for equality only. Boards draw their symbols from
//! the front of the fixed `PALETTE`, so a board with `n` pairs always uses
//! the same `n` symbols.

use serde::{Deserialize, Serialize};

/// A card face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Pink,
    Gray,
    Brown,
    Cyan,
}

/// Symbols in dealing order.
pub const PALETTE: [Symbol; 10] = [
    Symbol::Red,
    Symbol::Blue,
    Symbol::Green,
    Symbol::Yellow,
    Symbol::Orange,
    Symbol::Purple,
    Symbol::Pink,
    Symbol::Gray,
    Symbol::Brown,
    Symbol::Cyan,
];

/// Number of distinct symbols, and so the largest pair count.
pub const PALETTE_SIZE: usize = PALETTE.len();

impl Symbol {
    /// The first `count` palette symbols (all of them if `count` is larger).
    #[must_use]
    pub fn first(count: usize) -> &'static [Symbol] {
        &PALETTE[..count.min(PALETTE_SIZE)]
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Symbol::Red => "red",
            Symbol::Blue => "blue",
            Symbol::Green => "green",
            Symbol::Yellow => "yellow",
            Symbol::Orange => "orange",
            Symbol::Purple => "purple",
            Symbol::Pink => "pink",
            Symbol::Gray => "gray",
            Symbol::Brown => "brown",
            Symbol::Cyan => "cyan",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_palette_is_distinct() {
        let distinct: FxHashSet<_> = PALETTE.iter().collect();
        assert_eq!(distinct.len(), PALETTE_SIZE);
        assert_eq!(PALETTE_SIZE, 10);
    }

    #[test]
    fn test_first() {
        assert_eq!(Symbol::first(3), &[Symbol::Red, Symbol::Blue, Symbol::Green]);
        assert_eq!(Symbol::first(0).len(), 0);
        assert_eq!(Symbol::first(50).len(), PALETTE_SIZE);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Symbol::Cyan), "cyan");
        assert_eq!(Symbol::Gray.name(), "gray");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Symbol::Purple).unwrap();
        assert_eq!(json, "\"purple\"");
        let deserialized: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Symbol::Purple);
    }
}
