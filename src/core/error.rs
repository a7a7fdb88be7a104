//! Error types surfaced by the game session.
//!
//! Configuration is the only fallible operation. Selections that cannot
//! apply are ignored rather than reported; see `Selection::Ignored`.

use thiserror::Error;

use crate::cards::Symbol;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("pair count {requested} is outside the supported range 1..={max}")]
    InvalidConfiguration { requested: usize, max: usize },

    #[error("board layout must hold every symbol exactly twice, but {symbol} appears {count} time(s)")]
    UnpairedSymbol { symbol: Symbol, count: usize },

    #[error("a {pairs}-pair board uses the first {pairs} palette symbols, not {symbol}")]
    OffPalette { symbol: Symbol, pairs: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = GameError::InvalidConfiguration {
            requested: 11,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "pair count 11 is outside the supported range 1..=10"
        );
    }

    #[test]
    fn test_unpaired_symbol_message() {
        let err = GameError::UnpairedSymbol {
            symbol: Symbol::Red,
            count: 3,
        };
        assert!(err.to_string().contains("red appears 3 time(s)"));
    }

    #[test]
    fn test_off_palette_message() {
        let err = GameError::OffPalette {
            symbol: Symbol::Cyan,
            pairs: 1,
        };
        assert_eq!(
            err.to_string(),
            "a 1-pair board uses the first 1 palette symbols, not cyan"
        );
    }
}
