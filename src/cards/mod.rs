//! Card system: symbols, cards, and the dealt board.
//!
//! ## Key Types
//!
//! - `Symbol`: A card face, compared for equality only
//! - `Card`: A board position and its symbol
//! - `Board`: The shuffled, paired sequence of cards for one round

pub mod board;
pub mod card;
pub mod symbol;

pub use board::Board;
pub use card::Card;
pub use symbol::{Symbol, PALETTE, PALETTE_SIZE};
