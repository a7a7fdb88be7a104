//! The game session and the values it hands to the presentation layer.
//!
//! - `GameSession`: owns the board and enforces the rules
//! - `Selection`: what a `select_card` call did
//! - `FlipBack`: ticket for a mismatched pair's delayed flip-back
//! - `Snapshot`: per-card visibility for rendering
//! - `MoveRecord` / `SessionStats`: comparisons made this round

mod game;
pub mod history;
pub mod selection;
pub mod snapshot;

pub use game::GameSession;
pub use history::{MoveOutcome, MoveRecord, SessionStats};
pub use selection::{FlipBack, IgnoreReason, Selection};
pub use snapshot::{CardState, CardView, Snapshot};
