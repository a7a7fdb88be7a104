//! Thread-safe session handle with real-time flip-backs.
//!
//! For hosts whose input and timers run on different threads. All
//! mutations, including the delayed flip-back, go through one mutex.

mod shared;

pub use shared::SharedSession;
