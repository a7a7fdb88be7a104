//! Session configuration.
//!
//! - `PairCount`: a validated number of pairs, bounded by the palette size
//! - `SessionConfig`: everything a host picks before the first deal
//!
//! Configuration can be built in code (builder methods) or read from the
//! environment with `SessionConfig::from_env`.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use crate::cards::PALETTE_SIZE;

/// Pair count used when nothing else is configured.
pub const DEFAULT_PAIR_COUNT: usize = 10;

/// Pair counts offered to the player.
pub const DEFAULT_PAIR_CHOICES: [usize; 3] = [3, 6, 10];

/// How long a mismatched pair stays face-up.
pub const DEFAULT_FLIP_BACK_DELAY: Duration = Duration::from_secs(1);

/// Number of distinct symbols in play, validated against the palette.
///
/// ```
/// use memory_match::core::PairCount;
///
/// assert_eq!(PairCount::new(6).unwrap().get(), 6);
/// assert!(PairCount::new(0).is_err());
/// assert!(PairCount::new(11).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PairCount(usize);

impl PairCount {
    /// Largest supported pair count.
    pub const MAX: usize = PALETTE_SIZE;

    /// Validate a requested pair count.
    pub fn new(count: usize) -> Result<Self> {
        if (1..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(GameError::InvalidConfiguration {
                requested: count,
                max: Self::MAX,
            })
        }
    }

    /// Number of pairs.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of cards on a board with this many pairs.
    #[must_use]
    pub const fn card_count(self) -> usize {
        self.0 * 2
    }
}

impl TryFrom<usize> for PairCount {
    type Error = GameError;

    fn try_from(count: usize) -> Result<Self> {
        Self::new(count)
    }
}

impl From<PairCount> for usize {
    fn from(count: PairCount) -> Self {
        count.0
    }
}

impl std::fmt::Display for PairCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pairs", self.0)
    }
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Pairs dealt on the first board.
    pub pair_count: usize,

    /// Delay before a mismatched pair flips back down.
    pub flip_back_delay: Duration,

    /// Seed for board shuffles. `None` draws a seed from the OS.
    pub seed: Option<u64>,

    /// Pair counts a host offers the player.
    pub pair_choices: Vec<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            flip_back_delay: DEFAULT_FLIP_BACK_DELAY,
            seed: None,
            pair_choices: DEFAULT_PAIR_CHOICES.to_vec(),
        }
    }
}

impl SessionConfig {
    /// Read configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MEMORY_PAIRS` - initial pair count (default: 10)
    /// - `MEMORY_FLIP_DELAY_MS` - flip-back delay in milliseconds (default: 1000)
    /// - `MEMORY_SEED` - shuffle seed (default: random)
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(pairs) = read_env::<usize>("MEMORY_PAIRS") {
            config.pair_count = pairs;
        }
        if let Some(millis) = read_env::<u64>("MEMORY_FLIP_DELAY_MS") {
            config.flip_back_delay = Duration::from_millis(millis);
        }
        if let Some(seed) = read_env::<u64>("MEMORY_SEED") {
            config.seed = Some(seed);
        }

        config
    }

    /// Set the initial pair count.
    #[must_use]
    pub fn with_pair_count(mut self, count: usize) -> Self {
        self.pair_count = count;
        self
    }

    /// Set the flip-back delay.
    #[must_use]
    pub fn with_flip_back_delay(mut self, delay: Duration) -> Self {
        self.flip_back_delay = delay;
        self
    }

    /// Set a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the offered pair counts.
    #[must_use]
    pub fn with_pair_choices(mut self, choices: impl Into<Vec<usize>>) -> Self {
        self.pair_choices = choices.into();
        self
    }

    /// Check every pair count in the configuration against the palette.
    ///
    /// Returns the validated initial pair count.
    pub fn validate(&self) -> Result<PairCount> {
        for &choice in &self.pair_choices {
            PairCount::new(choice)?;
        }
        PairCount::new(self.pair_count)
    }

    /// Is `count` one of the offered pair counts?
    #[must_use]
    pub fn is_choice(&self, count: usize) -> bool {
        self.pair_choices.contains(&count)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_count_bounds() {
        assert!(PairCount::new(1).is_ok());
        assert!(PairCount::new(PALETTE_SIZE).is_ok());
        assert_eq!(
            PairCount::new(0),
            Err(GameError::InvalidConfiguration {
                requested: 0,
                max: PALETTE_SIZE
            })
        );
        assert_eq!(
            PairCount::new(PALETTE_SIZE + 1),
            Err(GameError::InvalidConfiguration {
                requested: PALETTE_SIZE + 1,
                max: PALETTE_SIZE
            })
        );
    }

    #[test]
    fn test_pair_count_card_count() {
        let pairs = PairCount::new(6).unwrap();
        assert_eq!(pairs.card_count(), 12);
        assert_eq!(format!("{}", pairs), "6 pairs");
    }

    #[test]
    fn test_pair_count_serde_validates() {
        let pairs: PairCount = serde_json::from_str("3").unwrap();
        assert_eq!(pairs.get(), 3);

        assert!(serde_json::from_str::<PairCount>("42").is_err());
        assert_eq!(serde_json::to_string(&pairs).unwrap(), "3");
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.pair_count, 10);
        assert_eq!(config.flip_back_delay, Duration::from_secs(1));
        assert_eq!(config.seed, None);
        assert_eq!(config.pair_choices, vec![3, 6, 10]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SessionConfig::default()
            .with_pair_count(3)
            .with_flip_back_delay(Duration::from_millis(250))
            .with_seed(7)
            .with_pair_choices([2, 4]);

        assert_eq!(config.pair_count, 3);
        assert_eq!(config.flip_back_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(7));
        assert!(config.is_choice(4));
        assert!(!config.is_choice(3));
    }

    #[test]
    fn test_validate_rejects_bad_choice() {
        let config = SessionConfig::default().with_pair_choices([3, 12]);
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidConfiguration {
                requested: 12,
                max: PALETTE_SIZE
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_pair_count() {
        let config = SessionConfig::default().with_pair_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = SessionConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
