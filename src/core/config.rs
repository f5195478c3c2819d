//! Game configuration.
//!
//! The embedding page provides:
//! - the 12 face assets (opaque strings, usually image paths)
//! - optionally, the mismatch delays and a fixed shuffle seed
//!
//! Everything else (board size, heart layout) is fixed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::face::validate_faces;

/// Number of distinct faces on the board.
pub const FACE_COUNT: usize = 12;

/// Default delay for each stage of the mismatch sequence.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Default face assets: `/game-photos/mine-1.avif` .. `/game-photos/mine-12.avif`.
#[must_use]
pub fn default_faces() -> Vec<String> {
    (1..=FACE_COUNT)
        .map(|n| format!("/game-photos/mine-{n}.avif"))
        .collect()
}

/// Session configuration.
///
/// Missing JSON fields fall back to [`GameConfig::default`].
///
/// ```
/// use photo_pair::core::GameConfig;
///
/// let config = GameConfig::from_json(r#"{ "seed": 7, "flash_delay_ms": 500 }"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.flash_delay().as_millis(), 500);
/// assert_eq!(config.reveal_delay().as_millis(), 1000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Face assets, exactly [`FACE_COUNT`] distinct non-empty strings.
    pub faces: Vec<String>,

    /// How long two mismatched cards stay face up before flashing.
    pub reveal_delay_ms: u64,

    /// How long the mismatch flash lasts. At most `clear_delay_ms`.
    pub flash_delay_ms: u64,

    /// How long after the flash starts the two cards turn back over.
    pub clear_delay_ms: u64,

    /// Fixed shuffle seed. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            faces: default_faces(),
            reveal_delay_ms: DEFAULT_DELAY_MS,
            flash_delay_ms: DEFAULT_DELAY_MS,
            clear_delay_ms: DEFAULT_DELAY_MS,
            seed: None,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl GameConfig {
    /// Create a configuration with default faces and delays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the face assets.
    #[must_use]
    pub fn with_faces<I, S>(mut self, faces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.faces = faces.into_iter().map(Into::into).collect();
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the reveal delay.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay_ms = millis(delay);
        self
    }

    /// Set the flash delay.
    #[must_use]
    pub fn with_flash_delay(mut self, delay: Duration) -> Self {
        self.flash_delay_ms = millis(delay);
        self
    }

    /// Set the clear delay.
    #[must_use]
    pub fn with_clear_delay(mut self, delay: Duration) -> Self {
        self.clear_delay_ms = millis(delay);
        self
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    #[must_use]
    pub fn flash_delay(&self) -> Duration {
        Duration::from_millis(self.flash_delay_ms)
    }

    #[must_use]
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }

    /// Check faces and delays.
    ///
    /// The flash must end no later than the cards turn back over, so a
    /// flashing card is never clickable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_faces(&self.faces)?;

        for (name, value) in [
            ("reveal", self.reveal_delay_ms),
            ("flash", self.flash_delay_ms),
            ("clear", self.clear_delay_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDelay(name));
            }
        }

        if self.flash_delay_ms > self.clear_delay_ms {
            return Err(ConfigError::FlashOutlastsClear {
                flash_ms: self.flash_delay_ms,
                clear_ms: self.clear_delay_ms,
            });
        }

        Ok(())
    }
}
