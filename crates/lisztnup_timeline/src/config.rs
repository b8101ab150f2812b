//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunables for a timeline game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Number of face-down cards kept in the center stack.
    #[serde(default = "default_center_depth")]
    center_depth: usize,

    /// Draw pile is refilled from the source when it falls below this size.
    #[serde(default = "default_draw_pile_min")]
    draw_pile_min: usize,

    /// Cards a player must hold on their timeline to win.
    #[serde(default = "default_win_target")]
    win_target: usize,

    /// Cards dealt face-up to every player before the first turn.
    #[serde(default = "default_starting_cards")]
    starting_cards: usize,

    /// Pause between two dealt cards, in milliseconds.
    #[serde(default = "default_deal_interval_ms")]
    deal_interval_ms: u64,

    /// Removal window before a wrong card leaves the timeline, in milliseconds.
    #[serde(default = "default_discard_delay_ms")]
    discard_delay_ms: u64,
}

#[instrument]
fn default_center_depth() -> usize {
    6
}

#[instrument]
fn default_draw_pile_min() -> usize {
    10
}

#[instrument]
fn default_win_target() -> usize {
    10
}

#[instrument]
fn default_starting_cards() -> usize {
    1
}

#[instrument]
fn default_deal_interval_ms() -> u64 {
    400
}

#[instrument]
fn default_discard_delay_ms() -> u64 {
    800
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            center_depth: default_center_depth(),
            draw_pile_min: default_draw_pile_min(),
            win_target: default_win_target(),
            starting_cards: default_starting_cards(),
            deal_interval_ms: default_deal_interval_ms(),
            discard_delay_ms: default_discard_delay_ms(),
        }
    }
}

impl GameConfig {
    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            win_target = config.win_target,
            center_depth = config.center_depth,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Rejects settings that would make the game unplayable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.center_depth == 0 {
            return Err(ConfigError::new("center_depth must be at least 1"));
        }
        if self.win_target == 0 {
            return Err(ConfigError::new("win_target must be at least 1"));
        }
        Ok(())
    }

    /// Deal pacing as a duration.
    pub fn deal_interval(&self) -> Duration {
        Duration::from_millis(self.deal_interval_ms)
    }

    /// Discard window as a duration.
    pub fn discard_delay(&self) -> Duration {
        Duration::from_millis(self.discard_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let config = GameConfig::from_toml("win_target = 5").unwrap();
        assert_eq!(*config.win_target(), 5);
        assert_eq!(*config.center_depth(), 6);
        assert_eq!(config.discard_delay(), Duration::from_millis(800));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = GameConfig::from_toml("center_depth = 0").unwrap_err();
        assert!(err.message.contains("center_depth"));
    }

    #[test]
    fn test_setters_chain() {
        let config = GameConfig::default().with_win_target(3).with_starting_cards(2);
        assert_eq!(*config.win_target(), 3);
        assert_eq!(*config.starting_cards(), 2);
    }
}
