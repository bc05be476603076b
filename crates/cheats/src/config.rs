//! Cheat configuration, loaded from YAML.
//!
//! Every field has a default, so an empty file yields the classic setup:
//!
//! ```yaml
//! tracker:
//!   phrase: winter
//!   speed_steps: 6
//!   chat_commands:
//!     apocalypsis: armageddon
//!     impulse9: enable_all_buildings
//! base_frame_ms: 50
//! takeover_ai:
//!   kind: Default
//!   level: Hard
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use skirmish_common::AiInfo;
use skirmish_input::TrackerConfig;

/// Speed steps are typed as Alt+1 through Alt+9.
pub const MAX_SPEED_STEPS: u8 = 9;

/// Errors from loading or validating a [`CheatConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("cheat phrase must not be empty")]
    EmptyPhrase,
    #[error("speed steps must be between 1 and 9, got {0}")]
    SpeedSteps(u8),
    #[error("base frame length must be at least 1 ms")]
    ZeroFrameLength,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheatConfig {
    pub tracker: TrackerConfig,
    /// Frame length at speed step 0. Each further step halves it.
    pub base_frame_ms: u32,
    /// AI that takes over the local player on F10.
    pub takeover_ai: AiInfo,
}

impl Default for CheatConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            base_frame_ms: 50,
            takeover_ai: AiInfo::default(),
        }
    }
}

impl CheatConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading cheat config");
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserialises to unit, not to an empty map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tracker.phrase.is_empty() {
            return Err(ConfigError::EmptyPhrase);
        }
        if !(1..=MAX_SPEED_STEPS).contains(&self.tracker.speed_steps) {
            return Err(ConfigError::SpeedSteps(self.tracker.speed_steps));
        }
        if self.base_frame_ms == 0 {
            return Err(ConfigError::ZeroFrameLength);
        }
        Ok(())
    }

    /// Frame length for a speed step: 50, 25, 12, 6, 3, 1 ms with the defaults.
    /// Never shorter than 1 ms.
    pub fn frame_length(&self, step: u8) -> Duration {
        let ms = self.base_frame_ms.checked_shr(u32::from(step)).unwrap_or(0);
        Duration::from_millis(u64::from(ms.max(1)))
    }
}
