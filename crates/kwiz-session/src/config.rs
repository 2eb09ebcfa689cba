//! Configuration loading for Chronokwiz sessions.
//!
//! All session settings are loaded from a TOML configuration file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use kwiz_core::attempts::DEFAULT_KEY_PREFIX;
use kwiz_core::MAX_ITEM_SCORE;

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KwizConfig {
    /// Scoring settings
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Custom quiz attempt counter settings
    #[serde(default)]
    pub attempts: AttemptsConfig,
    /// Quiz source settings
    #[serde(default)]
    pub source: SourceConfig,
    /// General session settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl KwizConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Serializes the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points for a placement with no ordering violations
    pub max_item_score: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_item_score: MAX_ITEM_SCORE,
        }
    }
}

/// Attempt counter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttemptsConfig {
    /// Prefix of the per-topic counter keys
    pub key_prefix: String,
    /// JSON file holding the counters
    pub store_path: PathBuf,
}

impl Default for AttemptsConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            store_path: PathBuf::from("chronokwiz_attempts.json"),
        }
    }
}

/// Quiz source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory served by the quiz source
    pub quiz_dir: PathBuf,
    /// Category requested for the daily quiz
    pub default_category: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            quiz_dir: PathBuf::from("quizzes"),
            default_category: "American".to_string(),
        }
    }
}

/// General session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Shuffle seed; shuffles are random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
}

/// Error that can occur during TOML serialization.
#[derive(Debug)]
pub struct TomlSerializeError(pub toml::ser::Error);

impl std::fmt::Display for TomlSerializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TOML serialize error: {}", self.0)
    }
}

impl std::error::Error for TomlSerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Chronokwiz Configuration

[scoring]
max_item_score = 3

[attempts]
key_prefix = "chronokwiz_attempt_"
store_path = "chronokwiz_attempts.json"

[source]
quiz_dir = "quizzes"
default_category = "American"

[session]
# seed = 42
"#
    .to_string()
}
