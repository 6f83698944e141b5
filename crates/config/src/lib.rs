//! Configuration loading and validation for Switchboard.
//!
//! The dispatch core carries two knobs worth tuning per deployment: the
//! agent-turn cap and the loop-detection heuristics. Both are policy, not
//! contract — the defaults match the shipped behavior, and a TOML file can
//! override them. Everything is validated at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("failed to parse config at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dispatcher settings
    #[serde(default)]
    pub supervisor: SupervisorConfig,

    /// Loop-detection heuristics
    #[serde(default)]
    pub loop_detection: LoopDetectionConfig,
}

/// Dispatcher-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Hard cap on agent turns per run (safety limit)
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

fn default_max_turns() -> usize {
    20
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
        }
    }
}

/// Loop-detection heuristics.
///
/// The prefix length and length-difference threshold come from observed agent
/// output style; treat them as tunable policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopDetectionConfig {
    /// How many trailing messages to inspect
    #[serde(default = "default_window")]
    pub window: usize,

    /// Minimum trimmed length before the near-duplicate rule applies
    #[serde(default = "default_min_long_len")]
    pub min_long_len: usize,

    /// Prefix length compared by the near-duplicate rule
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,

    /// Relative length difference below which near-duplicates count as a loop
    #[serde(default = "default_max_len_ratio")]
    pub max_len_ratio: f64,
}

fn default_window() -> usize {
    8
}
fn default_min_long_len() -> usize {
    50
}
fn default_prefix_len() -> usize {
    150
}
fn default_max_len_ratio() -> f64 {
    0.05
}

impl Default for LoopDetectionConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            min_long_len: default_min_long_len(),
            prefix_len: default_prefix_len(),
            max_len_ratio: default_max_len_ratio(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific file path.
    ///
    /// A missing file is not an error — defaults apply.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.supervisor.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "supervisor.max_turns must be at least 1".into(),
            ));
        }

        if self.loop_detection.window < 2 {
            return Err(ConfigError::ValidationError(
                "loop_detection.window must be at least 2".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.loop_detection.max_len_ratio) {
            return Err(ConfigError::ValidationError(
                "loop_detection.max_len_ratio must be between 0.0 and 1.0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.supervisor.max_turns, 20);
        assert_eq!(config.loop_detection.window, 8);
        assert_eq!(config.loop_detection.prefix_len, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.supervisor.max_turns, config.supervisor.max_turns);
        assert_eq!(parsed.loop_detection.window, config.loop_detection.window);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/switchboard.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().supervisor.max_turns, 20);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[supervisor]
max_turns = 5
"#,
        )
        .unwrap();
        assert_eq!(config.supervisor.max_turns, 5);
        assert_eq!(config.loop_detection.window, 8);
    }

    #[test]
    fn zero_max_turns_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
[supervisor]
max_turns = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_ratio_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
[loop_detection]
max_len_ratio = 1.5
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[supervisor]
max_turns = 10

[loop_detection]
window = 6
max_len_ratio = 0.1
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.supervisor.max_turns, 10);
        assert_eq!(config.loop_detection.window, 6);
        assert!((config.loop_detection.max_len_ratio - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("max_turns"));
        assert!(toml_str.contains("loop_detection"));
    }
}
