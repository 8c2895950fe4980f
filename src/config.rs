//! # Host Configuration
//!
//! The host reads a single TOML file holding the scaler limits and the replay
//! policy.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [scaler]
//! zero_tolerance = 0.01
//!
//! [scaler.bounds]
//! beta_dot = [-1.0, 1.0]
//! beta_accel = [-2.0, 2.0]
//! phi_accel = [-3.0, 3.0]
//!
//! [replay]
//! on_infeasible = "halt"
//! ```
//!
//! - `zero_tolerance` defaults to `1e-2` when omitted.
//! - The `[replay]` table is optional; infeasible samples halt by default.

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use swerve_shared::{BoundsError, ScalerConfig};
use thiserror::Error;

use crate::replay::InfeasiblePolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid scaler config: {0}")]
    Invalid(#[from] BoundsError),
}

/// Main configuration struct for the scaler host.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scaler: ScalerConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Sample log replay options.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub on_infeasible: InfeasiblePolicy,
}

impl Config {
    pub fn validate(&self) -> Result<(), BoundsError> {
        self.scaler.validate()
    }
}

pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let config: Config = match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                return Err(ConfigError::Toml(e));
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            return Err(ConfigError::Io(e));
        }
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const BOUNDS: &str = "[scaler.bounds]\nbeta_dot = [-1.0, 1.0]\nbeta_accel = [-2.0, 2.0]\nphi_accel = [-3.0, 3.0]\n";

    #[test]
    fn test_load_config_success() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{}[replay]\non_infeasible = 'abort'", BOUNDS).unwrap();
        file.flush().unwrap();
        let config = load_config(file_path.to_str().unwrap()).unwrap();
        assert_eq!(config.replay.on_infeasible, InfeasiblePolicy::Abort);
        assert_eq!(config.scaler.bounds.beta_accel.hi, 2.0);
        // Defaults for missing fields
        assert_eq!(config.scaler.zero_tolerance, 1e-2);
    }

    #[test]
    fn test_replay_table_is_optional() {
        let config: Config = toml::from_str(BOUNDS).unwrap();
        assert_eq!(config.replay.on_infeasible, InfeasiblePolicy::Halt);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent_file.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "not a valid toml").unwrap();
        file.flush().unwrap();
        let result = load_config(file_path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_config_missing_bounds() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[scaler]\nzero_tolerance = 0.1\n").unwrap();
        let result = load_config(file_path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_config_rejects_negative_tolerance() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tolerance.toml");
        std::fs::write(&file_path, format!("[scaler]\nzero_tolerance = -1.0\n{}", BOUNDS)).unwrap();
        let result = load_config(file_path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Invalid(BoundsError::InvalidTolerance(_)))));
    }
}
