//! Environment configuration
//!
//! Mirrors what experiment drivers hand the environment: the tilt control
//! mode and the reduced-gain RL flag. Stored as JSON so runs stay
//! reproducible from a config file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How tilt commands are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Signed unit steps per axis
    #[default]
    Discrete,
    /// Real-valued commands in [-1, 1]
    Continuous,
}

/// Environment construction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnvConfig {
    pub control: ControlMode,
    /// Apply the reduced x-rotation control gain used for RL training
    pub rl_mode: bool,
}

impl EnvConfig {
    /// Load a config from a JSON file
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json).map_err(io::Error::other)?;
        log::info!("Loaded environment config from {}", path.display());
        Ok(config)
    }

    /// Save the config as pretty-printed JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Environment config saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvConfig::default();
        assert_eq!(config.control, ControlMode::Discrete);
        assert!(!config.rl_mode);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EnvConfig {
            control: ControlMode::Continuous,
            rl_mode: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
