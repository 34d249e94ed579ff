use crate::penalty::PenaltyRules;
use log::*;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of skaters a team has on the ice with nobody in the box
    pub full_strength: u8,
    pub rules: PenaltyRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            full_strength: 5,
            rules: Default::default(),
        }
    }
}

impl Config {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_file = match read_to_string(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to read config file: {}", e);
                return Err(e.into());
            }
        };

        match toml::from_str(&config_file) {
            Ok(c) => Ok(c),
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                Err(e.into())
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
