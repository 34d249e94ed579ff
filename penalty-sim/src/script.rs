use log::*;
use penalty_box::{Infraction, PenaltyKind, Team};
use serde::Deserialize;
use std::{fs::read_to_string, path::Path};
use thiserror::Error;

/// A game to replay, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameScript {
    /// Minutes of play
    pub length: f64,
    pub full_strength: Option<u8>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ScriptEvent {
    Penalty {
        at: f64,
        team: Team,
        player: u8,
        #[serde(default)]
        infraction: Infraction,
        /// Overrides the usual kind for the infraction
        kind: Option<PenaltyKind>,
    },
    Goal {
        at: f64,
        team: Team,
        player: Option<u8>,
    },
}

impl ScriptEvent {
    pub fn at(&self) -> f64 {
        match self {
            Self::Penalty { at, .. } | Self::Goal { at, .. } => *at,
        }
    }
}

impl GameScript {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let script_file = read_to_string(path)?;
        Self::from_toml(&script_file)
    }

    /// Parses a script and puts its events in time order.
    pub fn from_toml(script: &str) -> Result<Self, ScriptError> {
        let mut script: Self = toml::from_str(script)?;

        if !script.length.is_finite() {
            return Err(ScriptError::NotFinite(script.length));
        }
        if script.length < 0.0 {
            return Err(ScriptError::NegativeTime(script.length));
        }
        for event in script.events.iter() {
            let at = event.at();
            if !at.is_finite() {
                return Err(ScriptError::NotFinite(at));
            }
            if at < 0.0 {
                return Err(ScriptError::NegativeTime(at));
            }
            if at > script.length {
                return Err(ScriptError::EventAfterEnd {
                    at,
                    length: script.length,
                });
            }
        }

        script.events.sort_by(|a, b| a.at().total_cmp(&b.at()));
        debug!(
            "Loaded a {} minute game script with {} events",
            script.length,
            script.events.len()
        );
        Ok(script)
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not read game script: {0}")]
    Read(#[from] std::io::Error),
    #[error("Could not parse game script: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Event at {at} minutes is after the end of the game ({length} minutes)")]
    EventAfterEnd { at: f64, length: f64 },
    #[error("Negative game time: {0}")]
    NegativeTime(f64),
    #[error("Game time must be a finite number of minutes, got {0}")]
    NotFinite(f64),
}
