//! JSON game configuration.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum GameConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_starting_score() -> i32 {
    501
}

fn default_players() -> u32 {
    2
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_starting_score")]
    pub starting_score: i32,
    #[serde(default = "default_players")]
    pub players: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_score: default_starting_score(),
            players: default_players(),
        }
    }
}

impl GameConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, GameConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), GameConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.players == 0 {
            return Err(GameError::InvalidConfig("at least one player".into()));
        }
        if self.starting_score < 2 {
            return Err(GameError::InvalidConfig(format!(
                "starting score {} cannot be finished on a double",
                self.starting_score
            )));
        }
        Ok(())
    }
}
