//! Best-score persistence
//!
//! A single record `{"high_score": n}` in a JSON file. Read failures of any
//! kind mean "no prior best" and are never surfaced to the player; write
//! failures are logged and swallowed so a lost update can never crash the
//! running game.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub const DEFAULT_FILE: &'static str = "high_score.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted best; 0 on absence or corruption
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str::<ScoreFile>(&text) {
                Ok(file) => {
                    log::info!("loaded best score {} from {:?}", file.high_score, self.path);
                    file.high_score
                }
                Err(err) => {
                    log::warn!("malformed score file {:?}: {err}; starting at 0", self.path);
                    0
                }
            },
            Err(err) => {
                log::debug!("no score file at {:?}: {err}", self.path);
                0
            }
        }
    }

    /// Overwrite the persisted best. Callers only invoke this on a strict
    /// improvement; failure is logged and the game carries on.
    pub fn save(&self, high_score: u32) {
        let record = ScoreFile { high_score };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(err) => {
                log::error!("could not encode score record: {err}");
                return;
            }
        };
        match fs::write(&self.path, json) {
            Ok(()) => log::info!("saved best score {high_score} to {:?}", self.path),
            Err(err) => log::error!("could not write {:?}: {err}", self.path),
        }
    }
}

impl Default for BestScoreStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}
