//! Application settings
//!
//! Settings come from an optional JSON file and are then overridden by CLI
//! flags. Every field has a default, so an empty `{}` file is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::config::INTERVAL_CEILING_MS;
use crate::game::GameConfig;

/// Default location of the high score file
pub const DEFAULT_HIGH_SCORE_FILE: &str = ".cyber_snake_high_score.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board and speed settings
    pub game: GameConfig,
    /// Where the high score is persisted
    pub high_score_file: PathBuf,
    /// Log destination; logging is off when unset
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;

        let speed = settings.game.speed;
        anyhow::ensure!(
            speed.min <= speed.max,
            "speed.min ({}) must not exceed speed.max ({})",
            speed.min,
            speed.max
        );
        anyhow::ensure!(
            speed.max < INTERVAL_CEILING_MS && speed.boost < INTERVAL_CEILING_MS,
            "speed settings must stay below {}",
            INTERVAL_CEILING_MS
        );

        Ok(settings)
    }
}
