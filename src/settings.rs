//! Game settings and preferences
//!
//! Persisted as JSON next to the leaderboard. Missing fields take defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::sim::{Field, SessionConfig};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    /// Name written to the leaderboard
    pub player_name: String,
    /// Tier preselected on the menu
    pub difficulty: Difficulty,

    // === Simulation ===
    /// Fixed tick length in milliseconds
    pub tick_ms: u32,
    /// Spawn RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Storage ===
    pub leaderboard_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            player_name: "Player".to_string(),
            difficulty: Difficulty::Easy,
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
            leaderboard_path: PathBuf::from("leaderboard.txt"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring invalid settings in {}: {e}", path.display()),
            },
            Err(_) => log::info!("Using default settings"),
        }
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            GameError::PersistenceUnavailable {
                reason: e.to_string(),
            }
        })?;
        fs::write(path, json).map_err(|e| GameError::PersistenceUnavailable {
            reason: format!("{}: {e}", path.display()),
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp values a hand-edited file could get wrong
    fn sanitized(mut self) -> Self {
        if !self.field_width.is_finite() || self.field_width < PLAYER_WIDTH {
            self.field_width = DEFAULT_FIELD_WIDTH;
        }
        if !self.field_height.is_finite() || self.field_height < PLAYER_HEIGHT {
            self.field_height = DEFAULT_FIELD_HEIGHT;
        }
        if self.tick_ms == 0 {
            self.tick_ms = DEFAULT_TICK_MS;
        }
        self
    }

    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            field: self.field(),
            player_name: self.player_name.clone(),
            seed: self.seed,
        }
    }
}
