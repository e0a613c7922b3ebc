//! Space Dodgers - an arcade survival game
//!
//! Core modules:
//! - `sim`: Gameplay session engine (state machine, spawning, collisions)
//! - `difficulty`: Per-tier tuning table
//! - `highscores`: Leaderboard log, best-per-player reduction and ranking
//! - `settings`: JSON-backed configuration
//!
//! Rendering, input polling and audio live outside this crate.

pub mod difficulty;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::GameError;
pub use highscores::{FileStore, LeaderboardStore, MemoryStore, RecordStore, ScoreRecord};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Obstacle (star) box size
    pub const OBSTACLE_WIDTH: f32 = 10.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;

    /// Player ship box size
    pub const PLAYER_WIDTH: f32 = 35.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Obstacles created per spawn batch
    pub const SPAWN_BATCH_SIZE: usize = 8;
    /// Spawn interval shrinks by this much after each batch
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 50;
    /// Spawn interval never drops below this
    pub const MIN_SPAWN_INTERVAL_MS: u32 = 200;

    /// Passed obstacles needed to trigger a velocity escalation
    pub const PASSES_PER_ESCALATION: u32 = 8;

    /// Rows shown on the leaderboard screen
    pub const LEADERBOARD_ROWS: usize = 10;

    /// Default play field (used when settings don't say otherwise)
    pub const DEFAULT_FIELD_WIDTH: f32 = 1280.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 720.0;

    /// Default fixed tick length (~60 Hz)
    pub const DEFAULT_TICK_MS: u32 = 16;
}
