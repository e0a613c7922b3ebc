//! Difficulty tiers and their tuning table
//!
//! Profiles are immutable values handed to a session at start; nothing here
//! is mutated at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All tiers in menu order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    /// Tuning values for this tier
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                id: self,
                obstacle_velocity: 2.0,
                spawn_interval_ms: 2500,
                player_velocity: 8.0,
                velocity_increment: 0.0,
            },
            Difficulty::Medium => DifficultyProfile {
                id: self,
                obstacle_velocity: 3.0,
                spawn_interval_ms: 2000,
                player_velocity: 7.0,
                velocity_increment: 0.3,
            },
            Difficulty::Hard => DifficultyProfile {
                id: self,
                obstacle_velocity: 5.0,
                spawn_interval_ms: 1000,
                player_velocity: 6.0,
                velocity_increment: 0.7,
            },
            Difficulty::Expert => DifficultyProfile {
                id: self,
                obstacle_velocity: 7.0,
                spawn_interval_ms: 800,
                player_velocity: 5.0,
                velocity_increment: 1.7,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact tier names only; the leaderboard file stores them this way.
impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            "Expert" => Ok(Difficulty::Expert),
            other => Err(GameError::UnknownDifficulty {
                requested: other.to_string(),
            }),
        }
    }
}

/// Per-tier tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub id: Difficulty,
    /// Fall speed of freshly spawned obstacles (units per tick)
    pub obstacle_velocity: f32,
    /// Initial delay between spawn batches
    pub spawn_interval_ms: u32,
    /// Horizontal player speed (units per tick)
    pub player_velocity: f32,
    /// Added to every live obstacle's velocity on each passage escalation
    pub velocity_increment: f32,
}

/// Look up a profile by tier name
pub fn lookup(id: &str) -> Result<DifficultyProfile, GameError> {
    id.parse::<Difficulty>().map(Difficulty::profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_tiers() {
        for tier in Difficulty::ALL {
            let profile = lookup(tier.as_str()).unwrap();
            assert_eq!(profile.id, tier);
        }
        assert_eq!(lookup("Hard").unwrap().spawn_interval_ms, 1000);
        assert_eq!(lookup(" Expert ").unwrap().velocity_increment, 1.7);
    }

    #[test]
    fn test_lookup_unknown_tier() {
        assert_eq!(
            lookup("Nightmare"),
            Err(GameError::UnknownDifficulty {
                requested: "Nightmare".to_string()
            })
        );
        // Case matters
        assert!(lookup("easy").is_err());
    }

    #[test]
    fn test_harder_tiers_are_faster() {
        let profiles: Vec<_> = Difficulty::ALL.iter().map(|d| d.profile()).collect();
        for pair in profiles.windows(2) {
            assert!(pair[1].obstacle_velocity > pair[0].obstacle_velocity);
            assert!(pair[1].spawn_interval_ms < pair[0].spawn_interval_ms);
            assert!(pair[1].player_velocity < pair[0].player_velocity);
        }
    }
}
