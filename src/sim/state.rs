//! Entities and phases owned by a game session

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Difficulty selection
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, waiting for the pause toggle
    Paused,
    /// Run ended by a collision
    GameOver,
    /// Ranked scores for one difficulty tab
    LeaderboardView,
}

/// Rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

/// A falling star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Box center
    pub pos: Vec2,
    /// Downward speed (units per tick)
    pub velocity: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2, velocity: f32) -> Self {
        Self { pos, velocity }
    }

    /// Spawn just above the top edge at the given center x
    pub fn spawn_at(x: f32, velocity: f32) -> Self {
        Self::new(Vec2::new(x, -OBSTACLE_HEIGHT / 2.0), velocity)
    }

    #[inline]
    pub fn fall(&mut self) {
        self.pos.y += self.velocity;
    }

    /// True once the obstacle has dropped past the bottom of the field
    #[inline]
    pub fn has_passed(&self, field: &Field) -> bool {
        self.pos.y > field.height
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT))
    }
}

/// The player's ship, pinned to the bottom row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Box center
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Centered horizontally, resting on the bottom edge
    pub fn spawn(field: &Field) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0, field.height - PLAYER_HEIGHT / 2.0),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// Move horizontally by `dx`, clamped so the ship stays inside the field
    pub fn steer(&mut self, dx: f32, field: &Field) {
        let half = self.size.x / 2.0;
        let max_x = (field.width - half).max(half);
        self.pos.x = (self.pos.x + dx).clamp(half, max_x);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}
