//! Axis-aligned box overlap between the player and obstacles

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive overlap test: boxes sharing an edge count as touching
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// True when the obstacle's box touches or overlaps the player's box
#[inline]
pub fn intersects(obstacle: &Obstacle, player: &Player) -> bool {
    obstacle.bounds().overlaps(&player.bounds())
}

/// Index of the first obstacle (insertion order) hitting the player
pub fn first_hit(obstacles: &[Obstacle], player: &Player) -> Option<usize> {
    obstacles.iter().position(|o| intersects(o, player))
}
