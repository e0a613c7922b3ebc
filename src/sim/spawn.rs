//! Obstacle spawn timing and velocity escalation
//!
//! Two independent escalation curves:
//! - Time: every spawn batch shortens the next interval by a fixed step,
//!   down to a floor.
//! - Passage: every `PASSES_PER_ESCALATION` obstacles leaving the field
//!   speed up every obstacle still alive.

use crate::consts::*;
use crate::difficulty::DifficultyProfile;

/// What the session should do after a scheduler step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpawnDecision {
    /// Create a batch of `SPAWN_BATCH_SIZE` obstacles at the profile's initial velocity
    pub spawn_batch: bool,
    /// Add this to every surviving obstacle's velocity (0 when no escalation fired)
    pub velocity_delta: f32,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    accumulated_ms: u32,
    spawn_interval_ms: u32,
    passed_since_escalation: u32,
}

impl SpawnScheduler {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            accumulated_ms: 0,
            spawn_interval_ms: profile.spawn_interval_ms.max(MIN_SPAWN_INTERVAL_MS),
            passed_since_escalation: 0,
        }
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        self.spawn_interval_ms
    }

    pub fn passed_since_escalation(&self) -> u32 {
        self.passed_since_escalation
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    /// Advance by `dt_ms` of play time, accounting for `passed` obstacles
    /// that left the field this tick.
    pub fn advance(&mut self, dt_ms: u32, passed: u32, profile: &DifficultyProfile) -> SpawnDecision {
        let mut decision = SpawnDecision::default();

        self.accumulated_ms = self.accumulated_ms.saturating_add(dt_ms);
        if self.accumulated_ms > self.spawn_interval_ms {
            decision.spawn_batch = true;
            self.accumulated_ms = 0;
            self.spawn_interval_ms = next_interval(self.spawn_interval_ms);
        }

        // Counted one removal at a time, so a tick that pushes the count
        // past several multiples escalates once per multiple.
        for _ in 0..passed {
            self.passed_since_escalation += 1;
            if self.passed_since_escalation >= PASSES_PER_ESCALATION {
                self.passed_since_escalation = 0;
                decision.velocity_delta += profile.velocity_increment;
            }
        }

        decision
    }
}

/// Interval after one more batch, clamped at the floor
#[inline]
pub fn next_interval(interval_ms: u32) -> u32 {
    interval_ms
        .saturating_sub(SPAWN_INTERVAL_STEP_MS)
        .max(MIN_SPAWN_INTERVAL_MS)
}
