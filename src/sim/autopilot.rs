//! Demo mode - a simple bot that plays the game
//!
//! Used by the headless `simulate` command. It looks a short distance ahead,
//! finds the obstacle that will reach the ship soonest, and steers away.

use super::session::{GameSession, TickInput};
use super::state::GamePhase;
use crate::consts::*;
use crate::highscores::RecordStore;

/// Ticks of lookahead when judging whether an obstacle is a threat
const LOOKAHEAD_TICKS: f32 = 30.0;

/// Extra horizontal clearance kept around the ship
const MARGIN: f32 = 6.0;

/// Steering input for the current frame of a playing session
pub fn autopilot_input<S: RecordStore>(session: &GameSession<S>) -> TickInput {
    let mut input = TickInput::default();
    if session.phase() != GamePhase::Playing {
        return input;
    }
    let Some(player) = session.player() else {
        return input;
    };
    let field = session.field();

    let reach = (player.size.x + OBSTACLE_WIDTH) / 2.0 + MARGIN;
    let ship_top = player.pos.y - player.size.y / 2.0;

    // Soonest-arriving obstacle in our column
    let threat = session
        .obstacles()
        .iter()
        .filter(|o| (o.pos.x - player.pos.x).abs() < reach)
        .filter(|o| o.pos.y <= player.pos.y)
        .map(|o| {
            let gap = ship_top - (o.pos.y + OBSTACLE_HEIGHT / 2.0);
            (o, gap / o.velocity.max(0.01))
        })
        .filter(|(_, ticks)| *ticks < LOOKAHEAD_TICKS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((obstacle, _)) = threat {
        let go_left = obstacle.pos.x >= player.pos.x;
        let half = player.size.x / 2.0;
        // Pinned against a wall: dodge the other way
        let blocked_left = player.pos.x - half <= 0.5;
        let blocked_right = player.pos.x + half >= field.width - 0.5;
        if (go_left && !blocked_left) || blocked_right {
            input.left = true;
        } else {
            input.right = true;
        }
    } else {
        // Drift back toward the middle where there's room to dodge both ways
        let center = field.width / 2.0;
        if player.pos.x < center - reach {
            input.right = true;
        } else if player.pos.x > center + reach {
            input.left = true;
        }
    }

    input
}
