//! Gameplay session engine
//!
//! All gameplay logic lives here:
//! - Fixed-rate ticks driven by the caller's frame loop
//! - Seeded RNG only
//! - Stable iteration order (insertion order of obstacles)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod session;
pub mod spawn;
pub mod state;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, first_hit, intersects};
pub use session::{GameEvent, GameSession, SessionConfig, TickInput};
pub use spawn::{SpawnDecision, SpawnScheduler, next_interval};
pub use state::{Field, GamePhase, Obstacle, Player};
