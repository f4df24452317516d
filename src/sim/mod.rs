//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Aabb, first_collision};
pub use spawn::{maybe_spawn, try_spawn};
pub use state::{Facing, GameOverReason, GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{FrameResult, advance};
