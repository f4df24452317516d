//! Side Runner - a 2D side-scrolling obstacle-avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `config`: Data-driven game balance and difficulty presets
//! - `input`: Keyboard/gamepad merge into a per-frame input snapshot
//! - `host`: Frame scheduling, renderer hook and delayed restart

pub mod config;
pub mod host;
pub mod input;
pub mod sim;

pub use config::{Difficulty, GameConfig};
pub use host::{Renderer, Session};
pub use input::{GamepadState, InputSnapshot, InputSource, KeyState};
pub use sim::{FrameResult, GameOverReason, GamePhase, GameState, advance};

/// Game configuration defaults (tuned from the 60 fps reference game)
pub mod consts {
    /// Viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Horizontal speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 3600.0;
    /// Upward velocity applied on jump (pixels/s)
    pub const JUMP_IMPULSE: f32 = 900.0;

    /// Obstacle scroll speed (pixels/s)
    pub const GAME_SPEED: f32 = 90.0;
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 120.0;
    /// Minimum horizontal clearance between obstacles at creation (pixels)
    pub const OBSTACLE_MIN_GAP: f32 = 80.0;

    /// Spawn attempts per second at t=0
    pub const SPAWN_RATE: f32 = 0.6;
    /// Spawn rate growth (attempts/s per second elapsed)
    pub const SPAWN_RAMP: f32 = 0.01;
    pub const MAX_SPAWN_RATE: f32 = 2.5;

    /// Share of spawns that float / hop (remainder are ground obstacles)
    pub const FLOATING_CHANCE: f32 = 0.2;
    pub const HOPPING_CHANCE: f32 = 0.15;

    /// Floating obstacle bob
    pub const FLOAT_AMPLITUDE: f32 = 20.0;
    /// radians per second
    pub const FLOAT_FREQUENCY: f32 = 3.0;
    /// Height of a floating obstacle's bottom edge above the ground (range)
    pub const FLOAT_MIN_ALTITUDE: f32 = 60.0;
    pub const FLOAT_MAX_ALTITUDE: f32 = 160.0;

    /// Hopping obstacle cycle
    pub const HOP_INTERVAL: f32 = 1.2;
    pub const HOP_IMPULSE: f32 = 600.0;

    /// Survive this long to clear the stage (seconds)
    pub const STAGE_DURATION: f32 = 60.0;
    /// Largest dt a single frame may integrate (avoids tunneling after a stall)
    pub const MAX_DT: f32 = 0.1;
    /// Delay between game over and automatic restart (seconds)
    pub const RESTART_DELAY: f32 = 1.0;

    /// Nominal frame step for hosts without a real clock
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Sanitize a frame delta: NaN/negative become 0, large values clamp to `max_dt`
#[inline]
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}
