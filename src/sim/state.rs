//! Game state and core simulation types
//!
//! A run is a single owned [`GameState`]; nothing lives in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::GameConfig;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Player touched an obstacle
    Collision,
    /// Survived the full stage duration
    Cleared,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; the simulation is frozen until reset
    GameOver(GameOverReason),
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::GameOver(_))
    }
}

/// Horizontal facing, used by sprite renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player's circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre position
    pub pos: Vec2,
    pub radius: f32,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// Vertical velocity (pixels/s, negative is up)
    pub vel_y: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub airborne: bool,
    pub facing: Facing,
}

impl Player {
    /// Player standing on the ground at the configured start x
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.player_start_x,
                config.ground_y() - config.player_radius,
            ),
            radius: config.player_radius,
            speed: config.player_speed,
            vel_y: 0.0,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            airborne: false,
            facing: Facing::Right,
        }
    }

    /// Enclosing box of the circle
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }

    /// Start a jump if standing on the ground
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.vel_y = -self.jump_impulse;
        true
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Static block standing on the ground
    #[default]
    Ground,
    /// Bobs up and down in the air
    Floating,
    /// Jumps periodically from the ground
    Hopping,
}

/// An obstacle entity (axis-aligned box)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (hopping only)
    #[serde(default)]
    pub vel_y: f32,
    /// Phase accumulator (floating: radians, hopping: seconds since last hop)
    #[serde(default)]
    pub timer: f32,
    /// Resting top edge for the floating bob
    #[serde(default)]
    pub base_y: f32,
}

impl Obstacle {
    /// Static ground obstacle with its left edge at `x`
    pub fn ground(id: u32, x: f32, size: Vec2, ground_y: f32) -> Self {
        Self {
            id,
            kind: ObstacleKind::Ground,
            pos: Vec2::new(x, ground_y - size.y),
            size,
            vel_y: 0.0,
            timer: 0.0,
            base_y: ground_y - size.y,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    /// Whether this obstacle has fully left the viewport on the left side
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }

    /// Horizontal clearance to another obstacle (negative when overlapping)
    pub fn gap_to(&self, other: &Obstacle) -> f32 {
        (self.left() - other.right()).max(other.left() - self.right())
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub player: Player,
    /// Active obstacles in creation order
    pub obstacles: Vec<Obstacle>,
    /// Obstacles passed (== obstacles removed)
    pub score: u64,
    /// Seconds of gameplay this run (f64 so long endless runs keep frame precision)
    pub elapsed: f64,
    pub phase: GamePhase,
    /// Frames advanced this run (sprite animation key)
    pub frame: u64,
    /// Completed resets
    pub restarts: u32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player = Player::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player,
            obstacles: Vec::new(),
            score: 0,
            elapsed: 0.0,
            phase: GamePhase::Running,
            frame: 0,
            restarts: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Restore the initial run state. The RNG keeps its stream so the next run
    /// differs while staying reproducible from the run seed.
    pub fn reset(&mut self) {
        let mut fresh = Self::new(self.config.clone(), self.seed);
        fresh.rng = self.rng.clone();
        fresh.restarts = self.restarts + 1;
        *self = fresh;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Ground line (y grows downward)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.config.ground_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default(), 7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(!state.player.airborne);
        assert_eq!(state.player.pos.y, state.ground_y() - state.player.radius);
    }

    #[test]
    fn test_player_jump_only_from_ground() {
        let mut player = Player::new(&GameConfig::default());
        assert!(player.jump());
        assert!(player.airborne);
        assert!(player.vel_y < 0.0);
        let vel = player.vel_y;
        assert!(!player.jump());
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_obstacle_gap() {
        let size = Vec2::new(20.0, 40.0);
        let a = Obstacle::ground(1, 100.0, size, 400.0);
        let b = Obstacle::ground(2, 150.0, size, 400.0);
        assert_eq!(a.gap_to(&b), 30.0);
        assert_eq!(b.gap_to(&a), 30.0);

        let c = Obstacle::ground(3, 110.0, size, 400.0);
        assert!(a.gap_to(&c) < 0.0);
    }

    #[test]
    fn test_offscreen_uses_right_edge() {
        let size = Vec2::new(20.0, 40.0);
        assert!(!Obstacle::ground(1, -20.0, size, 400.0).is_offscreen());
        assert!(Obstacle::ground(2, -20.5, size, 400.0).is_offscreen());
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = GameState::new(GameConfig::default(), 3);
        state.score = 12;
        state.elapsed = 9.5;
        state.frame = 400;
        state.player.pos.x = 300.0;
        state.player.jump();
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::ground(id, 200.0, Vec2::new(20.0, 30.0), 400.0));
        state.phase = GamePhase::GameOver(GameOverReason::Collision);

        state.reset();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.frame, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player, Player::new(&state.config));
        assert_eq!(state.restarts, 1);
    }
}
