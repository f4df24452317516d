//! Per-frame simulation step
//!
//! [`advance`] integrates one frame of variable length. Motion is scaled by
//! `dt` everywhere (semi-implicit Euler: velocity first, then position).

use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::spawn::maybe_spawn;
use super::state::{Facing, GameOverReason, GamePhase, GameState, ObstacleKind};
use crate::input::InputSnapshot;
use crate::sanitize_dt;

/// What the host needs after a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// The run ended during this call
    pub game_over_now: bool,
    pub phase: GamePhase,
    pub score: u64,
    pub elapsed: f64,
}

impl FrameResult {
    fn of(state: &GameState, game_over_now: bool) -> Self {
        Self {
            game_over_now,
            phase: state.phase,
            score: state.score,
            elapsed: state.elapsed,
        }
    }
}

/// Advance the game state by one frame of `dt` seconds.
///
/// `dt` is clamped to `[0, max_dt]` (NaN counts as 0). Once the run is over
/// this is a no-op until [`GameState::reset`].
pub fn advance(state: &mut GameState, input: &InputSnapshot, dt: f32) -> FrameResult {
    if state.phase.is_over() {
        return FrameResult::of(state, false);
    }

    let dt = sanitize_dt(dt, state.config.max_dt);
    state.frame += 1;

    move_player(state, input, dt);
    if input.jump {
        state.player.jump();
    }
    integrate_player(state, dt);

    maybe_spawn(state, dt);
    update_obstacles(state, dt);

    if let Some(index) = first_collision(&state.player, &state.obstacles) {
        let obstacle = &state.obstacles[index];
        log::info!(
            "Hit {:?} obstacle {} at t={:.2}s, score {}",
            obstacle.kind,
            obstacle.id,
            state.elapsed,
            state.score
        );
        state.phase = GamePhase::GameOver(GameOverReason::Collision);
        return FrameResult::of(state, true);
    }

    match state.config.stage_duration {
        Some(duration) => {
            let duration = f64::from(duration);
            state.elapsed = (state.elapsed + f64::from(dt)).min(duration);
            if state.elapsed >= duration {
                log::info!("Stage cleared after {:.1}s, score {}", duration, state.score);
                state.phase = GamePhase::GameOver(GameOverReason::Cleared);
                return FrameResult::of(state, true);
            }
        }
        None => state.elapsed += f64::from(dt),
    }

    FrameResult::of(state, false)
}

fn move_player(state: &mut GameState, input: &InputSnapshot, dt: f32) {
    let player = &mut state.player;
    let step = player.speed * dt;

    if input.left {
        player.pos.x -= step;
        player.facing = Facing::Left;
    }
    if input.right {
        player.pos.x += step;
        player.facing = Facing::Right;
    }

    let max_x = state.config.viewport_width - player.radius;
    player.pos.x = player.pos.x.clamp(player.radius, max_x);
}

fn integrate_player(state: &mut GameState, dt: f32) {
    let ground = state.config.ground_y() - state.player.radius;
    let player = &mut state.player;
    if !player.airborne {
        return;
    }

    player.vel_y += player.gravity * dt;
    player.pos.y += player.vel_y * dt;

    // Land only while falling; a zero-length jump frame keeps its impulse
    if player.pos.y >= ground && player.vel_y >= 0.0 {
        player.pos.y = ground;
        player.vel_y = 0.0;
        player.airborne = false;
    } else if player.pos.y < player.radius {
        // Ceiling
        player.pos.y = player.radius;
        player.vel_y = player.vel_y.max(0.0);
    }
}

/// Scroll, animate and retire obstacles; every retired obstacle scores a point
fn update_obstacles(state: &mut GameState, dt: f32) {
    let config = &state.config;
    let ground_y = config.ground_y();
    let scroll = config.game_speed * dt;

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= scroll;

        match obstacle.kind {
            ObstacleKind::Ground => {}
            ObstacleKind::Floating => {
                obstacle.timer += config.float_frequency * dt;
                obstacle.timer %= std::f32::consts::TAU;
                obstacle.pos.y = obstacle.base_y + config.float_amplitude * obstacle.timer.sin();
            }
            ObstacleKind::Hopping => {
                let rest_y = ground_y - obstacle.size.y;
                let grounded = obstacle.pos.y >= rest_y && obstacle.vel_y >= 0.0;

                obstacle.timer += dt;
                if grounded && obstacle.timer >= config.hop_interval {
                    obstacle.timer = 0.0;
                    obstacle.vel_y = -config.hop_impulse;
                }

                obstacle.vel_y += config.gravity * dt;
                obstacle.pos.y += obstacle.vel_y * dt;
                if obstacle.pos.y >= rest_y {
                    obstacle.pos.y = rest_y;
                    obstacle.vel_y = 0.0;
                }
            }
        }
    }

    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.is_offscreen());
    let removed = (before - state.obstacles.len()) as u64;
    state.score += removed;
}
