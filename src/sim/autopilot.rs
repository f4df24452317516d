//! Demo/idle mode controller
//!
//! Produces the input a simple player would: drift back to the start column
//! and jump when an obstacle in the running lane gets close.

use super::state::{GameState, Obstacle};
use crate::input::InputSnapshot;

/// Column the autopilot keeps the player near (pixels of slack either side)
const HOME_SLACK: f32 = 4.0;

/// Pick this frame's input for the current state
pub fn autopilot(state: &GameState) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    let player = &state.player;
    let config = &state.config;

    if player.pos.x < config.player_start_x - HOME_SLACK {
        input.right = true;
    } else if player.pos.x > config.player_start_x + HOME_SLACK {
        input.left = true;
    }

    if player.airborne {
        return input;
    }

    // Jump early enough that the apex lines up with the obstacle
    let airtime = 2.0 * player.jump_impulse / player.gravity;
    let lead = config.game_speed * airtime * 0.5 + player.radius;

    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.right() >= player.pos.x - player.radius)
        .filter(|o| blocks_lane(o, state))
        .map(|o| o.left() - (player.pos.x + player.radius))
        .fold(f32::INFINITY, f32::min);

    if threat <= lead {
        input.jump = true;
    }

    input
}

/// Whether the obstacle can reach the band the grounded player occupies
fn blocks_lane(obstacle: &Obstacle, state: &GameState) -> bool {
    let player_top = state.ground_y() - 2.0 * state.player.radius;
    let lowest = match obstacle.kind {
        super::state::ObstacleKind::Floating => {
            obstacle.base_y + obstacle.size.y + state.config.float_amplitude
        }
        _ => state.ground_y(),
    };
    lowest > player_top
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::ObstacleKind;

    fn state_with(x: f32, kind: ObstacleKind) -> GameState {
        let mut state = GameState::new(GameConfig::default(), 1);
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::ground(id, x, Vec2::new(20.0, 40.0), state.ground_y());
        obstacle.kind = kind;
        if kind == ObstacleKind::Floating {
            obstacle.base_y = 100.0;
            obstacle.pos.y = 100.0;
        }
        state.obstacles.push(obstacle);
        state
    }

    #[test]
    fn test_jumps_when_obstacle_close() {
        let state = state_with(80.0, ObstacleKind::Ground);
        assert!(autopilot(&state).jump);
    }

    #[test]
    fn test_waits_when_obstacle_far() {
        let state = state_with(700.0, ObstacleKind::Ground);
        assert!(!autopilot(&state).jump);
    }

    #[test]
    fn test_ignores_high_floaters() {
        let state = state_with(80.0, ObstacleKind::Floating);
        assert!(!autopilot(&state).jump);
    }

    #[test]
    fn test_returns_home() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.player.pos.x = 300.0;
        let input = autopilot(&state);
        assert!(input.left && !input.right);
    }
}
