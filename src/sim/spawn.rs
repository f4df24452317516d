//! Obstacle generation
//!
//! Obstacles appear at the right edge with a per-second rate that ramps up
//! linearly with elapsed time. A candidate that would land closer than the
//! configured gap to an existing obstacle is dropped.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};

/// Roll the spawn chance for this frame and create an obstacle if it hits
pub fn maybe_spawn(state: &mut GameState, dt: f32) -> Option<u32> {
    let rate = state.config.spawn_rate_at(state.elapsed as f32);
    let chance = (rate * dt).clamp(0.0, 1.0);
    if chance <= 0.0 || state.rng.random::<f32>() >= chance {
        return None;
    }

    let candidate = roll_obstacle(state);
    try_spawn(state, candidate)
}

/// Add `candidate` unless it violates the minimum gap; returns its id
pub fn try_spawn(state: &mut GameState, mut candidate: Obstacle) -> Option<u32> {
    let min_gap = state.config.min_gap;
    if let Some(blocker) = state
        .obstacles
        .iter()
        .find(|o| candidate.gap_to(o) < min_gap)
    {
        log::debug!(
            "Spawn rejected: gap {:.1} to obstacle {} < {:.1}",
            candidate.gap_to(blocker),
            blocker.id,
            min_gap
        );
        return None;
    }

    candidate.id = state.next_entity_id();
    log::debug!(
        "Spawned {:?} obstacle {} at x={:.1} ({:.0}x{:.0})",
        candidate.kind,
        candidate.id,
        candidate.pos.x,
        candidate.size.x,
        candidate.size.y
    );
    let id = candidate.id;
    state.obstacles.push(candidate);
    Some(id)
}

/// Build a random obstacle at the right edge (id assigned on acceptance)
fn roll_obstacle(state: &mut GameState) -> Obstacle {
    let config = &state.config;
    let rng = &mut state.rng;
    let ground_y = config.ground_y();
    let x = config.viewport_width;

    let height = if config.obstacle_max_height > config.obstacle_min_height {
        rng.random_range(config.obstacle_min_height..config.obstacle_max_height)
    } else {
        config.obstacle_min_height
    };
    let size = Vec2::new(config.obstacle_width, height);

    let roll: f32 = rng.random();
    let kind = if roll < config.floating_chance {
        ObstacleKind::Floating
    } else if roll < config.floating_chance + config.hopping_chance {
        ObstacleKind::Hopping
    } else {
        ObstacleKind::Ground
    };

    let mut obstacle = Obstacle::ground(0, x, size, ground_y);
    obstacle.kind = kind;

    match kind {
        ObstacleKind::Ground => {}
        ObstacleKind::Floating => {
            let altitude = if config.float_max_altitude > config.float_min_altitude {
                rng.random_range(config.float_min_altitude..config.float_max_altitude)
            } else {
                config.float_min_altitude
            };
            // Keep the whole bob range inside the viewport
            let top_limit = config.float_amplitude;
            let bottom_limit = ground_y - config.float_amplitude - size.y;
            let base_y = (ground_y - altitude - size.y).clamp(top_limit.min(bottom_limit), bottom_limit);
            obstacle.base_y = base_y;
            obstacle.pos.y = base_y;
            obstacle.timer = 0.0;
        }
        ObstacleKind::Hopping => {
            // Stagger hop cycles so a row of hoppers doesn't move in lockstep
            obstacle.timer = rng.random_range(0.0..config.hop_interval.max(f32::EPSILON));
        }
    }

    obstacle
}
