//! Axis-aligned collision detection
//!
//! The player circle is approximated by its enclosing box and tested against
//! obstacle boxes with the usual four-inequality overlap test. Touching edges
//! do not count as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Index of the first obstacle the player overlaps, if any.
/// Stops at the first hit; which obstacle it is does not affect the outcome.
pub fn first_collision(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let player_box = player.bounds();
    obstacles
        .iter()
        .position(|obstacle| player_box.overlaps(&obstacle.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::ObstacleKind;

    fn boxed(min: (f32, f32), max: (f32, f32)) -> Aabb {
        Aabb::new(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1))
    }

    #[test]
    fn test_overlap() {
        let player = boxed((10.0, 10.0), (30.0, 30.0));
        let obstacle = boxed((20.0, 20.0), (40.0, 60.0));
        assert!(player.overlaps(&obstacle));
        assert!(obstacle.overlaps(&player));
    }

    #[test]
    fn test_disjoint_on_x() {
        let player = boxed((10.0, 10.0), (30.0, 30.0));
        let obstacle = boxed((31.0, 0.0), (51.0, 10.0));
        assert!(!player.overlaps(&obstacle));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = boxed((0.0, 0.0), (10.0, 10.0));
        let b = boxed((10.0, 0.0), (20.0, 10.0));
        let c = boxed((0.0, 10.0), (10.0, 20.0));
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_player_bounds_enclose_circle() {
        let mut player = Player::new(&GameConfig::default());
        player.pos = Vec2::new(20.0, 20.0);
        player.radius = 10.0;
        assert_eq!(player.bounds(), boxed((10.0, 10.0), (30.0, 30.0)));
    }

    #[test]
    fn test_first_collision_reports_first_hit() {
        let mut player = Player::new(&GameConfig::default());
        player.pos = Vec2::new(20.0, 20.0);
        player.radius = 10.0;

        let make = |id, x: f32, y: f32| Obstacle {
            id,
            kind: ObstacleKind::Ground,
            pos: Vec2::new(x, y),
            size: Vec2::new(20.0, 40.0),
            vel_y: 0.0,
            timer: 0.0,
            base_y: y,
        };

        let obstacles = vec![make(1, 100.0, 0.0), make(2, 20.0, 20.0), make(3, 15.0, 0.0)];
        assert_eq!(first_collision(&player, &obstacles), Some(1));
        assert_eq!(first_collision(&player, &obstacles[..1]), None);
    }
}
