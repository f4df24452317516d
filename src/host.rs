//! Frame host
//!
//! Stands in for the platform scheduler: one [`Session::frame`] call per
//! display refresh. After a game over the session keeps drawing the frozen
//! state, then resets once the restart delay has elapsed.

use crate::config::GameConfig;
use crate::input::InputSnapshot;
use crate::sim::{FrameResult, GameOverReason, GamePhase, GameState, advance};

/// Draws a state once per frame, after the update
pub trait Renderer {
    fn draw(&mut self, state: &GameState);
}

/// Renderer that draws nothing (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _state: &GameState) {}
}

/// Maximum number of finished runs kept in [`Session::history`]
pub const HISTORY_LENGTH: usize = 32;

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub phase: GamePhase,
    pub score: u64,
    pub elapsed: f64,
}

/// A running game plus its restart timer
#[derive(Debug)]
pub struct Session {
    pub state: GameState,
    /// Seconds left before the automatic reset (Some only after game over)
    restart_in: Option<f32>,
    pub best_score: u64,
    /// Runs that ended by clearing the stage
    pub cleared_runs: usize,
    /// Most recent runs (oldest first), capped at `HISTORY_LENGTH`
    pub history: Vec<RunSummary>,
    runs: usize,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::new(config, seed),
            restart_in: None,
            best_score: 0,
            cleared_runs: 0,
            history: Vec::with_capacity(HISTORY_LENGTH),
            runs: 0,
        }
    }

    /// Run one display frame: update (or wait out the restart delay), then draw
    pub fn frame(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        renderer: &mut impl Renderer,
    ) -> FrameResult {
        if let Some(remaining) = self.restart_in.as_mut() {
            *remaining -= crate::sanitize_dt(dt, f32::INFINITY);
            if *remaining <= 0.0 {
                self.restart_in = None;
                self.state.reset();
                log::info!("Run {} started", self.state.restarts + 1);
            }
        }

        let result = advance(&mut self.state, input, dt);

        if result.game_over_now {
            self.finish_run(&result);
        }

        renderer.draw(&self.state);
        result
    }

    /// Whether the session is counting down to a reset
    pub fn is_waiting_restart(&self) -> bool {
        self.restart_in.is_some()
    }

    /// Completed runs
    pub fn runs(&self) -> usize {
        self.runs
    }

    fn finish_run(&mut self, result: &FrameResult) {
        self.runs += 1;
        if result.phase == GamePhase::GameOver(GameOverReason::Cleared) {
            self.cleared_runs += 1;
        }
        self.history.push(RunSummary {
            phase: result.phase,
            score: result.score,
            elapsed: result.elapsed,
        });
        if self.history.len() > HISTORY_LENGTH {
            self.history.remove(0);
        }
        if result.score > self.best_score {
            self.best_score = result.score;
        }
        log::info!(
            "Run {} over: {:?}, score {}, {:.1}s (best {})",
            self.runs,
            result.phase,
            result.score,
            result.elapsed,
            self.best_score
        );
        self.restart_in = Some(self.state.config.restart_delay);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::Obstacle;

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        last_score: u64,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, state: &GameState) {
            self.frames += 1;
            self.last_score = state.score;
        }
    }

    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_rate: 0.0,
            spawn_ramp: 0.0,
            restart_delay: 0.5,
            ..GameConfig::default()
        }
    }

    fn crash(session: &mut Session) {
        let state = &mut session.state;
        let id = state.next_entity_id();
        let x = state.player.pos.x;
        let ground_y = state.ground_y();
        state
            .obstacles
            .push(Obstacle::ground(id, x, Vec2::new(20.0, 60.0), ground_y));
    }

    #[test]
    fn test_renderer_called_every_frame() {
        let mut session = Session::new(quiet_config(), 1);
        let mut renderer = CountingRenderer::default();
        for _ in 0..10 {
            session.frame(FRAME_DT, &InputSnapshot::default(), &mut renderer);
        }
        assert_eq!(renderer.frames, 10);
    }

    #[test]
    fn test_restart_after_delay() {
        let mut session = Session::new(quiet_config(), 1);
        let mut renderer = NullRenderer;
        crash(&mut session);
        session.state.score = 4;

        let result = session.frame(FRAME_DT, &InputSnapshot::default(), &mut renderer);
        assert_eq!(result.phase, GamePhase::GameOver(GameOverReason::Collision));
        assert!(session.is_waiting_restart());
        assert_eq!(session.runs(), 1);
        assert_eq!(session.best_score, 4);

        // 0.4s in: still frozen
        for _ in 0..24 {
            let result = session.frame(FRAME_DT, &InputSnapshot::default(), &mut renderer);
            assert!(result.phase.is_over());
        }
        assert_eq!(session.state.score, 4);

        // Past 0.5s: reset and running again
        let mut resumed = false;
        for _ in 0..10 {
            let result = session.frame(FRAME_DT, &InputSnapshot::default(), &mut renderer);
            if result.phase == GamePhase::Running {
                resumed = true;
                break;
            }
        }
        assert!(resumed);
        assert!(!session.is_waiting_restart());
        assert_eq!(session.state.score, 0);
        assert!(session.state.obstacles.is_empty());
        assert_eq!(session.state.restarts, 1);
    }

    #[test]
    fn test_cleared_run_recorded() {
        let config = GameConfig {
            stage_duration: Some(0.5),
            ..quiet_config()
        };
        let mut session = Session::new(config, 1);
        let mut renderer = NullRenderer;
        for _ in 0..10 {
            session.frame(0.1, &InputSnapshot::default(), &mut renderer);
        }
        assert_eq!(
            session.history[0].phase,
            GamePhase::GameOver(GameOverReason::Cleared)
        );
    }

    #[test]
    fn test_history_is_capped() {
        let config = GameConfig {
            stage_duration: Some(0.1),
            restart_delay: 0.0,
            ..quiet_config()
        };
        let mut session = Session::new(config, 1);
        let mut renderer = NullRenderer;
        let total = HISTORY_LENGTH + 8;
        let mut frames = 0;
        while session.runs() < total {
            session.frame(0.1, &InputSnapshot::default(), &mut renderer);
            frames += 1;
            assert!(frames < total * 10);
        }

        assert_eq!(session.runs(), total);
        assert_eq!(session.cleared_runs, total);
        assert_eq!(session.history.len(), HISTORY_LENGTH);
    }
}
