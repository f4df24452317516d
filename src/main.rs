//! Side Runner headless runner
//!
//! Drives a session with the autopilot at a fixed frame rate and logs each
//! run. Set `RUST_LOG=info` (or `debug` for spawn traces) to see progress.

use std::path::PathBuf;

use anyhow::{Result, anyhow, ensure};
use clap::Parser;

use side_runner::host::{NullRenderer, Renderer};
use side_runner::sim::{GameState, autopilot};
use side_runner::{Difficulty, GameConfig, Session};

#[derive(Debug, Parser)]
#[command(name = "side-runner", about = "Run the side-scroller simulation headless")]
struct Args {
    /// RNG seed for the session
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of runs to play before exiting
    #[arg(long, default_value_t = 3)]
    runs: usize,
    /// Wall-clock budget in simulated seconds
    #[arg(long, default_value_t = 600.0)]
    seconds: f32,
    /// Frames per second (frame dt = 1 / fps)
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Difficulty preset: easy, normal, hard
    #[arg(long, default_value = "normal")]
    difficulty: String,
    /// JSON config file (preset is applied on top of it)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print a text frame every N frames (0 = never)
    #[arg(long, default_value_t = 0)]
    draw_every: u64,
}

/// Logs a one-line picture of the lane every few frames
struct TextRenderer {
    every: u64,
    columns: usize,
}

impl Renderer for TextRenderer {
    fn draw(&mut self, state: &GameState) {
        if self.every == 0 || state.frame % self.every != 0 {
            return;
        }
        let scale = state.config.viewport_width / self.columns as f32;
        let mut row = vec!['.'; self.columns];
        let column = |x: f32| ((x / scale) as usize).min(self.columns - 1);

        for obstacle in &state.obstacles {
            if obstacle.right() < 0.0 || obstacle.left() >= state.config.viewport_width {
                continue;
            }
            let start = column(obstacle.left().max(0.0));
            let end = column(obstacle.right().max(0.0));
            for cell in &mut row[start..=end] {
                *cell = '#';
            }
        }
        row[column(state.player.pos.x)] = if state.player.airborne { '^' } else { 'o' };

        let line: String = row.into_iter().collect();
        log::info!("[{:6.2}s] {} score {}", state.elapsed, line, state.score);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    ensure!(args.fps.is_finite() && args.fps > 0.0, "fps must be > 0");
    ensure!(args.runs > 0, "runs must be > 0");

    let preset = Difficulty::from_str(&args.difficulty)
        .ok_or_else(|| anyhow!("unknown difficulty '{}'", args.difficulty))?;
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    config.apply_preset(preset);
    config.validate()?;

    log::info!(
        "Side Runner starting: seed {}, difficulty {}, {} run(s)",
        args.seed,
        preset.as_str(),
        args.runs
    );

    let dt = 1.0 / args.fps;
    let mut session = Session::new(config, args.seed);
    let mut text = TextRenderer {
        every: args.draw_every,
        columns: 80,
    };
    let mut null = NullRenderer;

    let mut simulated = 0.0;
    while session.runs() < args.runs && simulated < args.seconds {
        let input = autopilot(&session.state);
        if args.draw_every > 0 {
            session.frame(dt, &input, &mut text);
        } else {
            session.frame(dt, &input, &mut null);
        }
        simulated += dt;
    }

    let cleared = session.cleared_runs;
    log::info!(
        "Finished {} run(s) in {:.1}s simulated: {} cleared, best score {}",
        session.runs(),
        simulated,
        cleared,
        session.best_score
    );

    Ok(())
}
