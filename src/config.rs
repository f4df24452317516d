//! Game balance configuration and difficulty presets
//!
//! Everything tunable about a run lives in [`GameConfig`]. It can be built from
//! a preset or loaded from JSON (missing fields fall back to defaults).

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Obstacle scroll speed multiplier
    pub fn speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Spawn rate multiplier (applies to base rate and ramp)
    pub fn spawn_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.6,
        }
    }

    /// Whether non-ground obstacles appear at all
    pub fn special_obstacles(&self) -> bool {
        !matches!(self, Difficulty::Easy)
    }
}

/// Tunable parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Viewport ===
    pub viewport_width: f32,
    /// Ground line sits at the bottom edge
    pub viewport_height: f32,

    // === Player ===
    pub player_start_x: f32,
    pub player_radius: f32,
    pub player_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    // === Obstacles ===
    pub game_speed: f32,
    pub obstacle_width: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
    pub min_gap: f32,
    pub spawn_rate: f32,
    pub spawn_ramp: f32,
    pub max_spawn_rate: f32,
    pub floating_chance: f32,
    pub hopping_chance: f32,
    pub float_amplitude: f32,
    pub float_frequency: f32,
    pub float_min_altitude: f32,
    pub float_max_altitude: f32,
    pub hop_interval: f32,
    pub hop_impulse: f32,

    // === Run ===
    /// `None` disables the cleared outcome (endless run)
    pub stage_duration: Option<f32>,
    pub max_dt: f32,
    pub restart_delay: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            player_start_x: PLAYER_START_X,
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            game_speed: GAME_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,
            min_gap: OBSTACLE_MIN_GAP,
            spawn_rate: SPAWN_RATE,
            spawn_ramp: SPAWN_RAMP,
            max_spawn_rate: MAX_SPAWN_RATE,
            floating_chance: FLOATING_CHANCE,
            hopping_chance: HOPPING_CHANCE,
            float_amplitude: FLOAT_AMPLITUDE,
            float_frequency: FLOAT_FREQUENCY,
            float_min_altitude: FLOAT_MIN_ALTITUDE,
            float_max_altitude: FLOAT_MAX_ALTITUDE,
            hop_interval: HOP_INTERVAL,
            hop_impulse: HOP_IMPULSE,

            stage_duration: Some(STAGE_DURATION),
            max_dt: MAX_DT,
            restart_delay: RESTART_DELAY,
        }
    }
}

impl GameConfig {
    /// Create a config from a difficulty preset
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Scale speed/spawn values by a preset (relative to the current values)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.game_speed *= preset.speed_scale();
        self.spawn_rate *= preset.spawn_scale();
        self.spawn_ramp *= preset.spawn_scale();
        self.max_spawn_rate *= preset.spawn_scale();

        if !preset.special_obstacles() {
            self.floating_chance = 0.0;
            self.hopping_chance = 0.0;
        }
    }

    /// Parse a JSON config; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid game config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("failed loading config {}", path.display()))?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Check that the values describe a playable run
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_radius", self.player_radius),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_min_height", self.obstacle_min_height),
            ("max_dt", self.max_dt),
        ];
        for (name, value) in positive {
            ensure!(value.is_finite() && value > 0.0, "{name} must be positive, got {value}");
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("game_speed", self.game_speed),
            ("min_gap", self.min_gap),
            ("spawn_rate", self.spawn_rate),
            ("spawn_ramp", self.spawn_ramp),
            ("max_spawn_rate", self.max_spawn_rate),
            ("float_amplitude", self.float_amplitude),
            ("float_frequency", self.float_frequency),
            ("float_min_altitude", self.float_min_altitude),
            ("float_max_altitude", self.float_max_altitude),
            ("hop_interval", self.hop_interval),
            ("hop_impulse", self.hop_impulse),
            ("restart_delay", self.restart_delay),
        ];
        for (name, value) in non_negative {
            ensure!(value.is_finite() && value >= 0.0, "{name} must be non-negative, got {value}");
        }

        ensure!(
            self.viewport_width >= 2.0 * self.player_radius
                && self.viewport_height >= 2.0 * self.player_radius,
            "viewport is smaller than the player"
        );
        ensure!(
            self.player_start_x >= self.player_radius
                && self.player_start_x <= self.viewport_width - self.player_radius,
            "player_start_x {} is outside [{}, {}]",
            self.player_start_x,
            self.player_radius,
            self.viewport_width - self.player_radius
        );
        ensure!(
            self.obstacle_min_height <= self.obstacle_max_height,
            "obstacle_min_height exceeds obstacle_max_height"
        );
        ensure!(
            self.obstacle_max_height <= self.viewport_height,
            "obstacle_max_height exceeds viewport_height"
        );
        ensure!(
            self.float_min_altitude <= self.float_max_altitude,
            "float_min_altitude exceeds float_max_altitude"
        );

        for (name, chance) in [
            ("floating_chance", self.floating_chance),
            ("hopping_chance", self.hopping_chance),
        ] {
            ensure!((0.0..=1.0).contains(&chance), "{name} must be within [0, 1], got {chance}");
        }
        ensure!(
            self.floating_chance + self.hopping_chance <= 1.0,
            "floating_chance + hopping_chance exceeds 1"
        );

        if let Some(duration) = self.stage_duration {
            ensure!(
                duration.is_finite() && duration > 0.0,
                "stage_duration must be positive, got {duration}"
            );
        }

        Ok(())
    }

    /// Ground line (y grows downward)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.viewport_height
    }

    /// Spawn attempts per second after `elapsed` seconds (linear ramp, capped)
    pub fn spawn_rate_at(&self, elapsed: f32) -> f32 {
        (self.spawn_rate + self.spawn_ramp * elapsed).min(self.max_spawn_rate)
    }
}
