//! Input sampling
//!
//! The simulation only sees an [`InputSnapshot`]. Platforms collect keyboard
//! state from key events and poll the first gamepad once per frame, then merge
//! both here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Gamepad stick deflection needed to count as a direction
pub const AXIS_THRESHOLD: f32 = 0.5;

/// Controls asserted during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputSnapshot {
    /// Merge keyboard state with the first connected gamepad (if any)
    pub fn merge(keys: &KeyState, gamepad: Option<&GamepadState>) -> Self {
        let mut input = keys.snapshot();
        if let Some(pad) = gamepad {
            let pad = pad.snapshot();
            input.left |= pad.left;
            input.right |= pad.right;
            input.jump |= pad.jump;
        }
        input
    }
}

/// Anything that can produce a per-frame snapshot
pub trait InputSource {
    fn sample(&mut self) -> InputSnapshot;
}

/// Keys currently held, by DOM-style key name ("ArrowLeft", " ")
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Forget everything (e.g. on focus loss, when key-up events get dropped)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            left: self.is_held("ArrowLeft"),
            right: self.is_held("ArrowRight"),
            jump: self.is_held("ArrowUp") || self.is_held(" "),
        }
    }
}

/// Polled state of one gamepad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadState {
    /// Left stick horizontal axis in [-1, 1]
    pub axis_x: f32,
    /// Button 0 (A / Cross)
    pub primary_pressed: bool,
}

impl GamepadState {
    pub fn snapshot(&self) -> InputSnapshot {
        // NaN compares false on both sides, so a broken axis reads as centred
        InputSnapshot {
            left: self.axis_x < -AXIS_THRESHOLD,
            right: self.axis_x > AXIS_THRESHOLD,
            jump: self.primary_pressed,
        }
    }
}

/// Keyboard plus optional gamepad, as a browser host would hold them
#[derive(Debug, Clone, Default)]
pub struct MergedInput {
    pub keys: KeyState,
    pub gamepad: Option<GamepadState>,
}

impl InputSource for MergedInput {
    fn sample(&mut self) -> InputSnapshot {
        InputSnapshot::merge(&self.keys, self.gamepad.as_ref())
    }
}
