//! Starfield Launch - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawn timer, launch tween)
//! - `scene`: Menu -> Gameplay hand-off and per-frame driving
//! - `input`: Key bindings and held-key state
//! - `tuning`: Data-driven game balance
//! - `view`: Render-agnostic draw list for host renderers

pub mod error;
pub mod input;
pub mod scene;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::TuningError;
pub use input::{KeyBindings, KeyState};
pub use scene::{Director, SceneKey};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Game resolution
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Right edge the player may not cross
    pub const PLAYFIELD_RIGHT: f32 = 670.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_START_X: f32 = 320.0;
    pub const PLAYER_START_Y: f32 = 480.0;
    pub const PLAYER_COLOR: u32 = 0x7aa804;
    /// Horizontal speed (pixels per ms)
    pub const PLAYER_SPEED: f32 = 0.5;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 50.0;
    /// Leftward scroll speed (pixels per ms)
    pub const ENEMY_SPEED: f32 = 0.3;
    pub const ENEMY_SPAWN_PERIOD_MS: f32 = 2000.0;
    pub const ENEMY_SPAWN_X_MIN: i32 = 800;
    pub const ENEMY_SPAWN_X_MAX: i32 = 1200;

    /// Starfield offset change per update call (not delta-scaled)
    pub const BACKGROUND_SCROLL: f32 = 4.0;

    pub const SCORE_PER_HIT: u32 = 10;

    /// Launch tween
    pub const LAUNCH_DURATION_MS: f32 = 1000.0;
    pub const LAUNCH_TARGET_Y: f32 = 0.0;

    /// Header bar and score text placement
    pub const HEADER_HEIGHT: f32 = 50.0;
    pub const SCORE_TEXT_X: f32 = 400.0;
    pub const SCORE_TEXT_Y: f32 = 10.0;

    /// Background texture
    pub const STARFIELD_KEY: &str = "starfield";
    pub const STARFIELD_URL: &str = "assets/starfield.png";
}

/// Clamp `value` into `[min, max]` (min wins if the range is inverted)
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
