//! Data-driven game balance
//!
//! Every gameplay constant is read from here so a JSON file can retune a run
//! without recompiling. Missing fields fall back to the defaults in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Player x and right edge are clamped to [0, playfield_right]
    pub playfield_right: f32,

    // === Player ===
    pub player_size: f32,
    pub player_start: (f32, f32),
    /// 0xRRGGBB
    pub player_color: u32,
    /// Pixels per ms while a move key is held
    pub player_speed: f32,

    // === Enemies ===
    pub enemy_size: f32,
    /// Pixels per ms, leftward
    pub enemy_speed: f32,
    pub spawn_period_ms: f32,
    /// Inclusive spawn x range
    pub spawn_x: (i32, i32),

    // === Background ===
    /// Offset change per update call
    pub background_scroll: f32,

    // === Scoring / launch ===
    pub score_per_hit: u32,
    pub launch_duration_ms: f32,
    pub launch_target_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            playfield_right: PLAYFIELD_RIGHT,

            player_size: PLAYER_SIZE,
            player_start: (PLAYER_START_X, PLAYER_START_Y),
            player_color: PLAYER_COLOR,
            player_speed: PLAYER_SPEED,

            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
            spawn_period_ms: ENEMY_SPAWN_PERIOD_MS,
            spawn_x: (ENEMY_SPAWN_X_MIN, ENEMY_SPAWN_X_MAX),

            background_scroll: BACKGROUND_SCROLL,

            score_per_hit: SCORE_PER_HIT,
            launch_duration_ms: LAUNCH_DURATION_MS,
            launch_target_y: LAUNCH_TARGET_Y,
        }
    }
}

impl Tuning {
    /// Player start position as a vector
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_start.0, self.player_start.1)
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("spawn_period_ms", self.spawn_period_ms),
            ("launch_duration_ms", self.launch_duration_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !self.playfield_right.is_finite() || self.playfield_right < self.player_size {
            return Err(TuningError::Invalid(format!(
                "playfield_right ({}) must be at least player_size ({})",
                self.playfield_right, self.player_size
            )));
        }

        if self.spawn_x.0 > self.spawn_x.1 {
            return Err(TuningError::Invalid(format!(
                "spawn_x range is empty: {}..={}",
                self.spawn_x.0, self.spawn_x.1
            )));
        }

        if self.player_color > 0xff_ffff {
            return Err(TuningError::Invalid(format!(
                "player_color {:#x} is not 0xRRGGBB",
                self.player_color
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player_start(), Vec2::new(320.0, 480.0));
        assert_eq!(tuning.spawn_x, (800, 1200));
        assert_eq!(tuning.score_per_hit, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy_speed": 0.6, "score_per_hit": 25 }"#).unwrap();
        assert_eq!(tuning.enemy_speed, 0.6);
        assert_eq!(tuning.score_per_hit, 25);
        assert_eq!(tuning.spawn_period_ms, ENEMY_SPAWN_PERIOD_MS);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            spawn_x: (700, 900),
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "spawn_x": [1200, 800] }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "spawn_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "playfield_right": 10 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }
}
