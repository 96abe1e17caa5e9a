//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied frame delta only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{Rect, boxes_collide};
pub use schedule::{Scheduler, Task, TimerTask, TweenDone, TweenTarget};
pub use state::{Enemy, GameEvent, GameState, Player, Rgb};
pub use tick::{FrameInput, autopilot, clamp_player_to_bounds, run_scheduled, tick, update_frame};
