//! Game state and core simulation types
//!
//! Everything the gameplay scene owns lives here, fully populated at creation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::schedule::{Scheduler, TimerTask};
use crate::tuning::Tuning;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// From 0xRRGGBB
    pub fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_hex(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }

    /// CSS `#rrggbb` string
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Uniformly random color
    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.random(), rng.random(), rng.random())
    }
}

/// The player's rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgb,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}

/// A scrolling enemy rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgb,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Scrolled fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Something that happened during a tick (for hosts and tests)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyHit { id: u32, score: u32 },
    EnemyDespawned { id: u32 },
    LaunchStarted { from_y: f32 },
    LaunchFinished,
}

/// Complete gameplay state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// True from launch trigger until the launch tween completes
    pub is_launching: bool,
    /// Player placement at creation; respawn target
    pub original_firing_position: Vec2,
    /// Horizontal tile offset of the starfield
    pub background_offset: f32,
    /// Frames ticked so far
    pub frame: u64,
    /// Sum of all frame deltas (ms)
    pub elapsed_ms: f64,
    pub scheduler: Scheduler,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create the gameplay scene: player, starfield and the enemy spawn timer
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let start = tuning.player_start();
        let player = Player {
            pos: start,
            size: Vec2::splat(tuning.player_size),
            color: Rgb::from_hex(tuning.player_color),
        };

        let mut scheduler = Scheduler::new();
        scheduler.add_timer(tuning.spawn_period_ms, None, TimerTask::SpawnEnemy);

        log::info!(
            "Gameplay created (seed {}, player at {:?}, spawn every {}ms)",
            seed,
            start,
            tuning.spawn_period_ms
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            original_firing_position: player.pos,
            tuning,
            player,
            enemies: Vec::new(),
            score: 0,
            is_launching: false,
            background_offset: 0.0,
            frame: 0,
            elapsed_ms: 0.0,
            scheduler,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an enemy at a random position right of the screen with a random color
    pub fn spawn_random_enemy(&mut self) -> u32 {
        let (min_x, max_x) = self.tuning.spawn_x;
        let x = self.rng.random_range(min_x..=max_x) as f32;
        let y = self.rng.random_range(0..=self.tuning.screen_height as i32) as f32;
        let color = Rgb::random(&mut self.rng);
        self.spawn_enemy(Vec2::new(x, y), color)
    }

    /// Append an enemy to the collection
    pub fn spawn_enemy(&mut self, pos: Vec2, color: Rgb) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            size: Vec2::splat(self.tuning.enemy_size),
            color,
        });
        log::debug!("Enemy {} spawned at ({}, {})", id, pos.x, pos.y);
        self.events.push(GameEvent::EnemySpawned { id, pos });
        id
    }

    /// Put the player back at the original firing position
    pub fn respawn_player(&mut self) {
        self.player.pos = self.original_firing_position;
    }

    /// Score display text
    pub fn score_label(&self) -> String {
        format!("Player Score: {}", self.score)
    }
}
