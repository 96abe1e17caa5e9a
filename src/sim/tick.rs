//! Per-frame simulation step
//!
//! A frame is: drain due timers/tweens, then run the update rules in fixed order.

use super::collision::boxes_collide;
use super::schedule::{Task, TimerTask, TweenDone, TweenTarget};
use super::state::{GameEvent, GameState};
use crate::clamp;

/// Held state of the bound triggers for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Launch the player upward
    pub fire: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the game by one host frame of `delta_ms` milliseconds
pub fn tick(state: &mut GameState, input: &FrameInput, delta_ms: f32) {
    state.events.clear();
    state.frame += 1;
    state.elapsed_ms += delta_ms as f64;

    run_scheduled(state, delta_ms);
    update_frame(state, input, delta_ms);
}

/// Advance timers and tweens, applying every task that came due
pub fn run_scheduled(state: &mut GameState, delta_ms: f32) {
    for task in state.scheduler.advance(delta_ms) {
        apply_task(state, task);
    }
}

fn apply_task(state: &mut GameState, task: Task) {
    match task {
        Task::Timer(TimerTask::SpawnEnemy) => {
            state.spawn_random_enemy();
        }
        Task::Tween {
            target: TweenTarget::PlayerY,
            value,
        } => {
            state.player.pos.y = value;
        }
        Task::TweenComplete(TweenDone::FinishLaunch) => {
            state.respawn_player();
            // Pin y so the player never shows at the top for a frame
            state.player.pos.y = state.original_firing_position.y;
            state.is_launching = false;
            log::info!("Launch finished");
            state.events.push(GameEvent::LaunchFinished);
        }
    }
}

/// Run the gameplay update rules for one frame (order matters)
pub fn update_frame(state: &mut GameState, input: &FrameInput, delta_ms: f32) {
    // Starfield scrolls per call, not per ms
    state.background_offset -= state.tuning.background_scroll;

    let step = delta_ms * state.tuning.player_speed;
    if input.left {
        state.player.pos.x -= step;
    }
    if input.right {
        state.player.pos.x += step;
    }

    clamp_player_to_bounds(state);
    resolve_collisions(state);

    if input.fire && !state.is_launching {
        start_launch(state);
    }

    scroll_enemies(state, delta_ms);
}

/// Keep the player inside the playfield horizontally; wrap vertically
pub fn clamp_player_to_bounds(state: &mut GameState) {
    let right = state.tuning.playfield_right;
    let width = state.player.size.x;
    let height = state.tuning.screen_height;
    let pos = &mut state.player.pos;

    pos.x = clamp(pos.x, 0.0, right);
    // Second clamp on the right edge can override the first
    pos.x = clamp(pos.x + width, 0.0, right) - width;

    if pos.y < 0.0 {
        pos.y = height;
    } else if pos.y > height {
        pos.y = 0.0;
    }
}

/// Score and remove every enemy overlapping the player, in spawn order
///
/// The player respawns after each hit, so later enemies are tested against
/// the respawn position within the same frame.
fn resolve_collisions(state: &mut GameState) {
    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &state.enemies[i];
        if boxes_collide(state.player.pos, state.player.size, enemy.pos, enemy.size) {
            let enemy = state.enemies.remove(i);
            state.score += state.tuning.score_per_hit;
            log::debug!("Enemy {} hit, score {}", enemy.id, state.score);
            state.events.push(GameEvent::EnemyHit {
                id: enemy.id,
                score: state.score,
            });
            state.respawn_player();
        } else {
            i += 1;
        }
    }
}

fn start_launch(state: &mut GameState) {
    state.is_launching = true;
    let from_y = state.player.pos.y;
    state.scheduler.add_tween(
        TweenTarget::PlayerY,
        from_y,
        state.tuning.launch_target_y,
        state.tuning.launch_duration_ms,
        TweenDone::FinishLaunch,
    );
    log::info!("Launch started from y={}", from_y);
    state.events.push(GameEvent::LaunchStarted { from_y });
}

/// Scroll enemies left and drop the ones fully off screen
fn scroll_enemies(state: &mut GameState, delta_ms: f32) {
    let step = delta_ms * state.tuning.enemy_speed;
    let events = &mut state.events;
    state.enemies.retain_mut(|enemy| {
        enemy.pos.x -= step;
        if enemy.is_off_screen() {
            log::debug!("Enemy {} scrolled off screen", enemy.id);
            events.push(GameEvent::EnemyDespawned { id: enemy.id });
            false
        } else {
            true
        }
    });
}

/// Demo AI: chase the leftmost live enemy and launch when lined up with it
pub fn autopilot(state: &GameState) -> FrameInput {
    let mut input = FrameInput::default();

    let target = state
        .enemies
        .iter()
        .filter(|e| e.pos.x + e.size.x >= 0.0)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(enemy) = target {
        // Player x can't go past playfield_right - width
        let max_x = state.tuning.playfield_right - state.player.size.x;
        let aim_x = enemy.pos.x.min(max_x);
        let dx = aim_x - state.player.pos.x;
        if dx < -5.0 {
            input.left = true;
        } else if dx > 5.0 {
            input.right = true;
        }

        let half_width = (state.player.size.x + enemy.size.x) / 2.0;
        let reachable = (enemy.pos.x - state.player.pos.x).abs() <= half_width;
        input.fire = reachable && !state.is_launching;
    }

    input
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::Rgb;
    use crate::tuning::Tuning;

    fn new_state() -> GameState {
        GameState::new(12345, Tuning::default())
    }

    fn held(fire: bool, left: bool, right: bool) -> FrameInput {
        FrameInput { fire, left, right }
    }

    #[test]
    fn test_background_scrolls_per_call() {
        let mut state = new_state();
        tick(&mut state, &FrameInput::default(), 16.0);
        tick(&mut state, &FrameInput::default(), 100.0);
        assert_eq!(state.background_offset, -8.0);
    }

    #[test]
    fn test_horizontal_movement() {
        let mut state = new_state();
        tick(&mut state, &held(false, true, false), 100.0);
        assert_eq!(state.player.pos.x, 270.0);

        tick(&mut state, &held(false, false, true), 40.0);
        assert_eq!(state.player.pos.x, 290.0);

        // Both held cancel out
        tick(&mut state, &held(false, true, true), 100.0);
        assert_eq!(state.player.pos.x, 290.0);
    }

    #[test]
    fn test_clamp_left_edge() {
        let mut state = new_state();
        state.player.pos.x = 0.0;
        tick(&mut state, &held(false, true, false), 16.0);
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_clamp_right_edge() {
        let mut state = new_state();
        state.player.pos.x = 600.0;
        tick(&mut state, &held(false, false, true), 1000.0);
        assert_eq!(state.player.pos.x, 620.0);
    }

    #[test]
    fn test_vertical_wrap() {
        let mut state = new_state();
        state.player.pos.y = -1.0;
        clamp_player_to_bounds(&mut state);
        assert_eq!(state.player.pos.y, 480.0);

        state.player.pos.y = 481.0;
        clamp_player_to_bounds(&mut state);
        assert_eq!(state.player.pos.y, 0.0);

        state.player.pos.y = 480.0;
        clamp_player_to_bounds(&mut state);
        assert_eq!(state.player.pos.y, 480.0);
    }

    #[test]
    fn test_collision_scores_and_respawns() {
        let mut state = new_state();
        let id = state.spawn_enemy(Vec2::new(320.0, 480.0), Rgb::WHITE);
        tick(&mut state, &FrameInput::default(), 16.0);

        assert_eq!(state.score, 10);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos, Vec2::new(320.0, 480.0));
        assert_eq!(state.score_label(), "Player Score: 10");
        assert!(state.events.contains(&GameEvent::EnemyHit { id, score: 10 }));
    }

    #[test]
    fn test_collision_after_respawn_same_frame() {
        let mut state = new_state();
        // Player moved away from the firing position
        state.player.pos = Vec2::new(100.0, 200.0);
        state.spawn_enemy(Vec2::new(100.0, 200.0), Rgb::WHITE);
        // Only reachable from the respawn position
        state.spawn_enemy(Vec2::new(320.0, 470.0), Rgb::BLACK);
        // Not reachable from either
        state.spawn_enemy(Vec2::new(500.0, 100.0), Rgb::BLACK);

        update_frame(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.score, 20);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(500.0, 100.0));
    }

    #[test]
    fn test_enemy_despawn_by_right_edge() {
        let mut state = new_state();
        let keep = state.spawn_enemy(Vec2::new(-10.0, 100.0), Rgb::WHITE);
        let gone = state.spawn_enemy(Vec2::new(-60.0, 100.0), Rgb::WHITE);

        update_frame(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, keep);
        assert!(state.events.contains(&GameEvent::EnemyDespawned { id: gone }));
    }

    #[test]
    fn test_enemies_scroll_left() {
        let mut state = new_state();
        state.spawn_enemy(Vec2::new(1000.0, 100.0), Rgb::WHITE);
        tick(&mut state, &FrameInput::default(), 100.0);
        assert_eq!(state.enemies[0].pos.x, 970.0);
    }

    #[test]
    fn test_spawn_timer_spawns_every_two_seconds() {
        let mut state = new_state();
        for _ in 0..199 {
            tick(&mut state, &FrameInput::default(), 10.0);
        }
        assert!(state.enemies.is_empty());
        tick(&mut state, &FrameInput::default(), 10.0);
        assert_eq!(state.enemies.len(), 1);
        assert!(matches!(
            state.events[0],
            GameEvent::EnemySpawned { .. }
        ));
    }

    #[test]
    fn test_launch_round_trip() {
        let mut state = new_state();
        tick(&mut state, &held(true, false, false), 16.0);
        assert!(state.is_launching);
        assert_eq!(state.scheduler.tweens().len(), 1);

        // Holding fire while launching doesn't stack tweens
        tick(&mut state, &held(true, false, false), 500.0);
        assert_eq!(state.scheduler.tweens().len(), 1);
        assert_eq!(state.player.pos.y, 240.0);

        tick(&mut state, &FrameInput::default(), 500.0);
        assert!(!state.is_launching);
        assert!(state.scheduler.tweens().is_empty());
        assert_eq!(state.player.pos.y, state.original_firing_position.y);
        assert_eq!(state.player.pos, Vec2::new(320.0, 480.0));
        assert!(state.events.contains(&GameEvent::LaunchFinished));
    }

    #[test]
    fn test_launch_retriggers_after_finish() {
        let mut state = new_state();
        tick(&mut state, &held(true, false, false), 16.0);
        tick(&mut state, &FrameInput::default(), 1000.0);
        assert!(!state.is_launching);

        tick(&mut state, &held(true, false, false), 16.0);
        assert!(state.is_launching);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::LaunchStarted { from_y }) if *from_y == 480.0
        ));
    }

    #[test]
    fn test_autopilot_chases_leftmost_enemy() {
        let mut state = new_state();
        assert_eq!(autopilot(&state), FrameInput::default());

        state.spawn_enemy(Vec2::new(900.0, 100.0), Rgb::WHITE);
        state.spawn_enemy(Vec2::new(100.0, 100.0), Rgb::WHITE);
        let input = autopilot(&state);
        assert!(input.left);
        assert!(!input.right);
        assert!(!input.fire);

        state.player.pos.x = 110.0;
        let input = autopilot(&state);
        assert!(input.fire);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        for i in 0..600 {
            let input = held(i % 90 == 0, i % 7 < 3, i % 11 < 4);
            tick(&mut state1, &input, 16.0);
            tick(&mut state2, &input, 16.0);
        }

        let json1 = serde_json::to_string(&state1).unwrap();
        let json2 = serde_json::to_string(&state2).unwrap();
        assert_eq!(json1, json2);
    }
}
