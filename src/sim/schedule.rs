//! Timer and tween scheduling
//!
//! Repeating timers and property tweens are plain data here. The scheduler is
//! advanced once per frame, before the update rules run, and hands back the
//! tasks that came due. The game state applies them in order, so scheduled
//! callbacks never interleave with the frame update.

use serde::{Deserialize, Serialize};

/// Work a repeating timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    SpawnEnemy,
}

/// Numeric property a tween drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenTarget {
    PlayerY,
}

/// Completion callback of a tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenDone {
    FinishLaunch,
}

/// A unit of scheduled work that came due this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Task {
    /// A timer fired
    Timer(TimerTask),
    /// Write an interpolated value to a property
    Tween { target: TweenTarget, value: f32 },
    /// A tween reached its end (always follows its final `Tween` task)
    TweenComplete(TweenDone),
}

/// Timer that fires every `period_ms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatingTimer {
    pub id: u32,
    pub period_ms: f32,
    pub elapsed_ms: f32,
    /// Fires left before removal (`None` = repeat forever)
    pub remaining: Option<u32>,
    pub task: TimerTask,
}

/// Linear interpolation of one property over a fixed duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tween {
    pub id: u32,
    pub target: TweenTarget,
    pub from: f32,
    pub to: f32,
    pub duration_ms: f32,
    pub elapsed_ms: f32,
    pub on_complete: TweenDone,
}

impl Tween {
    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        let t = self.progress();
        if t >= 1.0 {
            // Land exactly on the end value
            self.to
        } else {
            self.from + (self.to - self.from) * t
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// Single-threaded queue of timers and tweens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    timers: Vec<RepeatingTimer>,
    tweens: Vec<Tween>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Register a timer firing every `period_ms`, `repeat` times (None = forever)
    pub fn add_timer(&mut self, period_ms: f32, repeat: Option<u32>, task: TimerTask) -> u32 {
        let id = self.alloc_id();
        self.timers.push(RepeatingTimer {
            id,
            period_ms,
            elapsed_ms: 0.0,
            remaining: repeat,
            task,
        });
        id
    }

    /// Start a tween; it begins advancing on the next call to [`Scheduler::advance`]
    pub fn add_tween(
        &mut self,
        target: TweenTarget,
        from: f32,
        to: f32,
        duration_ms: f32,
        on_complete: TweenDone,
    ) -> u32 {
        let id = self.alloc_id();
        self.tweens.push(Tween {
            id,
            target,
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
            on_complete,
        });
        id
    }

    pub fn timers(&self) -> &[RepeatingTimer] {
        &self.timers
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Advance all timers then all tweens by `delta_ms`; returns due tasks in order
    ///
    /// A timer fires at most once per call; any overshoot carries into the
    /// next period (capped at one period).
    pub fn advance(&mut self, delta_ms: f32) -> Vec<Task> {
        let mut tasks = Vec::new();

        for timer in &mut self.timers {
            timer.elapsed_ms += delta_ms;
            if timer.elapsed_ms >= timer.period_ms {
                let remainder = timer.elapsed_ms - timer.period_ms;
                timer.elapsed_ms = remainder.clamp(0.0, timer.period_ms);
                tasks.push(Task::Timer(timer.task));
                if let Some(remaining) = timer.remaining.as_mut() {
                    *remaining = remaining.saturating_sub(1);
                }
            }
        }
        self.timers.retain(|t| t.remaining != Some(0));

        for tween in &mut self.tweens {
            tween.elapsed_ms += delta_ms;
            tasks.push(Task::Tween {
                target: tween.target,
                value: tween.value(),
            });
            if tween.is_finished() {
                tasks.push(Task::TweenComplete(tween.on_complete));
            }
        }
        self.tweens.retain(|t| !t.is_finished());

        tasks
    }
}
