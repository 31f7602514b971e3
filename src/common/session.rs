//! Per-session combat context.
//!
//! The arm toggle, the first-attack latch, the head target and the spawn accumulator
//! all live in one resource that is reset when a session starts.

use bevy::prelude::*;

/// Fixed-interval accumulator with fractional carry-over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnClock {
    accumulated: f32,
    interval: f32,
    max_delta: f32,
}

impl SpawnClock {
    pub fn new(interval: f32, max_delta: f32) -> Self {
        Self {
            accumulated: 0.0,
            interval: interval.max(f32::EPSILON),
            max_delta: max_delta.max(0.0),
        }
    }

    /// Add one tick's delta and return how many intervals elapsed.
    ///
    /// The delta is clamped to `[0, max_delta]`; the remainder past the last full
    /// interval is kept for the next tick.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.max_delta) } else { 0.0 };
        self.accumulated += dt;

        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        due
    }

    #[inline]
    pub fn remainder(&self) -> f32 {
        self.accumulated
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Session {
    /// Which arm throws the next punch. Toggled by punches only.
    pub front_arm_next: bool,
    /// Head constraints switch on with the first attack of a session.
    pub constraints_enabled: bool,
    pub head_target: Option<Vec2>,
    pub spawn_clock: SpawnClock,
}

impl Session {
    pub fn new(spawn_interval: f32, max_frame_delta: f32) -> Self {
        Self {
            front_arm_next: true,
            constraints_enabled: false,
            head_target: None,
            spawn_clock: SpawnClock::new(spawn_interval, max_frame_delta),
        }
    }

    /// Returns the arm for this punch and flips the toggle.
    pub fn take_punch_arm(&mut self) -> bool {
        let front = self.front_arm_next;
        self.front_arm_next = !self.front_arm_next;
        front
    }

    /// Latch the head constraints on. Returns `true` only the first time.
    pub fn enable_constraints(&mut self) -> bool {
        let first = !self.constraints_enabled;
        self.constraints_enabled = true;
        first
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(0.75, 1.0)
    }
}
