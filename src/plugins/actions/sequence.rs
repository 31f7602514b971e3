//! Per-limb attack sequence.
//!
//! ```text
//! Idle --start--> Reaching(reach_duration) --> CheckingHit --finish_hit_check--> Restoring(restore_duration) --> Idle
//! ```
//!
//! `advance` never leaves `CheckingHit`; only `finish_hit_check` does, and it does so
//! exactly once per sequence. `start` on a busy limb drops the old sequence wherever
//! it is and begins again from the pose the limb currently has.

use bevy::prelude::*;

use crate::plugins::ik::LimbPose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencePhase {
    #[default]
    Idle,
    Reaching,
    CheckingHit,
    Restoring,
}

#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct AttackSequence {
    phase: SequencePhase,
    elapsed: f32,
    target: Vec2,
    from: LimbPose,
    to: LimbPose,
    reach_duration: f32,
    restore_duration: f32,
    /// Number of sequences started on this limb.
    generation: u32,
}

impl AttackSequence {
    #[inline]
    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != SequencePhase::Idle
    }

    /// Begin a new sequence. Returns `true` if an unfinished one was dropped.
    pub fn start(
        &mut self,
        target: Vec2,
        from: LimbPose,
        to: LimbPose,
        reach_duration: f32,
        restore_duration: f32,
    ) -> bool {
        let superseded = self.is_active();
        *self = Self {
            phase: SequencePhase::Reaching,
            elapsed: 0.0,
            target,
            from,
            to,
            reach_duration: reach_duration.max(0.0),
            restore_duration: restore_duration.max(0.0),
            generation: self.generation.wrapping_add(1),
        };
        superseded
    }

    /// Step the timed phases. Returns the pose the limb should take this tick.
    pub fn advance(&mut self, dt: f32) -> Option<LimbPose> {
        let duration = match self.phase {
            SequencePhase::Reaching => self.reach_duration,
            SequencePhase::Restoring => self.restore_duration,
            SequencePhase::Idle | SequencePhase::CheckingHit => return None,
        };

        self.elapsed += dt.max(0.0);
        let t = if duration > 0.0 { self.elapsed / duration } else { 1.0 };
        let pose = self.from.lerp(self.to, t);

        if t >= 1.0 {
            self.phase = match self.phase {
                SequencePhase::Reaching => SequencePhase::CheckingHit,
                _ => SequencePhase::Idle,
            };
            self.elapsed = 0.0;
        }

        Some(pose)
    }

    /// Close the hit-check and head back to `rest`.
    ///
    /// Returns `false` (and changes nothing) unless the sequence is in `CheckingHit`.
    pub fn finish_hit_check(&mut self, rest: LimbPose) -> bool {
        if self.phase != SequencePhase::CheckingHit {
            return false;
        }
        self.phase = SequencePhase::Restoring;
        self.elapsed = 0.0;
        self.from = self.to;
        self.to = rest;
        true
    }
}
