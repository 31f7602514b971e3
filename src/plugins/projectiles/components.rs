use bevy::prelude::*;

/// Lifecycle of a projectile. Only ever moves forward:
/// `Spawned -> Moving -> {Hit | Expired} -> Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectilePhase {
    #[default]
    Spawned,
    Moving,
    Hit,
    Expired,
    Removed,
}

impl ProjectilePhase {
    #[inline]
    fn rank(self) -> u8 {
        match self {
            Self::Spawned => 0,
            Self::Moving => 1,
            Self::Hit | Self::Expired => 2,
            Self::Removed => 3,
        }
    }

    /// Still on screen and hittable.
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Spawned | Self::Moving)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub id: u64,
    pub start: Vec2,
    pub end: Vec2,
    /// `+1.0` when travelling right, `-1.0` when travelling left.
    pub direction: f32,
    pub spawned_at: f32,
    pub duration: f32,
    elapsed: f32,
    phase: ProjectilePhase,
}

impl Projectile {
    pub fn new(id: u64, start: Vec2, end: Vec2, spawned_at: f32, duration: f32) -> Self {
        Self {
            id,
            start,
            end,
            direction: if end.x >= start.x { 1.0 } else { -1.0 },
            spawned_at,
            duration: duration.max(0.0),
            elapsed: 0.0,
            phase: ProjectilePhase::Spawned,
        }
    }

    #[inline]
    pub fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Move to `next` if it lies ahead of the current phase. Returns whether it did.
    pub fn advance_to(&mut self, next: ProjectilePhase) -> bool {
        if next.rank() <= self.phase.rank() {
            return false;
        }
        self.phase = next;
        true
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.end, self.progress())
    }

    /// Advance the flight by `dt`. Returns `true` on the step that reaches `end`.
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.phase.is_live() {
            return false;
        }
        self.advance_to(ProjectilePhase::Moving);
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.elapsed >= self.duration && self.advance_to(ProjectilePhase::Expired)
    }
}
