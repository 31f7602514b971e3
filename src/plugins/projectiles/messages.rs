//! Spawn pipeline and outcome messages.
//!
//! `tick_spawner` only decides *that* and *where* a projectile appears; the
//! consumer `spawn_projectiles` is the single writer of `ProjectileRegistry`.

use bevy::prelude::*;

/// Screen edge a projectile enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the X coordinate of this edge.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub side: Side,
    pub y: f32,
    pub duration: f32,
}

/// A projectile crossed the whole scene without being struck.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileArrived {
    pub entity: Entity,
}
