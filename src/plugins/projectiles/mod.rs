//! Projectiles: timed spawning, straight-line flight and removal.
//!
//! ```text
//! FixedUpdate [SimSet::Projectiles]
//!   move_projectiles      advance live projectiles; Expired + ProjectileArrived at the far edge
//!   tick_spawner          SpawnClock -> SpawnProjectileRequest (producer)
//!   spawn_projectiles     request -> entity + ProjectileRegistry (consumer, single writer)
//! FixedUpdate [SimSet::Cleanup]
//!   remove_finished_projectiles   Hit/Expired -> Removed, deregister, despawn
//! ```
//!
//! A projectile spawned this tick stays `Spawned` until the next one, so the first
//! hit-check that can see it also sees it at its start position.

pub mod commit;
pub mod components;
pub mod messages;
pub mod motion;
pub mod registry;
pub mod spawner;

use bevy::prelude::*;

use crate::common::sets::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub use components::{Projectile, ProjectilePhase};
pub use messages::{ProjectileArrived, Side, SpawnProjectileRequest};
pub use registry::ProjectileRegistry;
pub use spawner::SpawnRng;

pub fn plugin(app: &mut App) {
    app.init_resource::<ProjectileRegistry>()
        .init_resource::<SpawnRng>()
        .add_message::<SpawnProjectileRequest>()
        .add_message::<ProjectileArrived>()
        .add_systems(OnEnter(GameState::InGame), reset_projectiles)
        .add_systems(
            FixedUpdate,
            (
                motion::move_projectiles,
                spawner::tick_spawner,
                spawner::spawn_projectiles,
            )
                .chain()
                .in_set(SimSet::Projectiles),
        )
        .add_systems(
            FixedUpdate,
            commit::remove_finished_projectiles.in_set(SimSet::Cleanup),
        );
}

/// Fresh registry and RNG for a new session. Old entities go with `DespawnOnExit`.
pub fn reset_projectiles(
    tunables: Res<Tunables>,
    mut registry: ResMut<ProjectileRegistry>,
    mut rng: ResMut<SpawnRng>,
) {
    registry.clear();
    *rng = SpawnRng::new(tunables.rng_seed);
}
