//! Removal commit.
//!
//! The only place projectiles leave the registry. Runs last in the tick so the
//! resolver and the outcome systems all saw the same set of entities.

use bevy::prelude::*;

use super::components::{Projectile, ProjectilePhase};
use super::registry::ProjectileRegistry;

pub fn remove_finished_projectiles(
    mut commands: Commands,
    mut registry: ResMut<ProjectileRegistry>,
    mut projectiles: Query<(Entity, &mut Projectile)>,
) {
    for (entity, mut projectile) in &mut projectiles {
        if !matches!(projectile.phase(), ProjectilePhase::Hit | ProjectilePhase::Expired) {
            continue;
        }
        projectile.advance_to(ProjectilePhase::Removed);
        if !registry.deregister(entity) {
            debug!("projectile #{} was not registered", projectile.id);
        }
        commands.entity(entity).despawn();
    }
}
