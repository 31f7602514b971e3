use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::components::Projectile;
use super::messages::ProjectileArrived;
use crate::common::tunables::Tunables;

/// Linear horizontal flight with a constant spin, clockwise when travelling right.
pub fn move_projectiles(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    mut arrived: MessageWriter<ProjectileArrived>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, mut tf) in &mut projectiles {
        if !projectile.phase().is_live() {
            continue;
        }
        let reached_end = projectile.step(dt);

        let z = tf.translation.z;
        tf.translation = projectile.position().extend(z);
        tf.rotation =
            Quat::from_rotation_z(-projectile.direction * tunables.projectile_spin * projectile.elapsed());

        if reached_end {
            arrived.write(ProjectileArrived { entity });
        }
    }
}
