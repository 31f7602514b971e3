//! Flat-colour sprites for the rig, its shadow and the projectiles.
//!
//! Each non-root joint gets a bone sprite parented to its parent joint, spanning
//! the parent→joint offset, so the bone follows the parent's rotation.

use bevy::prelude::*;
use bevy_firefly::prelude::Occluder2d;

use crate::common::tunables::Tunables;
use crate::plugins::projectiles::Projectile;
use crate::plugins::skeleton::rig::names;
use crate::plugins::skeleton::{Joint, RigDefinition, Shadow};

const BONE_WIDTH: f32 = 10.0;
const HEAD_SIZE: f32 = 34.0;
const NINJA_COLOR: Color = Color::srgb(0.12, 0.12, 0.16);

#[derive(Component)]
pub struct BoneSprite;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (dress_joints, dress_shadows, dress_projectiles));
}

/// Rotation that points a bone's local -Y along `offset`.
fn bone_rotation(offset: Vec2) -> Quat {
    Quat::from_rotation_z(offset.x.atan2(-offset.y))
}

fn dress_joints(
    mut commands: Commands,
    rig: Res<RigDefinition>,
    q: Query<(Entity, &Name, Option<&ChildOf>), Added<Joint>>,
) {
    for (entity, name, parent) in &q {
        let Some(def) = rig.joints.iter().find(|d| d.name == name.as_str()) else {
            continue;
        };

        if def.name == names::HEAD {
            commands.entity(entity).try_insert(Sprite {
                color: NINJA_COLOR,
                custom_size: Some(Vec2::splat(HEAD_SIZE)),
                ..default()
            });
        }

        let Some(parent) = parent else {
            continue;
        };
        let len = def.offset.length();
        if len <= f32::EPSILON {
            continue;
        }
        commands.spawn((
            Name::new(format!("bone {}", def.name)),
            BoneSprite,
            Sprite {
                color: NINJA_COLOR,
                custom_size: Some(Vec2::new(BONE_WIDTH, len)),
                ..default()
            },
            Transform::from_translation((def.offset * 0.5).extend(-0.1))
                .with_rotation(bone_rotation(def.offset)),
            ChildOf(parent.parent()),
        ));
    }
}

fn dress_shadows(mut commands: Commands, q: Query<Entity, Added<Shadow>>) {
    for e in &q {
        commands.entity(e).try_insert(Sprite {
            color: Color::srgba(0.0, 0.0, 0.0, 0.25),
            custom_size: Some(Vec2::new(120.0, 14.0)),
            ..default()
        });
    }
}

fn dress_projectiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q: Query<Entity, Added<Projectile>>,
) {
    for e in &q {
        commands.entity(e).try_insert((
            Sprite {
                color: Color::srgb(0.55, 0.57, 0.62),
                custom_size: Some(tunables.projectile_size),
                ..default()
            },
            Occluder2d::circle(tunables.projectile_size.x * 0.5),
        ));
    }
}
