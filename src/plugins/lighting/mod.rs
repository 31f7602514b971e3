//! Lighting plugin (Firefly) (render-only).

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::skeleton::hierarchy::{JointQuery, world_position};
use crate::plugins::skeleton::{Joint, Skeleton};

/// Light hovering over the ninja.
#[derive(Component)]
pub struct NinjaLight;

/// Height of the light above the lower torso.
const LIGHT_LIFT: f32 = 120.0;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, follow_ninja_light.run_if(in_state(GameState::InGame)));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("NinjaLight"),
        NinjaLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: 700.0,
            ..default()
        },
        Transform::from_xyz(0.0, LIGHT_LIFT, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_ninja_light(
    skeleton: Option<Res<Skeleton>>,
    joints: JointQuery,
    mut q_light: Query<&mut Transform, (With<NinjaLight>, Without<Joint>)>,
) {
    let Some(torso) = skeleton.and_then(|s| world_position(&joints, s.torso_lower)) else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = torso.x;
    tf_light.translation.y = torso.y + LIGHT_LIFT;
}
