//! Transient effects and sound requests.
//!
//! Sparks fade out and shrink over their fade time. A blink toggles the ninja's
//! visibility twice. Sounds are only logged: no audio assets ship with the game.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::feedback::{FxRequest, TransientEffect};
use crate::plugins::skeleton::Skeleton;

/// Visibility flips per blink request (hide, show, hide, show).
const BLINK_STEPS: u8 = 4;
const SPARK_SIZE: f32 = 48.0;

#[derive(Component, Debug)]
pub struct Spark {
    timer: Timer,
}

#[derive(Component, Debug)]
pub struct Blink {
    timer: Timer,
    steps_left: u8,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (apply_effect_requests, fade_sparks, run_blinks).chain());
}

fn apply_effect_requests(
    mut commands: Commands,
    mut requests: MessageReader<FxRequest>,
    skeleton: Option<Res<Skeleton>>,
) {
    for request in requests.read() {
        match *request {
            FxRequest::PlaySound(cue) => info!("sound: {}", cue.name()),
            FxRequest::ShowTransient {
                effect: TransientEffect::Spark,
                position,
                fade,
            } => {
                commands.spawn((
                    Name::new("Spark"),
                    Spark {
                        timer: Timer::from_seconds(fade.max(f32::EPSILON), TimerMode::Once),
                    },
                    Sprite {
                        color: Color::srgb(1.0, 0.85, 0.3),
                        custom_size: Some(Vec2::splat(SPARK_SIZE)),
                        ..default()
                    },
                    Transform::from_translation(position.extend(20.0)),
                    DespawnOnExit(GameState::InGame),
                ));
            }
            FxRequest::ShowTransient {
                effect: TransientEffect::Blink,
                fade,
                ..
            } => {
                let Some(skeleton) = skeleton.as_deref() else {
                    continue;
                };
                commands.entity(skeleton.torso_lower).try_insert(Blink {
                    timer: Timer::from_seconds(fade.max(f32::EPSILON), TimerMode::Repeating),
                    steps_left: BLINK_STEPS,
                });
            }
            _ => {}
        }
    }
}

fn fade_sparks(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Spark, &mut Sprite, &mut Transform)>,
) {
    for (e, mut spark, mut sprite, mut tf) in &mut q {
        spark.timer.tick(time.delta());
        let t = spark.timer.fraction();

        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();
        tf.scale = Vec3::splat((1.0 - t).max(0.05));

        if spark.timer.is_finished() {
            commands.entity(e).despawn();
        }
    }
}

fn run_blinks(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Blink, &mut Visibility)>,
) {
    for (e, mut blink, mut vis) in &mut q {
        let flips = blink.timer.tick(time.delta()).times_finished_this_tick();
        for _ in 0..flips.min(blink.steps_left as u32) {
            blink.steps_left -= 1;
            *vis = if blink.steps_left % 2 == 1 {
                Visibility::Hidden
            } else {
                Visibility::Inherited
            };
        }
        if blink.steps_left == 0 {
            commands.entity(e).remove::<Blink>();
        }
    }
}
