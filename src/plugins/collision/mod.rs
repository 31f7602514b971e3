//! Hit resolution.
//!
//! Every limb that reached its target this tick is in `CheckingHit`. Its effector
//! is tested once against every live projectile, then the limb is handed to its
//! restore step. A limb never stays in `CheckingHit` past this system.

pub mod hitbox;

use bevy::ecs::message::MessageWriter;
use bevy::math::Affine2;
use bevy::prelude::*;

use crate::common::sets::SimSet;
use crate::plugins::actions::{AttackSequence, SequencePhase};
use crate::plugins::feedback::{FxRequest, SoundCue, TransientEffect};
use crate::plugins::projectiles::{Projectile, ProjectilePhase, ProjectileRegistry};
use crate::plugins::scoring::Scoreboard;
use crate::plugins::skeleton::LimbRig;
use crate::plugins::skeleton::hierarchy::{JointQuery, local_affine, world_position};

pub use hitbox::HitBox;

/// Fade of the impact spark, in seconds.
pub const SPARK_FADE: f32 = 0.2;

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, resolve_hit_checks.in_set(SimSet::Resolve));
}

pub fn resolve_hit_checks(
    mut scoreboard: ResMut<Scoreboard>,
    registry: Res<ProjectileRegistry>,
    joints: JointQuery,
    mut limbs: Query<(&LimbRig, &mut AttackSequence)>,
    mut projectiles: Query<(&mut Projectile, &Transform, &HitBox)>,
    mut fx: MessageWriter<FxRequest>,
) {
    for (rig, mut sequence) in &mut limbs {
        if sequence.phase() != SequencePhase::CheckingHit {
            continue;
        }

        if let Some(effector) = world_position(&joints, rig.effector) {
            for &entity in registry.live() {
                let Ok((mut projectile, tf, hit_box)) = projectiles.get_mut(entity) else {
                    debug!("registered projectile {entity} has no body");
                    continue;
                };
                if !projectile.phase().is_live() {
                    continue;
                }

                // Projectiles are scene roots: their transform is their world transform.
                if hit_box.contains_in_space(local_affine(tf), effector, Affine2::IDENTITY) {
                    projectile.advance_to(ProjectilePhase::Hit);
                    let score = scoreboard.record_hit();
                    debug!("{:?} struck projectile #{}; score {score}", rig.limb, projectile.id);

                    fx.write(FxRequest::PlaySound(SoundCue::Hit));
                    fx.write(FxRequest::ShowTransient {
                        effect: TransientEffect::Spark,
                        position: tf.translation.truncate(),
                        fade: SPARK_FADE,
                    });
                    fx.write(FxRequest::UpdateScore(score));
                } else {
                    fx.write(FxRequest::PlaySound(SoundCue::Miss));
                }
            }
        } else {
            debug!("{:?} has no effector; hit check skipped", rig.limb);
        }

        sequence.finish_hit_check(rig.rest);
    }
}

#[cfg(test)]
mod tests;
