//! Action scheduler: advances every limb's `AttackSequence` once per tick and writes
//! the interpolated pose into the limb's joints.
//!
//! The hit-check phase is not handled here. `collision::resolve_hit_checks` runs right
//! after this system in the same tick and moves limbs out of `CheckingHit`.

mod sequence;

use bevy::prelude::*;

use crate::common::sets::SimSet;
use crate::plugins::ik::LimbPose;
use crate::plugins::skeleton::hierarchy::z_angle;
use crate::plugins::skeleton::{Joint, LimbRig};

pub use sequence::{AttackSequence, SequencePhase};

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, advance_sequences.in_set(SimSet::Animate));
}

/// Current pose of a limb from its joint transforms.
#[inline]
pub fn read_pose(upper: &Transform, lower: &Transform) -> LimbPose {
    LimbPose {
        upper: z_angle(upper.rotation),
        lower: z_angle(lower.rotation),
    }
}

#[inline]
pub fn write_pose(upper: &mut Transform, lower: &mut Transform, pose: LimbPose) {
    upper.rotation = Quat::from_rotation_z(pose.upper);
    lower.rotation = Quat::from_rotation_z(pose.lower);
}

pub fn advance_sequences(
    time: Res<Time>,
    mut limbs: Query<(&LimbRig, &mut AttackSequence, &mut Transform)>,
    // Lower joints never carry a LimbRig, so the two Transform borrows are disjoint.
    mut lowers: Query<&mut Transform, (With<Joint>, Without<LimbRig>)>,
) {
    let dt = time.delta_secs();

    for (rig, mut sequence, mut upper_tf) in &mut limbs {
        let Some(pose) = sequence.advance(dt) else {
            continue;
        };
        let Ok(mut lower_tf) = lowers.get_mut(rig.lower) else {
            debug!("limb {:?} lost its lower joint", rig.limb);
            continue;
        };
        write_pose(&mut upper_tf, &mut lower_tf, pose);
    }
}

#[cfg(test)]
mod tests;
