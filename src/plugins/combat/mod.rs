//! Combat controller: turns attack inputs into limb sequences.
//!
//! ```text
//! Update:       request_attacks_from_pointer  (host input -> AttackInput)
//! FixedUpdate:  dispatch_attacks   [SimSet::Input]
//!                 clamp point -> mirror torso -> head constraints -> pick limb
//!                 -> IK in the limb's parent space -> AttackSequence::start
//!               track_head         [SimSet::Animate]
//! ```
//!
//! All per-session flags (arm toggle, first-attack latch, head target) live in
//! `Session`; nothing here keeps state of its own.

pub mod messages;
pub mod request;

use bevy::prelude::*;
use bevy::ecs::message::MessageReader;

use crate::common::session::Session;
use crate::common::sets::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::actions::{AttackSequence, read_pose};
use crate::plugins::ik::{self, AngleRange, normalize_angle};
use crate::plugins::skeleton::hierarchy::{JointQuery, world_position, world_to_local};
use crate::plugins::skeleton::{Joint, JointLimit, Limb, LimbRig, Skeleton};

pub use messages::AttackInput;

pub fn plugin(app: &mut App) {
    app.add_message::<AttackInput>()
        .add_systems(
            Update,
            request::request_attacks_from_pointer.run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, dispatch_attacks.in_set(SimSet::Input))
        .add_systems(FixedUpdate, track_head.in_set(SimSet::Animate));
}

/// Kick below the torso threshold, otherwise punch with the next arm.
///
/// Only the punch branch flips the arm toggle.
pub fn choose_limb(session: &mut Session, point: Vec2, torso: Vec2, kick_threshold: f32) -> Limb {
    if point.y < torso.y + kick_threshold {
        return Limb::Leg;
    }
    if session.take_punch_arm() {
        Limb::FrontArm
    } else {
        Limb::BackArm
    }
}

/// Face the torso towards `point`: negative X scale when the point is on its left.
fn face_towards(
    joints: &mut Query<(&mut Transform, Option<&ChildOf>), With<Joint>>,
    torso: Entity,
    torso_x: f32,
    point: Vec2,
) {
    if let Ok((mut tf, _)) = joints.get_mut(torso) {
        let magnitude = tf.scale.x.abs();
        tf.scale.x = if point.x < torso_x { -magnitude } else { magnitude };
    }
}

/// Solve the limb towards `point` (scene space) and start its sequence.
fn start_attack(
    joints: &JointQuery,
    rig: &LimbRig,
    sequence: &mut AttackSequence,
    upper: Entity,
    point: Vec2,
    tunables: &Tunables,
) -> Option<ik::Reach> {
    let (upper_tf, parent) = joints.get(upper).ok()?;
    let (lower_tf, _) = joints.get(rig.lower).ok()?;
    let current = read_pose(upper_tf, lower_tf);

    let target = match parent {
        Some(parent) => world_to_local(joints, parent.parent(), point)?,
        None => point,
    };
    let solution = ik::solve(&rig.chain, upper_tf.translation.truncate(), target, current);

    if sequence.start(
        point,
        current,
        solution.pose,
        tunables.reach_duration,
        tunables.restore_duration,
    ) {
        debug!("{:?}: previous sequence superseded", rig.limb);
    }
    Some(solution.reach)
}

pub fn dispatch_attacks(
    mut reader: MessageReader<AttackInput>,
    tunables: Res<Tunables>,
    skeleton: Option<Res<Skeleton>>,
    mut session: ResMut<Session>,
    mut joints: Query<(&'static mut Transform, Option<&'static ChildOf>), With<Joint>>,
    mut limbs: Query<(&LimbRig, &mut AttackSequence)>,
) {
    let Some(skeleton) = skeleton else {
        reader.clear();
        return;
    };

    for input in reader.read() {
        if !input.point.is_finite() {
            debug!("attack input dropped: {:?}", input.point);
            continue;
        }
        let point = tunables.clamp_to_scene(input.point);

        let Some(torso) = world_position(&joints.as_readonly(), skeleton.torso_lower) else {
            debug!("torso missing; attack dropped");
            continue;
        };
        face_towards(&mut joints, skeleton.torso_lower, torso.x, point);

        if session.enable_constraints() {
            info!("first attack of the session: head tracking enabled");
        }
        session.head_target = Some(point);

        let limb = choose_limb(&mut session, point, torso, tunables.kick_threshold);
        let upper = skeleton.limb(limb).upper;
        let Ok((rig, mut sequence)) = limbs.get_mut(upper) else {
            debug!("{limb:?} has no rig; attack dropped");
            continue;
        };

        let reach = start_attack(&joints.as_readonly(), rig, &mut sequence, upper, point, &tunables);
        debug!("{limb:?} attack at {point} -> {reach:?}");
    }
}

/// Orient the head towards the current target, inside its rotation range.
pub fn track_head(
    session: Res<Session>,
    skeleton: Option<Res<Skeleton>>,
    mut joints: Query<(&'static mut Transform, Option<&'static ChildOf>), With<Joint>>,
    limits: Query<&JointLimit>,
) {
    if !session.constraints_enabled {
        return;
    }
    let (Some(skeleton), Some(target)) = (skeleton, session.head_target) else {
        return;
    };
    let head = skeleton.head;

    let angle = {
        let ro = joints.as_readonly();
        let Ok((head_tf, Some(parent))) = ro.get(head) else {
            return;
        };
        let Some(local_target) = world_to_local(&ro, parent.parent(), target) else {
            return;
        };
        let offset = local_target - head_tf.translation.truncate();
        if offset.length_squared() < 1e-8 {
            return;
        }
        let range = limits.get(head).map(|l| l.0).unwrap_or(AngleRange::FULL);
        range.clamp(normalize_angle(offset.y.atan2(offset.x)))
    };

    if let Ok((mut tf, _)) = joints.get_mut(head) {
        tf.rotation = Quat::from_rotation_z(angle);
    }
}
