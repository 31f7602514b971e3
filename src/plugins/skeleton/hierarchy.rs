//! World transforms by composing the ancestor chain.
//!
//! We do not wait for Bevy's transform propagation: a hit-check that runs in the same
//! tick the pose changed must see the new pose. Composition walks `ChildOf` links up
//! to the root joint and multiplies the local affines.

use bevy::math::Affine2;
use bevy::prelude::*;

use super::Joint;

/// Read access to every joint's local transform and parent link.
pub type JointQuery<'w, 's> = Query<'w, 's, (&'static Transform, Option<&'static ChildOf>), With<Joint>>;

/// Upper bound on chain length. The rig is validated acyclic; this only stops a walk
/// through a corrupted hierarchy.
const MAX_DEPTH: usize = 64;

/// Rotation about Z of a planar quaternion.
#[inline]
pub fn z_angle(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::ZYX).0
}

/// Local 2D affine of a transform (translation * rotation * scale).
#[inline]
pub fn local_affine(tf: &Transform) -> Affine2 {
    Affine2::from_scale_angle_translation(
        tf.scale.truncate(),
        z_angle(tf.rotation),
        tf.translation.truncate(),
    )
}

/// Joint-local → scene affine. `None` if the entity (or an ancestor) is not a joint.
pub fn world_affine(joints: &JointQuery, entity: Entity) -> Option<Affine2> {
    let mut acc = Affine2::IDENTITY;
    let mut cursor = Some(entity);

    for _ in 0..MAX_DEPTH {
        let Some(e) = cursor else {
            return Some(acc);
        };
        let (tf, parent) = joints.get(e).ok()?;
        acc = local_affine(tf) * acc;
        cursor = parent.map(ChildOf::parent);
    }

    None
}

/// Scene position of a joint's origin.
#[inline]
pub fn world_position(joints: &JointQuery, entity: Entity) -> Option<Vec2> {
    world_affine(joints, entity).map(|a| a.translation)
}

#[inline]
pub fn local_to_world(joints: &JointQuery, entity: Entity, local: Vec2) -> Option<Vec2> {
    world_affine(joints, entity).map(|a| a.transform_point2(local))
}

#[inline]
pub fn world_to_local(joints: &JointQuery, entity: Entity, world: Vec2) -> Option<Vec2> {
    world_affine(joints, entity).map(|a| a.inverse().transform_point2(world))
}
