//! Skeleton plugin: the joint hierarchy of the ninja.
//!
//! ```text
//! OnEnter(InGame): RigDefinition --validate--> spawn joints (parent first, ChildOf)
//!                                 --> JointIndex (name -> Entity)
//!                                 --> Skeleton (typed handles) + LimbRig per limb
//! ```
//!
//! Name lookup happens exactly once, here. Everything downstream holds typed
//! entity handles from `Skeleton` and never searches by name again.
//!
//! A missing or malformed joint is a `ConfigurationError`. `spawn_rig` returns it as a
//! system error, which aborts session initialization.

pub mod hierarchy;
pub mod rig;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::actions::AttackSequence;
use crate::plugins::ik::{AngleRange, LimbPose, TwoBoneChain};

pub use rig::{ConfigurationError, JointDef, Limb, LimbDef, RigDefinition, names};

/// Marker for rig joints.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Joint;

/// Allowed local rotation of a joint.
#[derive(Component, Debug, Clone, Copy, Deref)]
pub struct JointLimit(pub AngleRange);

/// The ground shadow under the ninja. Not part of the joint tree.
#[derive(Component, Debug, Clone, Copy)]
pub struct Shadow;

/// Name → entity lookup, built once per session.
#[derive(Resource, Debug, Default, Clone)]
pub struct JointIndex(HashMap<&'static str, Entity>);

impl JointIndex {
    pub fn insert(&mut self, name: &'static str, entity: Entity) {
        self.0.insert(name, entity);
    }

    pub fn get(&self, name: &'static str) -> Result<Entity, ConfigurationError> {
        self.0
            .get(name)
            .copied()
            .ok_or(ConfigurationError::MissingJoint(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbJoints {
    pub upper: Entity,
    pub lower: Entity,
    pub effector: Entity,
}

/// Typed handles into the joint hierarchy.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Skeleton {
    pub torso_lower: Entity,
    pub torso_upper: Entity,
    pub head: Entity,
    pub front_arm: LimbJoints,
    pub back_arm: LimbJoints,
    pub leg: LimbJoints,
}

impl Skeleton {
    pub fn resolve(index: &JointIndex) -> Result<Self, ConfigurationError> {
        let limb = |upper, lower, effector| -> Result<LimbJoints, ConfigurationError> {
            Ok(LimbJoints {
                upper: index.get(upper)?,
                lower: index.get(lower)?,
                effector: index.get(effector)?,
            })
        };

        Ok(Self {
            torso_lower: index.get(names::TORSO_LOWER)?,
            torso_upper: index.get(names::TORSO_UPPER)?,
            head: index.get(names::HEAD)?,
            front_arm: limb(names::ARM_UPPER_FRONT, names::ARM_LOWER_FRONT, names::FIST_FRONT)?,
            back_arm: limb(names::ARM_UPPER_BACK, names::ARM_LOWER_BACK, names::FIST_BACK)?,
            leg: limb(names::LEG_UPPER_BACK, names::LEG_LOWER_BACK, names::FOOT_BACK)?,
        })
    }

    #[inline]
    pub fn limb(&self, limb: Limb) -> LimbJoints {
        match limb {
            Limb::FrontArm => self.front_arm,
            Limb::BackArm => self.back_arm,
            Limb::Leg => self.leg,
        }
    }
}

/// Attached to the upper joint of every attacking limb.
#[derive(Component, Debug, Clone)]
pub struct LimbRig {
    pub limb: Limb,
    pub lower: Entity,
    pub effector: Entity,
    pub chain: TwoBoneChain,
    pub rest: LimbPose,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<RigDefinition>()
        .add_systems(OnEnter(GameState::InGame), spawn_rig);
}

/// Build the two-bone chain of a limb from its joint definitions.
fn limb_chain(rig: &RigDefinition, def: &LimbDef) -> Result<TwoBoneChain, ConfigurationError> {
    let upper = rig.joint(def.upper)?;
    let lower = rig.joint(def.lower)?;
    let effector = rig.joint(def.effector)?;

    Ok(TwoBoneChain {
        upper_len: lower.offset.length(),
        lower_len: effector.offset.length(),
        upper_limit: upper.limit.unwrap_or(AngleRange::FULL),
        lower_limit: lower.limit.unwrap_or(AngleRange::FULL),
        bend: def.bend,
    })
}

/// Spawn the joint tree and publish `Skeleton` + `JointIndex`.
pub fn spawn_rig(mut commands: Commands, rig: Res<RigDefinition>) -> Result {
    rig.validate()?;

    let mut index = JointIndex::default();
    for def in &rig.joints {
        let mut joint = commands.spawn((
            Name::new(def.name),
            Joint,
            Transform::from_translation(def.offset.extend(1.0))
                .with_rotation(Quat::from_rotation_z(def.rest)),
            Visibility::default(),
        ));

        if let Some(limit) = def.limit {
            joint.insert(JointLimit(limit));
        }
        match def.parent {
            // Despawning the root takes the whole tree with it.
            None => {
                joint.insert(DespawnOnExit(GameState::InGame));
            }
            Some(parent) => {
                joint.insert(ChildOf(index.get(parent)?));
            }
        }

        index.insert(def.name, joint.id());
    }

    let skeleton = Skeleton::resolve(&index)?;

    for def in &rig.limbs {
        let joints = skeleton.limb(def.limb);
        commands.entity(joints.upper).insert((
            LimbRig {
                limb: def.limb,
                lower: joints.lower,
                effector: joints.effector,
                chain: limb_chain(&rig, def)?,
                rest: rig.rest_pose(def)?,
            },
            AttackSequence::default(),
        ));
    }

    commands.spawn((
        Name::new("shadow"),
        Shadow,
        Transform::from_translation(rig.shadow_offset.extend(0.5)),
        Visibility::default(),
        DespawnOnExit(GameState::InGame),
    ));

    debug!("rig spawned: {} joints, {} limbs", index.len(), rig.limbs.len());
    commands.insert_resource(skeleton);
    commands.insert_resource(index);
    Ok(())
}
