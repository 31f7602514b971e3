//! Rig definition: the fixed joint table the skeleton is built from.

use bevy::prelude::*;
use thiserror::Error;

use crate::plugins::ik::{AngleRange, Bend, LimbPose};

/// Joint names of the ninja rig.
pub mod names {
    pub const TORSO_LOWER: &str = "torso_lower";
    pub const TORSO_UPPER: &str = "torso_upper";
    pub const HEAD: &str = "head";
    pub const ARM_UPPER_FRONT: &str = "arm_upper_front";
    pub const ARM_LOWER_FRONT: &str = "arm_lower_front";
    pub const FIST_FRONT: &str = "fist_front";
    pub const ARM_UPPER_BACK: &str = "arm_upper_back";
    pub const ARM_LOWER_BACK: &str = "arm_lower_back";
    pub const FIST_BACK: &str = "fist_back";
    pub const LEG_UPPER_BACK: &str = "leg_upper_back";
    pub const LEG_LOWER_BACK: &str = "leg_lower_back";
    pub const FOOT_BACK: &str = "foot_back";
}

use names::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("required joint `{0}` is missing from the rig")]
    MissingJoint(&'static str),
    #[error("joint `{0}` is declared more than once")]
    DuplicateJoint(&'static str),
    #[error("joint `{joint}` names parent `{parent}`, which is not declared before it")]
    UnknownParent {
        joint: &'static str,
        parent: &'static str,
    },
}

/// The attacking limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limb {
    FrontArm,
    BackArm,
    Leg,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JointDef {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    /// Position in the parent's local space (scene space for the root).
    pub offset: Vec2,
    /// Rest rotation, radians.
    pub rest: f32,
    pub limit: Option<AngleRange>,
}

impl JointDef {
    fn new(name: &'static str, parent: Option<&'static str>, x: f32, y: f32) -> Self {
        Self {
            name,
            parent,
            offset: Vec2::new(x, y),
            rest: 0.0,
            limit: None,
        }
    }

    fn rest_degrees(mut self, deg: f32) -> Self {
        self.rest = deg.to_radians();
        self
    }

    fn limit_degrees(mut self, min: f32, max: f32) -> Self {
        self.limit = Some(AngleRange::from_degrees(min, max));
        self
    }
}

/// Which joints make up an attacking limb.
#[derive(Debug, Clone, PartialEq)]
pub struct LimbDef {
    pub limb: Limb,
    pub upper: &'static str,
    pub lower: &'static str,
    pub effector: &'static str,
    pub bend: Bend,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RigDefinition {
    /// Parents are always declared before their children.
    pub joints: Vec<JointDef>,
    pub limbs: Vec<LimbDef>,
    /// Shadow element position, scene space.
    pub shadow_offset: Vec2,
}

impl Default for RigDefinition {
    fn default() -> Self {
        Self::ninja()
    }
}

impl RigDefinition {
    pub fn ninja() -> Self {
        let arm = |upper, lower, fist, x| {
            [
                JointDef::new(upper, Some(TORSO_UPPER), x, 40.0)
                    .rest_degrees(-10.0)
                    .limit_degrees(-60.0, 175.0),
                JointDef::new(lower, Some(upper), 0.0, -32.0)
                    .rest_degrees(130.0)
                    .limit_degrees(0.0, 160.0),
                JointDef::new(fist, Some(lower), 0.0, -30.0),
            ]
        };

        let mut joints = vec![
            JointDef::new(TORSO_LOWER, None, 0.0, -30.0),
            JointDef::new(TORSO_UPPER, Some(TORSO_LOWER), 0.0, 30.0),
            JointDef::new(HEAD, Some(TORSO_UPPER), 0.0, 55.0).limit_degrees(-50.0, 80.0),
        ];
        joints.extend(arm(ARM_UPPER_FRONT, ARM_LOWER_FRONT, FIST_FRONT, 8.0));
        joints.extend(arm(ARM_UPPER_BACK, ARM_LOWER_BACK, FIST_BACK, -8.0));
        joints.extend([
            JointDef::new(LEG_UPPER_BACK, Some(TORSO_LOWER), 0.0, -10.0)
                .rest_degrees(22.0)
                .limit_degrees(-30.0, 150.0),
            JointDef::new(LEG_LOWER_BACK, Some(LEG_UPPER_BACK), 0.0, -42.0)
                .rest_degrees(-30.0)
                .limit_degrees(-150.0, 0.0),
            JointDef::new(FOOT_BACK, Some(LEG_LOWER_BACK), 0.0, -40.0),
        ]);

        let limbs = vec![
            LimbDef {
                limb: Limb::FrontArm,
                upper: ARM_UPPER_FRONT,
                lower: ARM_LOWER_FRONT,
                effector: FIST_FRONT,
                bend: Bend::Clockwise,
            },
            LimbDef {
                limb: Limb::BackArm,
                upper: ARM_UPPER_BACK,
                lower: ARM_LOWER_BACK,
                effector: FIST_BACK,
                bend: Bend::Clockwise,
            },
            LimbDef {
                limb: Limb::Leg,
                upper: LEG_UPPER_BACK,
                lower: LEG_LOWER_BACK,
                effector: FOOT_BACK,
                bend: Bend::CounterClockwise,
            },
        ];

        Self {
            joints,
            limbs,
            shadow_offset: Vec2::new(0.0, -100.0),
        }
    }

    pub fn joint(&self, name: &'static str) -> Result<&JointDef, ConfigurationError> {
        self.joints
            .iter()
            .find(|j| j.name == name)
            .ok_or(ConfigurationError::MissingJoint(name))
    }

    /// Names are unique and every parent is declared earlier, so the tree is acyclic.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (i, def) in self.joints.iter().enumerate() {
            let earlier = &self.joints[..i];
            if earlier.iter().any(|j| j.name == def.name) {
                return Err(ConfigurationError::DuplicateJoint(def.name));
            }
            if let Some(parent) = def.parent {
                if !earlier.iter().any(|j| j.name == parent) {
                    return Err(ConfigurationError::UnknownParent {
                        joint: def.name,
                        parent,
                    });
                }
            }
        }
        Ok(())
    }

    /// Rest pose of a limb, from its joints' rest rotations.
    pub fn rest_pose(&self, limb: &LimbDef) -> Result<LimbPose, ConfigurationError> {
        Ok(LimbPose {
            upper: self.joint(limb.upper)?.rest,
            lower: self.joint(limb.lower)?.rest,
        })
    }
}
