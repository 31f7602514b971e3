//! Two-bone analytic inverse kinematics.
//!
//! Everything here is a pure function of its inputs: no ECS access, no time.
//! Callers interpolate from the current pose to the solved one over a duration.
//!
//! # Angle convention
//! Angles are local Z rotations (radians, counter-clockwise positive) expressed in the
//! space of the limb's parent joint. A bone at rotation `0` points along local `-Y`,
//! so a limb with both angles at zero hangs straight down. The lower angle is relative
//! to the upper bone.
//!
//! ```text
//!        root (upper joint)
//!          \  upper_len
//!           \
//!            o middle joint (elbow / knee)
//!           /
//!          / lower_len
//!         x effector (fist / foot)
//! ```

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::prelude::*;
use thiserror::Error;

/// Targets closer than this to the root have no usable bearing.
const DEGENERATE_EPSILON: f32 = 1e-4;

/// Wrap an angle into `[-PI, PI)`.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Inclusive rotation range. `min <= max`, both inside `[-PI, PI]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

impl AngleRange {
    pub const FULL: Self = Self { min: -PI, max: PI };

    pub fn from_degrees(min: f32, max: f32) -> Self {
        Self {
            min: min.to_radians(),
            max: max.to_radians(),
        }
    }

    #[inline]
    pub fn contains(self, angle: f32) -> bool {
        angle >= self.min && angle <= self.max
    }

    /// Clamp into the range, picking the bound that is angularly closest when the
    /// angle falls outside it.
    pub fn clamp(self, angle: f32) -> f32 {
        let a = normalize_angle(angle);
        if self.contains(a) {
            return a;
        }
        let to_min = normalize_angle(self.min - a).abs();
        let to_max = normalize_angle(self.max - a).abs();
        if to_min <= to_max { self.min } else { self.max }
    }
}

/// Side of the root→target line the middle joint bends towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bend {
    Clockwise,
    CounterClockwise,
}

impl Bend {
    #[inline]
    fn sign(self) -> f32 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBoneChain {
    pub upper_len: f32,
    pub lower_len: f32,
    pub upper_limit: AngleRange,
    pub lower_limit: AngleRange,
    pub bend: Bend,
}

impl TwoBoneChain {
    #[inline]
    pub fn max_reach(&self) -> f32 {
        self.upper_len + self.lower_len
    }

    #[inline]
    pub fn min_reach(&self) -> f32 {
        (self.upper_len - self.lower_len).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimbPose {
    pub upper: f32,
    pub lower: f32,
}

impl LimbPose {
    pub fn from_degrees(upper: f32, lower: f32) -> Self {
        Self {
            upper: upper.to_radians(),
            lower: lower.to_radians(),
        }
    }

    /// Straight interpolation. Stays inside any range both ends are inside.
    #[inline]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return to;
        }
        Self {
            upper: self.upper + (to.upper - self.upper) * t,
            lower: self.lower + (to.lower - self.lower) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// The effector lands on the target.
    Full,
    /// Target outside `[min_reach, max_reach]`; the limb stretches (or folds) towards it.
    Extended,
    /// At least one angle was clamped into its joint range.
    Limited,
    /// No usable target; the current pose was kept.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    pub pose: LimbPose,
    pub reach: Reach,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateTarget {
    #[error("target coincides with the root joint")]
    AtRoot,
    #[error("target is not a finite point")]
    NonFinite,
    #[error("chain has a non-positive segment length")]
    EmptyChain,
}

/// Direction of a bone at local rotation `angle`.
#[inline]
pub fn bone_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Forward kinematics: `(middle joint, effector)` positions for a pose.
pub fn forward(chain: &TwoBoneChain, root: Vec2, pose: LimbPose) -> (Vec2, Vec2) {
    let middle = root + bone_direction(pose.upper) * chain.upper_len;
    let effector = middle + bone_direction(pose.upper + pose.lower) * chain.lower_len;
    (middle, effector)
}

/// Solve the chain rooted at `root` for `target`.
pub fn try_solve(
    chain: &TwoBoneChain,
    root: Vec2,
    target: Vec2,
) -> Result<IkSolution, DegenerateTarget> {
    let (l1, l2) = (chain.upper_len, chain.lower_len);
    if !(l1 > 0.0 && l2 > 0.0) {
        return Err(DegenerateTarget::EmptyChain);
    }

    let offset = target - root;
    if !offset.is_finite() {
        return Err(DegenerateTarget::NonFinite);
    }
    let dist = offset.length();
    if dist <= DEGENERATE_EPSILON {
        return Err(DegenerateTarget::AtRoot);
    }

    // Shorten (or lengthen) the reach along the target direction.
    let d = dist.clamp(chain.min_reach(), chain.max_reach()).max(DEGENERATE_EPSILON);
    let bearing = offset.y.atan2(offset.x);

    // Law of cosines: angle at the root between the bone and the root→target line,
    // and the interior angle at the middle joint.
    let cos_root = ((l1 * l1 + d * d - l2 * l2) / (2.0 * l1 * d)).clamp(-1.0, 1.0);
    let cos_middle = ((l1 * l1 + l2 * l2 - d * d) / (2.0 * l1 * l2)).clamp(-1.0, 1.0);
    let root_offset = cos_root.acos();
    let interior = cos_middle.acos();

    let s = chain.bend.sign();
    let raw = LimbPose {
        upper: normalize_angle(bearing + s * root_offset + FRAC_PI_2),
        lower: normalize_angle(-s * (PI - interior)),
    };
    let pose = LimbPose {
        upper: chain.upper_limit.clamp(raw.upper),
        lower: chain.lower_limit.clamp(raw.lower),
    };

    let clamped = (pose.upper - raw.upper).abs() > 1e-6 || (pose.lower - raw.lower).abs() > 1e-6;
    let reach = if clamped {
        Reach::Limited
    } else if dist > chain.max_reach() || dist < chain.min_reach() {
        Reach::Extended
    } else {
        Reach::Full
    };

    Ok(IkSolution { pose, reach })
}

/// Like [`try_solve`], but a degenerate target keeps `current` unchanged.
pub fn solve(chain: &TwoBoneChain, root: Vec2, target: Vec2, current: LimbPose) -> IkSolution {
    match try_solve(chain, root, target) {
        Ok(solution) => solution,
        Err(e) => {
            debug!("IK target ignored: {e}");
            IkSolution {
                pose: current,
                reach: Reach::Unchanged,
            }
        }
    }
}
