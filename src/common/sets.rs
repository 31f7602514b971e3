//! Fixed-tick ordering.
//!
//! Every simulation system lives in exactly one of these sets. The sets are chained,
//! so one tick always runs input, then animation, then hit resolution, then projectile
//! motion, then outcomes, then cleanup.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Animate,
    Resolve,
    Projectiles,
    Outcomes,
    Cleanup,
}
