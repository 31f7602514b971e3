//! Attack input.

use bevy::prelude::*;

/// One discrete touch or click, in scene space.
///
/// A batch may hold several; they are processed independently in arrival order.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct AttackInput {
    pub point: Vec2,
}
