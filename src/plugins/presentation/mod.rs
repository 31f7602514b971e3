//! Presentation host (render-only).
//!
//! Consumes `FxRequest` messages and draws the rig, projectiles, labels and
//! transient effects. Nothing in the simulation reads back from here.

pub mod effects;
pub mod hud;
pub mod visuals;

use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    hud::plugin(app);
    effects::plugin(app);
    visuals::plugin(app);
}
