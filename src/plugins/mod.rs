//! Feature plugins.

use bevy::prelude::*;

pub mod actions;
pub mod collision;
pub mod combat;
pub mod core;
pub mod feedback;
pub mod ik;
pub mod projectiles;
pub mod scoring;
pub mod skeleton;

// Render-only
pub mod camera;
pub mod lighting;
pub mod presentation;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    feedback::plugin(app);
    skeleton::plugin(app);
    actions::plugin(app);
    combat::plugin(app);
    projectiles::plugin(app);
    collision::plugin(app);
    scoring::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    lighting::plugin(app);
    presentation::plugin(app);
}
