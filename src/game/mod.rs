//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window/render) + gameplay + render-only plugins.
//! - `configure_headless`: gameplay only, for integration tests.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::plugins;

// Only compile these imports on Windows.
#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "IK Ninja".into(),
            resolution: WindowResolution::new(1024, 768),
            ..default()
        }),
        ..default()
    });

    // DX12 on Windows, preferring the discrete GPU on hybrid laptops.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (Firefly/camera/presentation).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
