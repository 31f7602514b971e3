//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` + `StatesPlugin` provide the ECS runtime.
//! - `ik_ninja::game::configure_headless` installs the gameplay plugins.
//! - Virtual time is paused so `app.update()` never runs `FixedUpdate` by itself;
//!   `tick` drives the simulation with an exact delta instead.

#![allow(dead_code)]

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use ik_ninja::common::tunables::Tunables;
use ik_ninja::plugins::feedback::FxRequest;

/// Headless app with default tunables, already inside the first session.
pub fn app_headless() -> App {
    app_with(|_| {})
}

/// Headless app with adjusted tunables, already inside the first session.
pub fn app_with(tune: impl FnOnce(&mut Tunables)) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    ik_ninja::game::configure_headless(&mut app);

    tune(&mut app.world_mut().resource_mut::<Tunables>());
    app.world_mut().resource_mut::<Time<Virtual>>().pause();

    app.finish();
    app.cleanup();
    // Enters the initial state: rig, scoreboard and session are set up here.
    app.update();
    app
}

/// One simulation tick of `dt` seconds, followed by any pending state transition.
pub fn tick(app: &mut App, dt: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
    app.world_mut().run_schedule(FixedUpdate);
    app.world_mut().run_schedule(StateTransition);
}

/// Take every side-effect request written so far.
pub fn drain_fx(app: &mut App) -> Vec<FxRequest> {
    app.world_mut()
        .resource_mut::<Messages<FxRequest>>()
        .drain()
        .collect()
}
