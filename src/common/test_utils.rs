//! Test helpers.
//!
//! Bevy provides `World::run_system_once` (via the `RunSystemOnce` trait) for quickly
//! executing a system in tests without building a full schedule.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()`
//! after running so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::plugins::feedback::FxRequest;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Install a generic `Time` whose delta is `dt`, as `FixedUpdate` would see it.
pub fn set_tick(world: &mut World, dt: f32) {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    world.insert_resource(t);
}

/// Take every side-effect request written so far.
pub fn drain_fx(world: &mut World) -> Vec<FxRequest> {
    world.resource_mut::<Messages<FxRequest>>().drain().collect()
}
