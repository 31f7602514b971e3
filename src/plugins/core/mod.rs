//! Core plugin: shared resources, the fixed tick and simulation ordering.

use bevy::prelude::*;

use crate::common::sets::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::scoring::match_in_progress;

/// Simulation rate.
pub const TICK_HZ: f64 = 60.0;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.82, 0.84, 0.88)));
    app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Input,
            SimSet::Animate,
            SimSet::Resolve,
            SimSet::Projectiles,
            SimSet::Outcomes,
            SimSet::Cleanup,
        )
            .chain()
            .run_if(in_state(GameState::InGame).and(match_in_progress)),
    );
}
