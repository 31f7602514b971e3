//! Score, lives and the session lifecycle.
//!
//! ```text
//! OnEnter(InGame)   begin_session        fresh Scoreboard + Session, HUD refresh
//! FixedUpdate       apply_unharmed_arrivals [SimSet::Outcomes]
//!                     ProjectileArrived -> lose a life -> blink + lives update
//!                     last life -> terminal scene + GameState::GameOver
//! OnEnter(GameOver) arm_restart
//! FixedUpdate       count_down_restart   (GameOver only) -> GameState::InGame
//! ```

mod scoreboard;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::session::Session;
use crate::common::sets::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::feedback::{FxRequest, TransientEffect};
use crate::plugins::projectiles::ProjectileArrived;
use crate::plugins::skeleton::Skeleton;
use crate::plugins::skeleton::hierarchy::{JointQuery, world_position};

pub use scoreboard::{LifeLoss, MatchPhase, Scoreboard};

/// Fade of one torso blink step, in seconds.
pub const BLINK_FADE: f32 = 0.05;

/// Time left before a finished session restarts.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct RestartTimer(pub Timer);

pub fn plugin(app: &mut App) {
    app.init_resource::<Scoreboard>()
        .init_resource::<Session>()
        .add_systems(OnEnter(GameState::InGame), begin_session)
        .add_systems(OnEnter(GameState::GameOver), arm_restart)
        .add_systems(
            FixedUpdate,
            apply_unharmed_arrivals.in_set(SimSet::Outcomes),
        )
        .add_systems(
            FixedUpdate,
            count_down_restart.run_if(in_state(GameState::GameOver)),
        );
}

/// Run condition: the simulation advances only while the match is being played.
pub fn match_in_progress(scoreboard: Option<Res<Scoreboard>>) -> bool {
    scoreboard.is_some_and(|s| s.is_playing())
}

pub fn begin_session(
    tunables: Res<Tunables>,
    mut scoreboard: ResMut<Scoreboard>,
    mut session: ResMut<Session>,
    mut fx: MessageWriter<FxRequest>,
) {
    *scoreboard = Scoreboard::new(tunables.starting_lives);
    *session = Session::new(tunables.spawn_interval, tunables.max_frame_delta);

    fx.write(FxRequest::UpdateScore(scoreboard.score()));
    fx.write(FxRequest::UpdateLives(scoreboard.lives()));
    info!("session started with {} lives", scoreboard.lives());
}

pub fn apply_unharmed_arrivals(
    mut arrivals: MessageReader<ProjectileArrived>,
    mut scoreboard: ResMut<Scoreboard>,
    skeleton: Option<Res<Skeleton>>,
    joints: JointQuery,
    mut fx: MessageWriter<FxRequest>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let torso = skeleton
        .and_then(|s| world_position(&joints, s.torso_lower))
        .unwrap_or(Vec2::ZERO);

    for arrival in arrivals.read() {
        let remaining = match scoreboard.lose_life() {
            LifeLoss::Ignored => {
                debug!("arrival of {} after game over ignored", arrival.entity);
                continue;
            }
            LifeLoss::Lost { remaining } => remaining,
            LifeLoss::GameOver => 0,
        };

        fx.write(FxRequest::ShowTransient {
            effect: TransientEffect::Blink,
            position: torso,
            fade: BLINK_FADE,
        });
        fx.write(FxRequest::UpdateLives(remaining));

        if remaining == 0 {
            info!("game over with score {}", scoreboard.score());
            fx.write(FxRequest::PresentTerminalScene);
            next_state.set(GameState::GameOver);
        }
    }
}

pub fn arm_restart(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(RestartTimer(Timer::from_seconds(
        tunables.restart_delay.max(0.0),
        TimerMode::Once,
    )));
}

pub fn count_down_restart(
    time: Res<Time>,
    timer: Option<ResMut<RestartTimer>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.tick(time.delta()).just_finished() {
        next_state.set(GameState::InGame);
    }
}

#[cfg(test)]
mod tests;
