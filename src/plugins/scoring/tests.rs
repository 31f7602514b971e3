use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{drain_fx, run_system_once, set_tick};
use crate::plugins::skeleton::{RigDefinition, spawn_rig};

fn outcome_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(Scoreboard::new(3));
    world.insert_resource(Session::default());
    world.insert_resource(RigDefinition::ninja());
    world.init_resource::<Messages<FxRequest>>();
    world.init_resource::<Messages<ProjectileArrived>>();
    world.init_resource::<NextState<GameState>>();
    run_system_once::<_, Result, _>(&mut world, spawn_rig).unwrap();
    world
}

fn arrive(world: &mut World, count: usize) {
    for _ in 0..count {
        let entity = world.spawn_empty().id();
        world.write_message(ProjectileArrived { entity });
    }
    run_system_once(world, apply_unharmed_arrivals);
    world.resource_mut::<Messages<ProjectileArrived>>().clear();
}

fn pending_state(world: &World) -> Option<GameState> {
    match world.resource::<NextState<GameState>>() {
        NextState::Pending(s) => Some(*s),
        _ => None,
    }
}

#[test]
fn lives_saturate_and_game_over_latches() {
    let mut board = Scoreboard::new(2);
    assert_eq!(board.lose_life(), LifeLoss::Lost { remaining: 1 });
    assert_eq!(board.lose_life(), LifeLoss::GameOver);
    assert_eq!(board.phase(), MatchPhase::GameOver);
    for _ in 0..5 {
        assert_eq!(board.lose_life(), LifeLoss::Ignored);
    }
    assert_eq!(board.lives(), 0);
}

#[test]
fn zero_starting_lives_end_on_the_first_arrival() {
    let mut board = Scoreboard::new(0);
    assert_eq!(board.lose_life(), LifeLoss::GameOver);
    assert_eq!(board.lives(), 0);
}

#[test]
fn hits_count_up() {
    let mut board = Scoreboard::default();
    assert_eq!(board.record_hit(), 1);
    assert_eq!(board.record_hit(), 2);
    assert_eq!(board.score(), 2);
    assert!(board.is_playing());
}

#[test]
fn an_arrival_costs_a_life_and_blinks_the_torso() {
    let mut world = outcome_world();

    arrive(&mut world, 1);

    assert_eq!(world.resource::<Scoreboard>().lives(), 2);
    assert_eq!(
        drain_fx(&mut world),
        vec![
            FxRequest::ShowTransient {
                effect: TransientEffect::Blink,
                position: Vec2::new(0.0, -30.0),
                fade: BLINK_FADE,
            },
            FxRequest::UpdateLives(2),
        ]
    );
    assert_eq!(pending_state(&world), None);
}

#[test]
fn last_life_presents_the_terminal_scene_once() {
    let mut world = outcome_world();

    arrive(&mut world, 2);
    drain_fx(&mut world);

    // Three more arrive in the same batch; only the first one counts.
    arrive(&mut world, 3);

    let fx = drain_fx(&mut world);
    assert_eq!(
        fx.iter().filter(|r| **r == FxRequest::PresentTerminalScene).count(),
        1
    );
    assert_eq!(fx.last(), Some(&FxRequest::PresentTerminalScene));
    assert!(fx.contains(&FxRequest::UpdateLives(0)));

    let board = world.resource::<Scoreboard>();
    assert_eq!(board.lives(), 0);
    assert_eq!(board.phase(), MatchPhase::GameOver);
    assert_eq!(pending_state(&world), Some(GameState::GameOver));

    arrive(&mut world, 1);
    assert!(drain_fx(&mut world).is_empty());
}

#[test]
fn match_runs_only_while_playing() {
    let mut world = outcome_world();
    assert!(run_system_once(&mut world, match_in_progress));

    arrive(&mut world, 3);
    assert!(!run_system_once(&mut world, match_in_progress));

    world.remove_resource::<Scoreboard>();
    assert!(!run_system_once(&mut world, match_in_progress));
}

#[test]
fn new_session_resets_board_and_session() {
    let mut world = outcome_world();
    world.resource_mut::<Scoreboard>().record_hit();
    arrive(&mut world, 3);
    {
        let mut session = world.resource_mut::<Session>();
        session.take_punch_arm();
        session.enable_constraints();
    }
    drain_fx(&mut world);

    run_system_once(&mut world, begin_session);

    assert_eq!(*world.resource::<Scoreboard>(), Scoreboard::new(3));
    let session = world.resource::<Session>();
    assert!(session.front_arm_next);
    assert!(!session.constraints_enabled);
    assert_eq!(session.head_target, None);
    assert_eq!(
        drain_fx(&mut world),
        vec![FxRequest::UpdateScore(0), FxRequest::UpdateLives(3)]
    );
}

#[test]
fn restart_waits_for_the_delay() {
    let mut world = outcome_world();
    run_system_once(&mut world, arm_restart);

    set_tick(&mut world, 0.5);
    run_system_once(&mut world, count_down_restart);
    assert_eq!(pending_state(&world), None);

    set_tick(&mut world, 0.5);
    run_system_once(&mut world, count_down_restart);
    assert_eq!(pending_state(&world), Some(GameState::InGame));
}
