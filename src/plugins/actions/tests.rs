use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{run_system_once, set_tick};
use crate::plugins::skeleton::{RigDefinition, Skeleton, spawn_rig};

fn rest() -> LimbPose {
    LimbPose::from_degrees(-10.0, 130.0)
}

fn reach() -> LimbPose {
    LimbPose::from_degrees(90.0, 0.0)
}

#[test]
fn full_sequence_visits_every_phase_in_order() {
    let mut seq = AttackSequence::default();
    assert_eq!(seq.phase(), SequencePhase::Idle);
    assert!(seq.advance(0.1).is_none());

    assert!(!seq.start(Vec2::new(40.0, 40.0), rest(), reach(), 0.1, 0.1));
    assert_eq!(seq.phase(), SequencePhase::Reaching);

    let half = seq.advance(0.05).unwrap();
    assert!((half.upper - rest().lerp(reach(), 0.5).upper).abs() < 1e-5);
    assert_eq!(seq.phase(), SequencePhase::Reaching);

    let end = seq.advance(0.06).unwrap();
    assert_eq!(end, reach());
    assert_eq!(seq.phase(), SequencePhase::CheckingHit);

    // The check phase is sticky until someone finishes it.
    assert!(seq.advance(1.0).is_none());
    assert_eq!(seq.phase(), SequencePhase::CheckingHit);

    assert!(seq.finish_hit_check(rest()));
    assert!(!seq.finish_hit_check(rest()), "hit-check closes only once");
    assert_eq!(seq.phase(), SequencePhase::Restoring);

    let back = seq.advance(0.2).unwrap();
    assert_eq!(back, rest());
    assert_eq!(seq.phase(), SequencePhase::Idle);
}

#[test]
fn finish_hit_check_outside_the_check_phase_is_ignored() {
    let mut seq = AttackSequence::default();
    assert!(!seq.finish_hit_check(rest()));

    seq.start(Vec2::ZERO, rest(), reach(), 0.1, 0.1);
    assert!(!seq.finish_hit_check(rest()));
    assert_eq!(seq.phase(), SequencePhase::Reaching);
}

#[test]
fn restarting_mid_sequence_supersedes_from_current_pose() {
    let mut seq = AttackSequence::default();
    seq.start(Vec2::new(1.0, 0.0), rest(), reach(), 0.1, 0.1);
    let mid = seq.advance(0.05).unwrap();

    let other = LimbPose::from_degrees(45.0, 20.0);
    assert!(seq.start(Vec2::new(2.0, 0.0), mid, other, 0.1, 0.1));
    assert_eq!(seq.generation(), 2);
    assert_eq!(seq.phase(), SequencePhase::Reaching);
    assert_eq!(seq.target(), Vec2::new(2.0, 0.0));

    // Fresh timer: the first step starts at `mid`, not where the old one was heading.
    let step = seq.advance(0.0).unwrap();
    assert_eq!(step, mid);
}

#[test]
fn zero_duration_completes_in_one_step() {
    let mut seq = AttackSequence::default();
    seq.start(Vec2::ZERO, rest(), reach(), 0.0, 0.0);
    assert_eq!(seq.advance(0.0), Some(reach()));
    assert_eq!(seq.phase(), SequencePhase::CheckingHit);
}

#[test]
fn advance_sequences_moves_only_active_limbs() {
    let mut world = World::new();
    world.insert_resource(RigDefinition::ninja());
    run_system_once::<_, Result, _>(&mut world, spawn_rig).unwrap();
    let skeleton = *world.resource::<Skeleton>();

    let leg_before = *world.get::<Transform>(skeleton.leg.upper).unwrap();

    let arm = skeleton.front_arm;
    world
        .get_mut::<AttackSequence>(arm.upper)
        .unwrap()
        .start(Vec2::new(70.0, 40.0), rest(), reach(), 0.1, 0.1);

    set_tick(&mut world, 0.125);
    run_system_once(&mut world, advance_sequences);

    let upper = world.get::<Transform>(arm.upper).unwrap();
    let lower = world.get::<Transform>(arm.lower).unwrap();
    let pose = read_pose(upper, lower);
    assert!((pose.upper - reach().upper).abs() < 1e-5);
    assert!(pose.lower.abs() < 1e-5);
    assert_eq!(
        world.get::<AttackSequence>(arm.upper).unwrap().phase(),
        SequencePhase::CheckingHit
    );

    assert_eq!(*world.get::<Transform>(skeleton.leg.upper).unwrap(), leg_before);
}
