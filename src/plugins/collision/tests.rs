use std::f32::consts::PI;

use bevy::ecs::message::Messages;
use bevy::math::Affine2;
use bevy::prelude::*;

use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::test_utils::{drain_fx, run_system_once};
use crate::plugins::actions::AttackSequence;
use crate::plugins::ik::LimbPose;
use crate::plugins::skeleton::{Skeleton, RigDefinition, spawn_rig};

fn random_affine(rng: &mut StdRng) -> Affine2 {
    let sx = rng.gen_range(0.5_f32..2.0) * if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    let sy = rng.gen_range(0.5_f32..2.0);
    Affine2::from_scale_angle_translation(
        Vec2::new(sx, sy),
        rng.gen_range(-PI..PI),
        Vec2::new(rng.gen_range(-400.0_f32..400.0), rng.gen_range(-300.0_f32..300.0)),
    )
}

#[test]
fn local_containment_is_inclusive() {
    let b = HitBox::new(Vec2::new(18.0, 10.0));
    assert!(b.contains_local(Vec2::ZERO));
    assert!(b.contains_local(Vec2::new(18.0, -10.0)));
    assert!(!b.contains_local(Vec2::new(18.5, 0.0)));
    assert!(!b.contains_local(Vec2::new(0.0, -10.5)));
}

#[test]
fn rotated_box_covers_its_rotated_area() {
    let b = HitBox::new(Vec2::new(30.0, 5.0));
    let placed = Affine2::from_angle_translation(PI / 2.0, Vec2::new(100.0, 0.0));

    // Long axis now vertical.
    assert!(b.contains_in_space(placed, Vec2::new(100.0, 25.0), Affine2::IDENTITY));
    assert!(!b.contains_in_space(placed, Vec2::new(125.0, 0.0), Affine2::IDENTITY));
}

#[test]
fn containment_agrees_in_every_shared_space() {
    let mut rng = StdRng::seed_from_u64(0xb0c5);
    let mut inside = 0;

    for _ in 0..5_000 {
        let b = HitBox::new(Vec2::new(rng.gen_range(5.0_f32..40.0), rng.gen_range(5.0_f32..40.0)));
        let box_to_world = random_affine(&mut rng);
        let space_to_world = random_affine(&mut rng);

        // Bias points towards the box so both verdicts show up.
        let local = Vec2::new(
            rng.gen_range(-2.0_f32..2.0) * b.half_size.x,
            rng.gen_range(-2.0_f32..2.0) * b.half_size.y,
        );
        let margin = (local.abs() - b.half_size).abs();
        if margin.x < 0.05 || margin.y < 0.05 {
            continue;
        }
        let world = box_to_world.transform_point2(local);
        let in_space = space_to_world.inverse().transform_point2(world);

        let expected = b.contains_local(local);
        assert_eq!(b.contains_in_space(box_to_world, world, Affine2::IDENTITY), expected);
        assert_eq!(b.contains_in_space(box_to_world, in_space, space_to_world), expected);
        assert_eq!(b.contains_in_space(box_to_world, local, box_to_world), expected);
        inside += expected as u32;
    }
    assert!(inside > 500);
}

#[test]
fn degenerate_inputs_never_contain() {
    let b = HitBox::new(Vec2::splat(10.0));
    let flat = Affine2::from_scale(Vec2::new(0.0, 1.0));
    assert!(!b.contains_in_space(flat, Vec2::ZERO, Affine2::IDENTITY));
    assert!(!b.contains_in_space(Affine2::IDENTITY, Vec2::NAN, Affine2::IDENTITY));
}

// --------------------------------------------------------------------------------------
// Resolver
// --------------------------------------------------------------------------------------

fn resolver_world() -> (World, Skeleton) {
    let mut world = World::new();
    world.insert_resource(RigDefinition::ninja());
    world.insert_resource(Scoreboard::new(3));
    world.insert_resource(ProjectileRegistry::default());
    world.init_resource::<Messages<FxRequest>>();
    run_system_once::<_, Result, _>(&mut world, spawn_rig).unwrap();
    let skeleton = *world.resource::<Skeleton>();
    (world, skeleton)
}

fn spawn_projectile(world: &mut World, at: Vec2) -> Entity {
    let e = world
        .spawn((
            Projectile::new(0, at - Vec2::X * 100.0, at + Vec2::X * 100.0, 0.0, 4.0),
            HitBox::new(Vec2::splat(18.0)),
            Transform::from_translation(at.extend(2.0)),
        ))
        .id();
    world.resource_mut::<ProjectileRegistry>().register(e);
    e
}

/// Drive the leg straight into its hit-check without moving any joint.
fn leg_checking_hit(world: &mut World, skeleton: &Skeleton) {
    let mut seq = world.get_mut::<AttackSequence>(skeleton.leg.upper).unwrap();
    let rest = LimbPose::default();
    seq.start(Vec2::ZERO, rest, rest, 0.1, 0.1);
    seq.advance(1.0);
    assert_eq!(seq.phase(), SequencePhase::CheckingHit);
}

fn foot_position(world: &mut World, skeleton: &Skeleton) -> Vec2 {
    let foot = skeleton.leg.effector;
    run_system_once(world, move |q: JointQuery| world_position(&q, foot)).unwrap()
}

#[test]
fn effector_inside_a_projectile_scores_a_hit() {
    let (mut world, skeleton) = resolver_world();
    let foot = foot_position(&mut world, &skeleton);
    let target = spawn_projectile(&mut world, foot + Vec2::new(5.0, -5.0));
    let far = spawn_projectile(&mut world, Vec2::new(400.0, 300.0));
    leg_checking_hit(&mut world, &skeleton);

    run_system_once(&mut world, resolve_hit_checks);

    assert_eq!(world.get::<Projectile>(target).unwrap().phase(), ProjectilePhase::Hit);
    assert_eq!(world.get::<Projectile>(far).unwrap().phase(), ProjectilePhase::Spawned);
    assert_eq!(world.resource::<Scoreboard>().score(), 1);
    assert_eq!(
        drain_fx(&mut world),
        vec![
            FxRequest::PlaySound(SoundCue::Hit),
            FxRequest::ShowTransient {
                effect: TransientEffect::Spark,
                position: foot + Vec2::new(5.0, -5.0),
                fade: SPARK_FADE,
            },
            FxRequest::UpdateScore(1),
            FxRequest::PlaySound(SoundCue::Miss),
        ]
    );
    assert_eq!(
        world.get::<AttackSequence>(skeleton.leg.upper).unwrap().phase(),
        SequencePhase::Restoring
    );
}

#[test]
fn each_missed_projectile_requests_a_miss_sound() {
    let (mut world, skeleton) = resolver_world();
    spawn_projectile(&mut world, Vec2::new(-400.0, 0.0));
    spawn_projectile(&mut world, Vec2::new(400.0, 0.0));
    let struck = spawn_projectile(&mut world, Vec2::new(400.0, 200.0));
    world.get_mut::<Projectile>(struck).unwrap().advance_to(ProjectilePhase::Hit);
    leg_checking_hit(&mut world, &skeleton);

    run_system_once(&mut world, resolve_hit_checks);

    assert_eq!(
        drain_fx(&mut world),
        vec![FxRequest::PlaySound(SoundCue::Miss); 2]
    );
    assert_eq!(world.resource::<Scoreboard>().score(), 0);
    assert_eq!(
        world.get::<AttackSequence>(skeleton.leg.upper).unwrap().phase(),
        SequencePhase::Restoring
    );
}

#[test]
fn limbs_outside_the_check_are_left_alone() {
    let (mut world, skeleton) = resolver_world();
    let foot = foot_position(&mut world, &skeleton);
    let e = spawn_projectile(&mut world, foot);

    run_system_once(&mut world, resolve_hit_checks);

    assert!(drain_fx(&mut world).is_empty());
    assert_eq!(world.get::<Projectile>(e).unwrap().phase(), ProjectilePhase::Spawned);
    assert_eq!(
        world.get::<AttackSequence>(skeleton.leg.upper).unwrap().phase(),
        SequencePhase::Idle
    );
}

#[test]
fn a_projectile_is_only_struck_once() {
    let (mut world, skeleton) = resolver_world();
    let foot = foot_position(&mut world, &skeleton);
    spawn_projectile(&mut world, foot);

    leg_checking_hit(&mut world, &skeleton);
    run_system_once(&mut world, resolve_hit_checks);
    leg_checking_hit(&mut world, &skeleton);
    run_system_once(&mut world, resolve_hit_checks);

    assert_eq!(world.resource::<Scoreboard>().score(), 1);
}
