//! Timed spawning.
//!
//! Producer: `tick_spawner` runs the session's `SpawnClock` and writes one
//! `SpawnProjectileRequest` per elapsed interval.
//! Consumer: `spawn_projectiles` turns each request into an entity just past the
//! scene edge and registers it.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::components::Projectile;
use super::messages::{Side, SpawnProjectileRequest};
use super::registry::ProjectileRegistry;
use crate::common::session::Session;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::collision::HitBox;
use crate::plugins::skeleton::Skeleton;
use crate::plugins::skeleton::hierarchy::{JointQuery, world_position};

/// Source of spawn randomness. Seeded from `Tunables::rng_seed` when set.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct SpawnRng(pub StdRng);

impl SpawnRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Uniform in `[lo, hi)`, or `lo` when the range is empty.
fn sample(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Vertical band projectiles fly in, relative to the lower torso.
pub fn spawn_band(tunables: &Tunables, torso_y: f32) -> (f32, f32) {
    let (below, above) = tunables.projectile_band;
    let half_h = tunables.projectile_size.y * 0.5;
    let lo = torso_y - below + half_h;
    let hi = torso_y + above - half_h;
    if hi >= lo { (lo, hi) } else { ((lo + hi) * 0.5, (lo + hi) * 0.5) }
}

pub fn tick_spawner(
    time: Res<Time>,
    tunables: Res<Tunables>,
    skeleton: Option<Res<Skeleton>>,
    joints: JointQuery,
    mut session: ResMut<Session>,
    mut rng: ResMut<SpawnRng>,
    mut writer: MessageWriter<SpawnProjectileRequest>,
) {
    let due = session.spawn_clock.advance(time.delta_secs());
    if due == 0 {
        return;
    }
    let Some(torso) = skeleton.and_then(|s| world_position(&joints, s.torso_lower)) else {
        debug!("no torso; {due} spawn(s) skipped");
        return;
    };

    let (lo, hi) = spawn_band(&tunables, torso.y);
    let (min_duration, max_duration) = tunables.projectile_duration;
    for _ in 0..due {
        let side = if rng.gen_bool(0.5) { Side::Left } else { Side::Right };
        let y = sample(&mut rng, lo, hi);
        let duration = sample(&mut rng, min_duration, max_duration);
        writer.write(SpawnProjectileRequest { side, y, duration });
    }
}

pub fn spawn_projectiles(
    mut commands: Commands,
    mut reader: MessageReader<SpawnProjectileRequest>,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut registry: ResMut<ProjectileRegistry>,
) {
    // Just past the edge so the projectile slides in fully hidden.
    let edge_x = tunables.half_extents().x + tunables.projectile_size.x * 0.5;

    for req in reader.read() {
        let start = Vec2::new(req.side.sign() * edge_x, req.y);
        let end = Vec2::new(-start.x, req.y);
        let id = registry.allocate_id();

        let entity = commands
            .spawn((
                Name::new(format!("projectile #{id}")),
                Projectile::new(id, start, end, time.elapsed_secs(), req.duration),
                HitBox::new(tunables.projectile_size * 0.5),
                Transform::from_translation(start.extend(2.0)),
                Visibility::default(),
                DespawnOnExit(GameState::InGame),
            ))
            .id();
        registry.register(entity);
        debug!("projectile #{id} from {:?} at y={:.1}, {:.2}s", req.side, req.y, req.duration);
    }
}
