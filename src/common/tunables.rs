//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Playfield size in world units, centered on the origin.
    pub scene_size: Vec2,
    /// Attacks below `torso.y + kick_threshold` become kicks.
    pub kick_threshold: f32,
    pub reach_duration: f32,
    pub restore_duration: f32,
    pub spawn_interval: f32,
    /// Upper bound applied to a single tick's delta before it reaches the spawn clock.
    pub max_frame_delta: f32,
    /// Projectile band, relative to the lower torso: `(below, above)`.
    pub projectile_band: (f32, f32),
    pub projectile_duration: (f32, f32),
    pub projectile_size: Vec2,
    /// Radians per second.
    pub projectile_spin: f32,
    pub starting_lives: u32,
    pub restart_delay: f32,
    pub rng_seed: Option<u64>,
}

impl Tunables {
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.scene_size * 0.5
    }

    /// Clamp a point into the playfield.
    #[inline]
    pub fn clamp_to_scene(&self, p: Vec2) -> Vec2 {
        let h = self.half_extents();
        p.clamp(-h, h)
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            scene_size: Vec2::new(1024.0, 768.0),
            kick_threshold: 25.0,
            reach_duration: 0.1,
            restore_duration: 0.1,
            spawn_interval: 0.75,
            max_frame_delta: 1.0,
            projectile_band: (60.0, 140.0),
            projectile_duration: (4.0, 6.0),
            projectile_size: Vec2::splat(36.0),
            projectile_spin: std::f32::consts::FRAC_PI_2 / 0.2,
            starting_lives: 3,
            restart_delay: 1.0,
            rng_seed: None,
        }
    }
}
