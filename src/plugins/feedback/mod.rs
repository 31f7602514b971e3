//! Outbound side-effect requests.
//!
//! The simulation never plays sounds, draws sprites or switches scenes itself. It
//! writes `FxRequest` messages and moves on; whoever hosts the simulation (the
//! render-only `presentation` plugin in the full app) decides what they look like.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Hit,
    Miss,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientEffect {
    /// Impact flash where a projectile was struck.
    Spark,
    /// The ninja flickers after taking a hit.
    Blink,
}

impl TransientEffect {
    pub fn name(self) -> &'static str {
        match self {
            Self::Spark => "spark",
            Self::Blink => "blink",
        }
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum FxRequest {
    PlaySound(SoundCue),
    ShowTransient {
        effect: TransientEffect,
        position: Vec2,
        fade: f32,
    },
    PresentTerminalScene,
    UpdateScore(u32),
    UpdateLives(u32),
}

pub fn plugin(app: &mut App) {
    app.add_message::<FxRequest>();
}
