use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    #[default]
    Playing,
    GameOver,
}

/// Result of `Scoreboard::lose_life`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    Lost { remaining: u32 },
    /// This loss ended the match. Returned once per session.
    GameOver,
    /// The match was already over.
    Ignored,
}

/// Score and lives of the running session.
///
/// Only the hit resolver and the arrival outcome mutate it; a new session replaces it.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    lives: u32,
    phase: MatchPhase,
}

impl Scoreboard {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            phase: MatchPhase::Playing,
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[inline]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    /// Returns the new score.
    pub fn record_hit(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    pub fn lose_life(&mut self) -> LifeLoss {
        if self.phase == MatchPhase::GameOver {
            return LifeLoss::Ignored;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = MatchPhase::GameOver;
            LifeLoss::GameOver
        } else {
            LifeLoss::Lost {
                remaining: self.lives,
            }
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(3)
    }
}
