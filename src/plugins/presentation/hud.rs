//! Score and lives labels, plus the game-over banner.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::feedback::FxRequest;
use crate::plugins::scoring::Scoreboard;

#[derive(Component)]
pub struct ScoreLabel;

#[derive(Component)]
pub struct LivesLabel;

#[derive(Component)]
pub struct GameOverBanner;

const LABEL_MARGIN: Vec2 = Vec2::new(110.0, 40.0);
const LABEL_COLOR: Color = Color::srgb(0.1, 0.1, 0.12);

pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

pub fn lives_text(lives: u32) -> String {
    format!("Lives: {lives}")
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_labels)
        .add_systems(Update, apply_label_requests);
}

fn spawn_labels(mut commands: Commands, tunables: Res<Tunables>, scoreboard: Res<Scoreboard>) {
    let corner = tunables.half_extents() - LABEL_MARGIN;
    let font = TextFont {
        font_size: 28.0,
        ..default()
    };

    commands.spawn((
        Name::new("ScoreLabel"),
        ScoreLabel,
        Text2d::new(score_text(scoreboard.score())),
        font.clone(),
        TextColor(LABEL_COLOR),
        Transform::from_xyz(-corner.x, corner.y, 50.0),
        DespawnOnExit(GameState::InGame),
    ));
    commands.spawn((
        Name::new("LivesLabel"),
        LivesLabel,
        Text2d::new(lives_text(scoreboard.lives())),
        font,
        TextColor(LABEL_COLOR),
        Transform::from_xyz(corner.x, corner.y, 50.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn apply_label_requests(
    mut commands: Commands,
    mut requests: MessageReader<FxRequest>,
    mut q_score: Query<&mut Text2d, (With<ScoreLabel>, Without<LivesLabel>)>,
    mut q_lives: Query<&mut Text2d, (With<LivesLabel>, Without<ScoreLabel>)>,
) {
    for request in requests.read() {
        match *request {
            FxRequest::UpdateScore(score) => {
                for mut text in &mut q_score {
                    text.0 = score_text(score);
                }
            }
            FxRequest::UpdateLives(lives) => {
                for mut text in &mut q_lives {
                    text.0 = lives_text(lives);
                }
            }
            FxRequest::PresentTerminalScene => {
                commands.spawn((
                    Name::new("GameOverBanner"),
                    GameOverBanner,
                    Text2d::new("Game Over"),
                    TextFont {
                        font_size: 64.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.75, 0.1, 0.1)),
                    Transform::from_xyz(0.0, 0.0, 60.0),
                    DespawnOnExit(GameState::GameOver),
                ));
            }
            _ => {}
        }
    }
}
