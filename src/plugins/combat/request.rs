//! Producer: turn clicks and touches into `AttackInput` messages.
//!
//! `ButtonInput` / `Touches` only exist with the input plugins, so both are optional
//! and the system is a no-op in headless apps.

use bevy::prelude::*;
use bevy::ecs::message::MessageWriter;

use crate::plugins::camera::MainCamera;

use super::messages::AttackInput;

pub fn request_attacks_from_pointer(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut writer: MessageWriter<AttackInput>,
) {
    let mut viewport_points: Vec<Vec2> = Vec::new();

    if let Some(buttons) = buttons {
        if buttons.just_pressed(MouseButton::Left) {
            match windows.single().map(Window::cursor_position) {
                Ok(Some(cursor)) => viewport_points.push(cursor),
                Ok(None) => debug!("Cursor position is None"),
                Err(e) => debug!("No single Window: {e:?}"),
            }
        }
    }

    if let Some(touches) = touches {
        viewport_points.extend(touches.iter_just_pressed().map(|t| t.position()));
    }

    if viewport_points.is_empty() {
        return;
    }

    let (camera, camera_tf) = match q_camera.single() {
        Ok(v) => v,
        Err(e) => { debug!("No single MainCamera: {e:?}"); return; }
    };

    for p in viewport_points {
        match camera.viewport_to_world_2d(camera_tf, p) {
            Ok(point) => {
                writer.write(AttackInput { point });
            }
            Err(e) => debug!("viewport_to_world_2d failed: {e:?}"),
        }
    }
}
