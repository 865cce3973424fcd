//! Pointer presses: mouse or touch, mapped onto canvas coordinates.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::layout::{hit_test, world_to_canvas};
use crate::questions::QuestionBank;
use crate::session::{Quiz, QuizEvent};
use crate::QuizRng;

/// Converts a window position (logical pixels) into canvas coordinates.
pub fn window_to_canvas(
    camera: &Camera,
    cam_t: &GlobalTransform,
    position: Vec2,
) -> Option<Vec2> {
    camera
        .viewport_to_world_2d(cam_t, position)
        .ok()
        .map(world_to_canvas)
}

/// Current pointer position on the canvas, if the cursor is over the window.
pub fn pointer_position(win: &Window, cam: &Query<(&Camera, &GlobalTransform)>) -> Option<Vec2> {
    let (camera, cam_t) = cam.get_single().ok()?;
    let cursor = win.cursor_position()?;
    window_to_canvas(camera, cam_t, cursor)
}

pub fn handle_press(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cam: Query<(&Camera, &GlobalTransform)>,
    bank: Res<QuestionBank>,
    mut quiz: ResMut<Quiz>,
    mut rng: ResMut<QuizRng>,
    mut events: EventWriter<QuizEvent>,
) {
    let press = if mouse.just_pressed(MouseButton::Left) {
        let Ok(win) = windows.get_single() else {
            return;
        };
        pointer_position(win, &cam)
    } else if let Some(touch) = touches.iter_just_pressed().next() {
        let Ok((camera, cam_t)) = cam.get_single() else {
            return;
        };
        window_to_canvas(camera, cam_t, touch.position())
    } else {
        return;
    };

    let Some(point) = press else {
        return;
    };
    let Some(action) = hit_test(quiz.screen().kind(), point) else {
        return;
    };

    if let Some(event) = quiz.press(action, &bank, &mut rng.0) {
        events.send(event);
    }
}
