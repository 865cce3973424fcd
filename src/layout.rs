//! Static screen geometry. Layout is authored on an 800x600 canvas with the
//! origin at the top-left and y pointing down; bevy's world has the origin at
//! the centre and y pointing up.

use bevy::prelude::*;

use crate::questions::AnswerLabel;
use crate::session::ScreenKind;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

const ANSWER_W: f32 = 350.0;
const ANSWER_H: f32 = 80.0;
const ANSWER_GAP: f32 = 20.0;
const ANSWER_TOP: f32 = 250.0;
const ANSWER_LEFT: f32 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict on every edge: the border itself is outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.w
            && point.y > self.y
            && point.y < self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    Start,
    Answer(AnswerLabel),
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonSpec {
    pub screen: ScreenKind,
    pub bounds: Bounds,
    pub action: ButtonAction,
}

const fn answer(label: AnswerLabel, col: f32, row: f32) -> ButtonSpec {
    ButtonSpec {
        screen: ScreenKind::Question,
        bounds: Bounds::new(
            ANSWER_LEFT + col * (ANSWER_W + ANSWER_GAP),
            ANSWER_TOP + row * (ANSWER_H + ANSWER_GAP),
            ANSWER_W,
            ANSWER_H,
        ),
        action: ButtonAction::Answer(label),
    }
}

pub const BUTTONS: [ButtonSpec; 6] = [
    ButtonSpec {
        screen: ScreenKind::Start,
        bounds: Bounds::new(CANVAS_WIDTH / 2.0 - 100.0, CANVAS_HEIGHT / 2.0 + 120.0, 200.0, 60.0),
        action: ButtonAction::Start,
    },
    answer(AnswerLabel::A, 0.0, 0.0),
    answer(AnswerLabel::B, 1.0, 0.0),
    answer(AnswerLabel::C, 0.0, 1.0),
    answer(AnswerLabel::D, 1.0, 1.0),
    ButtonSpec {
        screen: ScreenKind::Result,
        bounds: Bounds::new(CANVAS_WIDTH / 2.0 - 100.0, CANVAS_HEIGHT / 2.0 + 150.0, 200.0, 60.0),
        action: ButtonAction::Restart,
    },
];

/// Button under `point` on `screen`, if any. Feedback has no buttons.
pub fn hit_test(screen: ScreenKind, point: Vec2) -> Option<ButtonAction> {
    BUTTONS
        .iter()
        .find(|b| b.screen == screen && b.bounds.contains(point))
        .map(|b| b.action)
}

pub fn canvas_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - point.y)
}

pub fn world_to_canvas(point: Vec2) -> Vec2 {
    Vec2::new(point.x + CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_button_geometry() {
        let start = BUTTONS[0].bounds;
        assert_eq!(start, Bounds::new(300.0, 420.0, 200.0, 60.0));
        assert_eq!(hit_test(ScreenKind::Start, Vec2::new(400.0, 450.0)), Some(ButtonAction::Start));
    }

    #[test]
    fn edges_are_outside() {
        assert_eq!(hit_test(ScreenKind::Start, Vec2::new(300.0, 450.0)), None);
        assert_eq!(hit_test(ScreenKind::Start, Vec2::new(400.0, 480.0)), None);
        assert_eq!(hit_test(ScreenKind::Start, Vec2::new(300.5, 420.5)), Some(ButtonAction::Start));
    }

    #[test]
    fn answer_grid() {
        let q = ScreenKind::Question;
        assert_eq!(hit_test(q, Vec2::new(200.0, 290.0)), Some(ButtonAction::Answer(AnswerLabel::A)));
        assert_eq!(hit_test(q, Vec2::new(600.0, 290.0)), Some(ButtonAction::Answer(AnswerLabel::B)));
        assert_eq!(hit_test(q, Vec2::new(200.0, 390.0)), Some(ButtonAction::Answer(AnswerLabel::C)));
        assert_eq!(hit_test(q, Vec2::new(600.0, 390.0)), Some(ButtonAction::Answer(AnswerLabel::D)));
        // The gap between columns.
        assert_eq!(hit_test(q, Vec2::new(400.0, 290.0)), None);
    }

    #[test]
    fn buttons_only_live_on_their_screen() {
        let restart_spot = Vec2::new(400.0, 480.0);
        assert_eq!(hit_test(ScreenKind::Result, restart_spot), Some(ButtonAction::Restart));
        assert_eq!(hit_test(ScreenKind::Feedback, restart_spot), None);
        assert_eq!(hit_test(ScreenKind::Feedback, Vec2::new(200.0, 290.0)), None);
        assert_eq!(hit_test(ScreenKind::Start, Vec2::new(200.0, 290.0)), None);
    }

    #[test]
    fn coordinate_round_trip() {
        assert_eq!(canvas_to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
        assert_eq!(canvas_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        let p = Vec2::new(123.0, 456.0);
        assert_eq!(world_to_canvas(canvas_to_world(p)), p);
    }
}
