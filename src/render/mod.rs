//! Per-screen entities and the systems that keep them in step with [`Quiz`].
//!
//! Every screen's entities are spawned once at startup and tagged with
//! [`ScreenScoped`]; the active screen is shown and the rest hidden each frame.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::sprite::Anchor;
use bevy::text::TextBounds;

use crate::config::QuizConfig;
use crate::layout::{canvas_to_world, ButtonAction, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::questions::{QuestionBank, QuestionRecord, POOL_SIZE, SESSION_SIZE};
use crate::session::{Quiz, Screen, ScreenKind};

pub mod backdrop;
pub mod buttons;
pub mod effects;

// COLORS
pub const BG_COLOR: Color = Color::srgb(10.0 / 255.0, 20.0 / 255.0, 40.0 / 255.0);
const CORRECT_WASH: Color = Color::srgba(0.0, 200.0 / 255.0, 100.0 / 255.0, 220.0 / 255.0);
const WRONG_WASH: Color = Color::srgba(200.0 / 255.0, 50.0 / 255.0, 50.0 / 255.0, 220.0 / 255.0);
const COMMENT_YELLOW: Color = Color::srgb(200.0 / 255.0, 200.0 / 255.0, 0.0);

// Layers
const Z_TEXT: f32 = 10.0;
const Z_WASH: f32 = 8.0;

/// Shown only while the quiz is on this screen.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenScoped(pub ScreenKind);

/// Text whose content follows the quiz state.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizText {
    Header,
    Prompt,
    FeedbackMessage,
    Score,
    Commentary,
    ButtonLabel(ButtonAction),
}

#[derive(Component)]
pub struct FeedbackWash;

#[derive(Resource, Clone, Default)]
pub struct QuizFont(pub Handle<Font>);

impl QuizFont {
    pub fn sized(&self, font_size: f32) -> TextFont {
        TextFont {
            font: self.0.clone(),
            font_size,
            ..default()
        }
    }
}

pub fn load_font(mut cmd: Commands, config: Res<QuizConfig>, asset_server: Res<AssetServer>) {
    let handle = match &config.font {
        Some(path) => {
            info!("Using font {path}");
            asset_server.load(path.clone())
        }
        None => {
            warn!("QUIZ_FONT not set, Chinese text will not render with the built-in font");
            Handle::default()
        }
    };
    cmd.insert_resource(QuizFont(handle));
}

pub fn spawn_camera(mut cmd: Commands) {
    cmd.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: CANVAS_WIDTH,
                min_height: CANVAS_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        },
    ));
}

fn at(x: f32, y: f32, z: f32) -> Transform {
    Transform::from_translation(canvas_to_world(Vec2::new(x, y)).extend(z))
}

fn start_blurb(bank_size: usize) -> String {
    format!(
        "從題庫中隨機抽取最多 {POOL_SIZE} 題，再從中隨機選 {SESSION_SIZE} 題作為本次測驗\n題庫共 {bank_size} 題"
    )
}

pub fn spawn_screens(mut cmd: Commands, font: Res<QuizFont>, bank: Res<QuestionBank>) {
    // Start (backdrop lives in `backdrop`)
    cmd.spawn((
        Text2d::new("海灘版 p5.js 題庫測驗"),
        font.sized(48.0),
        TextColor(Color::WHITE),
        at(CANVAS_WIDTH / 2.0, 70.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Start),
    ));
    cmd.spawn((
        Text2d::new(start_blurb(bank.len())),
        font.sized(20.0),
        TextColor(Color::srgba(1.0, 1.0, 1.0, 240.0 / 255.0)),
        TextLayout::new_with_justify(JustifyText::Center),
        at(CANVAS_WIDTH / 2.0, 140.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Start),
    ));

    // Question
    cmd.spawn((
        Text2d::default(),
        font.sized(28.0),
        TextColor(Color::WHITE),
        Anchor::TopLeft,
        at(40.0, 40.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Question),
        QuizText::Header,
    ));
    cmd.spawn((
        Text2d::default(),
        font.sized(28.0),
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Left),
        TextBounds::new(CANVAS_WIDTH - 80.0, 150.0),
        Anchor::TopLeft,
        at(40.0, 100.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Question),
        QuizText::Prompt,
    ));

    // Feedback
    cmd.spawn((
        Sprite::from_color(CORRECT_WASH, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
        Transform::from_xyz(0.0, 0.0, Z_WASH),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Feedback),
        FeedbackWash,
    ));
    cmd.spawn((
        Text2d::default(),
        font.sized(60.0),
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        Transform::from_xyz(0.0, 0.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Feedback),
        QuizText::FeedbackMessage,
    ));

    // Result
    cmd.spawn((
        Text2d::new("測驗結束！"),
        font.sized(50.0),
        TextColor(Color::WHITE),
        at(CANVAS_WIDTH / 2.0, 150.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Result),
    ));
    cmd.spawn((
        Text2d::default(),
        font.sized(36.0),
        TextColor(Color::WHITE),
        at(CANVAS_WIDTH / 2.0, 250.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Result),
        QuizText::Score,
    ));
    cmd.spawn((
        Text2d::default(),
        font.sized(24.0),
        TextColor(COMMENT_YELLOW),
        TextLayout::new_with_justify(JustifyText::Center),
        at(CANVAS_WIDTH / 2.0, 350.0, Z_TEXT),
        Visibility::Hidden,
        ScreenScoped(ScreenKind::Result),
        QuizText::Commentary,
    ));
}

pub fn sync_screen_visibility(quiz: Res<Quiz>, mut scoped: Query<(&ScreenScoped, &mut Visibility)>) {
    let active = quiz.screen().kind();
    for (scope, mut vis) in scoped.iter_mut() {
        let target = if scope.0 == active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        vis.set_if_neq(target);
    }
}

/// Caption for a button; answer buttons take the current question's options.
pub fn button_caption(action: ButtonAction, question: Option<&QuestionRecord>) -> String {
    match action {
        ButtonAction::Start => "開始測驗".to_string(),
        ButtonAction::Restart => "重新開始".to_string(),
        ButtonAction::Answer(label) => question
            .map(|q| format!("{label}. {}", q.option(label)))
            .unwrap_or_default(),
    }
}

pub fn header_line(index: usize, total: usize) -> String {
    format!("第 {} 題 / {total} 題", index + 1)
}

pub fn score_line(score: usize, total: usize) -> String {
    format!("你的成績: {score} / {total}")
}

pub fn sync_texts(quiz: Res<Quiz>, mut texts: Query<(&QuizText, &mut Text2d)>) {
    let session = quiz.session();
    for (kind, mut text) in texts.iter_mut() {
        let wanted = match kind {
            QuizText::Header => header_line(session.index(), session.total()),
            QuizText::Prompt => session
                .current()
                .map(|q| q.prompt.clone())
                .unwrap_or_default(),
            QuizText::FeedbackMessage => match quiz.screen() {
                Screen::Feedback(feedback) => feedback.message(),
                _ => continue,
            },
            QuizText::Score => score_line(session.score(), session.total()),
            QuizText::Commentary => quiz.commentary().to_string(),
            QuizText::ButtonLabel(action) => button_caption(*action, session.current()),
        };
        if text.0 != wanted {
            text.0 = wanted;
        }
    }
}

pub fn sync_feedback_wash(quiz: Res<Quiz>, mut wash: Query<&mut Sprite, With<FeedbackWash>>) {
    let Screen::Feedback(feedback) = quiz.screen() else {
        return;
    };
    let color = if feedback.correct {
        CORRECT_WASH
    } else {
        WRONG_WASH
    };
    for mut sprite in wash.iter_mut() {
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::AnswerLabel;

    #[test]
    fn captions() {
        let q = QuestionRecord {
            prompt: "?".into(),
            options: ["紅".into(), "綠".into(), "藍".into(), "黃".into()],
            correct: AnswerLabel::B,
        };
        assert_eq!(button_caption(ButtonAction::Start, None), "開始測驗");
        assert_eq!(button_caption(ButtonAction::Restart, Some(&q)), "重新開始");
        assert_eq!(button_caption(ButtonAction::Answer(AnswerLabel::C), Some(&q)), "C. 藍");
        assert_eq!(button_caption(ButtonAction::Answer(AnswerLabel::A), None), "");
    }

    #[test]
    fn header_counts_from_one() {
        assert_eq!(header_line(0, 5), "第 1 題 / 5 題");
        assert_eq!(header_line(4, 5), "第 5 題 / 5 題");
    }

    #[test]
    fn start_blurb_mentions_bank_size() {
        assert!(start_blurb(12).ends_with("題庫共 12 題"));
        assert!(start_blurb(12).contains("最多 10 題"));
    }
}
