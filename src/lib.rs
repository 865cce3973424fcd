//! BEACH QUIZ - five random questions from a CSV bank, answered with the mouse.
//!
//! Game rules live in plain types ([`questions`], [`session`], [`particles`]);
//! the bevy systems in [`input`] and [`render`] only feed them pointer presses
//! and draw what they hold.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod commentary;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod particles;
pub mod questions;
pub mod render;
pub mod session;

use crate::config::QuizConfig;
use crate::particles::{AmbientField, AMBIENT_COUNT};
use crate::questions::QuestionBank;
use crate::render::{backdrop, buttons, effects};
use crate::session::{Quiz, QuizEvent};

/// Simulation rate. Countdowns and particle speeds are tuned per tick at 60 Hz.
pub const TICK_HZ: f64 = 60.0;

/// Randomness for session draws and effects, seedable for reproducible runs.
#[derive(Resource)]
pub struct QuizRng(pub StdRng);

impl QuizRng {
    pub fn new(seed: Option<u64>) -> Self {
        Self(match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        })
    }
}

/// Wires the quiz into an app that already has `DefaultPlugins`.
pub struct QuizPlugin {
    config: QuizConfig,
    bank: QuestionBank,
}

impl QuizPlugin {
    pub fn new(config: QuizConfig, bank: QuestionBank) -> Self {
        Self { config, bank }
    }
}

impl Plugin for QuizPlugin {
    fn build(&self, app: &mut App) {
        let mut rng = QuizRng::new(self.config.seed);
        let quiz = Quiz::new(self.bank.draw_session(&mut rng.0));
        let field = AmbientField::scatter(AMBIENT_COUNT, &mut rng.0);
        info!(
            "Loaded {} questions, session {} has {}",
            self.bank.len(),
            quiz.session_id(),
            quiz.session().total()
        );

        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .insert_resource(self.config.clone())
            .insert_resource(self.bank.clone())
            .insert_resource(quiz)
            .insert_resource(field)
            .insert_resource(rng)
            .add_event::<QuizEvent>()
            .add_systems(
                Startup,
                (
                    render::load_font,
                    (
                        render::spawn_camera,
                        backdrop::spawn_backdrop,
                        render::spawn_screens,
                        buttons::spawn_buttons,
                        effects::spawn_ambient_dots,
                    ),
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, (step_ambient, tick_quiz))
            .add_systems(
                Update,
                (
                    input::handle_press,
                    (
                        render::sync_screen_visibility,
                        render::sync_texts,
                        render::sync_feedback_wash,
                        buttons::hover_buttons,
                        effects::sync_ambient_dots,
                        effects::sync_sparks,
                    ),
                    log_quiz_events,
                )
                    .chain(),
            );
    }
}

fn step_ambient(mut field: ResMut<AmbientField>) {
    field.step();
}

fn tick_quiz(
    mut quiz: ResMut<Quiz>,
    mut rng: ResMut<QuizRng>,
    mut events: EventWriter<QuizEvent>,
) {
    if let Some(event) = quiz.tick(&mut rng.0) {
        events.send(event);
    }
}

fn log_quiz_events(mut events: EventReader<QuizEvent>) {
    for event in events.read() {
        match event {
            QuizEvent::Started {
                session_id,
                questions,
            } => info!("Session {session_id} started with {questions} questions"),
            QuizEvent::Answered { label, correct } => {
                debug!("Answered {label} ({})", if *correct { "correct" } else { "wrong" })
            }
            QuizEvent::Advanced { index } => debug!("Question {}", index + 1),
            QuizEvent::Finished { score, total } => info!("Quiz finished: {score} / {total}"),
            QuizEvent::Restarted { session_id } => {
                info!("Game restarted with new session: {session_id}")
            }
        }
    }
}
