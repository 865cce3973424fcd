//! BEACH QUIZ - five questions, four buttons, one shot at fireworks.

use anyhow::Context;
use bevy::prelude::*;

use beach_quiz::config::QuizConfig;
use beach_quiz::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use beach_quiz::questions::QuestionBank;
use beach_quiz::render::BG_COLOR;
use beach_quiz::QuizPlugin;

fn main() -> anyhow::Result<()> {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "海灘版 p5.js 題庫測驗".into(),
            resolution: (CANVAS_WIDTH, CANVAS_HEIGHT).into(),
            resizable: false,
            ..default()
        }),
        ..default()
    }));

    // Load env vars. DefaultPlugins has installed the logger by now, so
    // rejected settings are reported.
    let _ = dotenvy::dotenv();
    let config = QuizConfig::from_env();

    // The bank is read in full before the first frame; no questions, no game.
    let bank = QuestionBank::load(&config.questions_path)
        .inspect_err(|e| error!("Cannot start the quiz: {e}"))
        .with_context(|| {
            format!(
                "failed to load questions from {}",
                config.questions_path.display()
            )
        })?;

    app.insert_resource(ClearColor(BG_COLOR))
        .add_plugins(QuizPlugin::new(config, bank))
        .run();

    Ok(())
}
