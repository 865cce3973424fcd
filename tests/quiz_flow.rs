use std::collections::HashSet;

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use beach_quiz::layout::{hit_test, ButtonAction, BUTTONS};
use beach_quiz::questions::{AnswerLabel, QuestionBank};
use beach_quiz::render::score_line;
use beach_quiz::session::{Quiz, QuizEvent, Screen, ScreenKind, FEEDBACK_TICKS};

const FIVE: &str = "\
第一題,a1,b1,c1,d1,A
第二題,a2,b2,c2,d2,B
第三題,a3,b3,c3,d3,C
第四題,a4,b4,c4,d4,D
第五題,a5,b5,c5,d5,A
";

fn center_of(action: ButtonAction) -> Vec2 {
    BUTTONS
        .iter()
        .find(|b| b.action == action)
        .map(|b| b.bounds.center())
        .unwrap()
}

/// Clicks like a player would: through hit-testing on the active screen.
fn click(quiz: &mut Quiz, bank: &QuestionBank, rng: &mut StdRng, at: Vec2) -> Option<QuizEvent> {
    let action = hit_test(quiz.screen().kind(), at)?;
    quiz.press(action, bank, rng)
}

fn wait_out_feedback(quiz: &mut Quiz, rng: &mut StdRng) {
    for _ in 0..FEEDBACK_TICKS {
        quiz.tick(rng);
    }
}

#[test]
fn five_question_bank_plays_every_question_once() {
    let bank = QuestionBank::from_reader(FIVE.as_bytes()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut quiz = Quiz::new(bank.draw_session(&mut rng));

    assert!(click(&mut quiz, &bank, &mut rng, center_of(ButtonAction::Start)).is_some());

    let mut seen = HashSet::new();
    let mut expected_score = 0;
    let mut last_score = 0;
    for round in 0..5 {
        assert_eq!(*quiz.screen(), Screen::Question);
        assert_eq!(quiz.session().index(), round);

        let question = quiz.session().current().unwrap().clone();
        seen.insert(question.prompt.clone());

        // Right on even rounds, wrong on odd ones.
        let pick = if round % 2 == 0 {
            expected_score += 1;
            question.correct
        } else {
            *AnswerLabel::ALL.iter().find(|l| **l != question.correct).unwrap()
        };
        click(&mut quiz, &bank, &mut rng, center_of(ButtonAction::Answer(pick)));
        assert_eq!(quiz.screen().kind(), ScreenKind::Feedback);

        assert!(quiz.session().score() >= last_score);
        last_score = quiz.session().score();

        wait_out_feedback(&mut quiz, &mut rng);
    }

    assert_eq!(seen.len(), 5);
    assert_eq!(quiz.screen().kind(), ScreenKind::Result);
    assert_eq!(quiz.session().score(), expected_score);
    assert_eq!(
        score_line(quiz.session().score(), quiz.session().total()),
        "你的成績: 3 / 5"
    );
    assert_eq!(quiz.commentary(), "一坨答辯");
}

#[test]
fn clicks_off_buttons_change_nothing() {
    let bank = QuestionBank::from_reader(FIVE.as_bytes()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mut quiz = Quiz::new(bank.draw_session(&mut rng));

    assert_eq!(click(&mut quiz, &bank, &mut rng, Vec2::new(5.0, 5.0)), None);
    assert_eq!(*quiz.screen(), Screen::Start);

    click(&mut quiz, &bank, &mut rng, center_of(ButtonAction::Start));
    // Where the restart button would be on the result screen.
    assert_eq!(click(&mut quiz, &bank, &mut rng, Vec2::new(400.0, 500.0)), None);
    assert_eq!(*quiz.screen(), Screen::Question);
}

#[test]
fn perfect_run_fires_fireworks_and_restart_clears_them() {
    let bank = QuestionBank::from_reader(FIVE.as_bytes()).unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    let mut quiz = Quiz::new(bank.draw_session(&mut rng));

    click(&mut quiz, &bank, &mut rng, center_of(ButtonAction::Start));
    while quiz.screen().kind() != ScreenKind::Result {
        let label = quiz.session().current().unwrap().correct;
        click(&mut quiz, &bank, &mut rng, center_of(ButtonAction::Answer(label)));
        wait_out_feedback(&mut quiz, &mut rng);
    }
    assert_eq!(quiz.commentary(), "你牛逼");

    // Track the first burst by its origin until it has burned out.
    quiz.tick(&mut rng);
    let first_origin = quiz.fireworks().bursts()[0].origin;
    let mut max_bursts = 0;
    for _ in 0..60 {
        quiz.tick(&mut rng);
        max_bursts = max_bursts.max(quiz.fireworks().bursts().len());
    }
    assert!(max_bursts >= 2, "a second burst should launch within 60 ticks");

    for _ in 0..30 {
        quiz.tick(&mut rng);
    }
    assert!(
        quiz.fireworks().bursts().iter().all(|b| b.origin != first_origin),
        "first burst should be gone after its 85 tick life"
    );

    let restart = click(&mut quiz, &bank, &mut rng, center_of(ButtonAction::Restart));
    assert!(matches!(restart, Some(QuizEvent::Restarted { .. })));
    assert_eq!(*quiz.screen(), Screen::Start);
    assert_eq!(quiz.session().score(), 0);
    assert_eq!(quiz.session().index(), 0);
    assert_eq!(quiz.fireworks().spark_count(), 0);
}
