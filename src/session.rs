//! Quiz state machine: Start -> Question -> Feedback -> (Question | Result) -> Start.

use bevy::prelude::*;
use rand::Rng;
use uuid::Uuid;

use crate::commentary::commentary;
use crate::layout::ButtonAction;
use crate::particles::Fireworks;
use crate::questions::{AnswerLabel, QuestionBank, QuestionRecord};

/// Feedback is shown for 1.5 s of 60 Hz ticks.
pub const FEEDBACK_TICKS: u32 = 90;
/// Ticks between firework launches on a perfect result.
pub const FIREWORK_INTERVAL: u32 = 30;

/// One playthrough's questions and progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizSession {
    questions: Vec<QuestionRecord>,
    index: usize,
    score: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            questions,
            index: 0,
            score: 0,
        }
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.index)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.total() > 0 && self.score == self.total()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackContext {
    pub correct: bool,
    pub correct_label: AnswerLabel,
    pub remaining_ticks: u32,
}

impl FeedbackContext {
    pub fn message(&self) -> String {
        if self.correct {
            "答對了！".to_string()
        } else {
            format!("答錯了... 正確答案是 {}", self.correct_label)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultContext {
    /// Ticks spent on the result screen so far.
    pub ticks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Question,
    Feedback(FeedbackContext),
    Result(ResultContext),
}

/// Payload-free tag of [`Screen`], for matching geometry and entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Start,
    Question,
    Feedback,
    Result,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Start => ScreenKind::Start,
            Screen::Question => ScreenKind::Question,
            Screen::Feedback(_) => ScreenKind::Feedback,
            Screen::Result(_) => ScreenKind::Result,
        }
    }
}

/// What a transition did, for logging.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub enum QuizEvent {
    Started { session_id: Uuid, questions: usize },
    Answered { label: AnswerLabel, correct: bool },
    Advanced { index: usize },
    Finished { score: usize, total: usize },
    Restarted { session_id: Uuid },
}

/// The whole mutable game world apart from the ambient backdrop.
#[derive(Resource, Clone, Debug)]
pub struct Quiz {
    session: QuizSession,
    screen: Screen,
    fireworks: Fireworks,
    session_id: Uuid,
}

impl Quiz {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            session: QuizSession::new(questions),
            screen: Screen::Start,
            fireworks: Fireworks::default(),
            session_id: Uuid::new_v4(),
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn fireworks(&self) -> &Fireworks {
        &self.fireworks
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn commentary(&self) -> &'static str {
        let score = i32::try_from(self.session.score).unwrap_or(i32::MAX);
        let total = i32::try_from(self.session.total()).unwrap_or(i32::MAX);
        commentary(score, total)
    }

    /// Applies a button press. Presses that do not belong to the current
    /// screen change nothing and return `None`.
    pub fn press<R: Rng + ?Sized>(
        &mut self,
        action: ButtonAction,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Option<QuizEvent> {
        match (self.screen, action) {
            (Screen::Start, ButtonAction::Start) => Some(self.begin()),
            (Screen::Question, ButtonAction::Answer(label)) => self.submit(label),
            (Screen::Result(_), ButtonAction::Restart) => Some(self.restart(bank, rng)),
            _ => None,
        }
    }

    fn begin(&mut self) -> QuizEvent {
        if self.session.total() == 0 {
            self.screen = Screen::Result(ResultContext::default());
            return QuizEvent::Finished { score: 0, total: 0 };
        }
        self.screen = Screen::Question;
        QuizEvent::Started {
            session_id: self.session_id,
            questions: self.session.total(),
        }
    }

    fn submit(&mut self, label: AnswerLabel) -> Option<QuizEvent> {
        let correct_label = self.session.current()?.correct;
        let correct = label == correct_label;
        if correct {
            self.session.score += 1;
        }
        self.screen = Screen::Feedback(FeedbackContext {
            correct,
            correct_label,
            remaining_ticks: FEEDBACK_TICKS,
        });
        Some(QuizEvent::Answered { label, correct })
    }

    /// Throws away the finished session and draws a new one.
    pub fn restart<R: Rng + ?Sized>(&mut self, bank: &QuestionBank, rng: &mut R) -> QuizEvent {
        self.session = QuizSession::new(bank.draw_session(rng));
        self.screen = Screen::Start;
        self.fireworks.clear();
        self.session_id = Uuid::new_v4();
        QuizEvent::Restarted {
            session_id: self.session_id,
        }
    }

    /// Advances one 60 Hz tick: the feedback countdown, or the result
    /// screen's fireworks when every answer was right.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<QuizEvent> {
        match &mut self.screen {
            Screen::Feedback(feedback) => {
                feedback.remaining_ticks = feedback.remaining_ticks.saturating_sub(1);
                if feedback.remaining_ticks > 0 {
                    return None;
                }
                Some(self.next_question())
            }
            Screen::Result(result) => {
                if self.session.is_perfect() {
                    if result.ticks % FIREWORK_INTERVAL == 0 {
                        self.fireworks.launch(rng);
                    }
                    self.fireworks.step();
                }
                result.ticks += 1;
                None
            }
            Screen::Start | Screen::Question => None,
        }
    }

    fn next_question(&mut self) -> QuizEvent {
        if self.session.is_last() {
            self.screen = Screen::Result(ResultContext::default());
            return QuizEvent::Finished {
                score: self.session.score,
                total: self.session.total(),
            };
        }
        self.session.index += 1;
        self.screen = Screen::Question;
        QuizEvent::Advanced {
            index: self.session.index,
        }
    }
}
