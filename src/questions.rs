//! Question bank: CSV loading and the two-stage session draw.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::LoadError;

/// Questions drawn from the whole bank into the rotating pool.
pub const POOL_SIZE: usize = 10;
/// Questions drawn from the pool into one session.
pub const SESSION_SIZE: usize = 5;

const FIELDS_PER_ROW: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub const ALL: [AnswerLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRecord {
    pub prompt: String,
    pub options: [String; 4],
    pub correct: AnswerLabel,
}

impl QuestionRecord {
    pub fn option(&self, label: AnswerLabel) -> &str {
        &self.options[label.index()]
    }
}

/// Every question loaded at startup. Never changes afterwards.
#[derive(Resource, Clone, Debug, Default)]
pub struct QuestionBank(Vec<QuestionRecord>);

impl QuestionBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self(questions)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parses headerless rows of `prompt,A,B,C,D,answer`. Extra trailing
    /// fields are ignored; short rows fail the whole load.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut questions = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            if record.len() < FIELDS_PER_ROW {
                return Err(LoadError::Malformed {
                    row,
                    found: record.len(),
                });
            }

            let field = |n: usize| record.get(n).unwrap_or_default().to_string();
            let label = field(5);
            let correct = label
                .parse()
                .map_err(|()| LoadError::UnknownLabel { row, label })?;

            questions.push(QuestionRecord {
                prompt: field(0),
                options: [field(1), field(2), field(3), field(4)],
                correct,
            });
        }

        if questions.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(Self(questions))
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Draws a fresh session with the standard pool and session sizes.
    pub fn draw_session<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<QuestionRecord> {
        sample_session(&self.0, POOL_SIZE, SESSION_SIZE, rng)
    }
}

/// Shuffles the bank and keeps `pool_size` of it, then shuffles that pool and
/// keeps `take_size`. The second draw is not collapsed into the first.
pub fn sample_session<R: Rng + ?Sized>(
    all: &[QuestionRecord],
    pool_size: usize,
    take_size: usize,
    rng: &mut R,
) -> Vec<QuestionRecord> {
    let mut pool = all.to_vec();
    pool.shuffle(rng);
    pool.truncate(pool_size.min(all.len()));

    let take = take_size.min(pool.len());
    pool.shuffle(rng);
    pool.truncate(take);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn bank_of(n: usize) -> Vec<QuestionRecord> {
        (0..n)
            .map(|i| QuestionRecord {
                prompt: format!("q{i}"),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
                correct: AnswerLabel::ALL[i % 4],
            })
            .collect()
    }

    #[test]
    fn parses_rows_without_header() {
        let csv = "p5.js 的畫布函式?,createCanvas,makeCanvas,newCanvas,canvas,A\n\
                   \"Quoted, prompt\",1,2,3,4, d \n";
        let bank = QuestionBank::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(bank.len(), 2);

        let first = &bank.questions()[0];
        assert_eq!(first.prompt, "p5.js 的畫布函式?");
        assert_eq!(first.option(AnswerLabel::A), "createCanvas");
        assert_eq!(first.correct, AnswerLabel::A);

        let second = &bank.questions()[1];
        assert_eq!(second.prompt, "Quoted, prompt");
        assert_eq!(second.correct, AnswerLabel::D);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let bank = QuestionBank::from_reader("q,a,b,c,d,B,note\n".as_bytes()).unwrap();
        assert_eq!(bank.questions()[0].correct, AnswerLabel::B);
    }

    #[test]
    fn short_row_fails_the_load() {
        let csv = "q,a,b,c,d,A\nq2,a,b,c,d\n";
        match QuestionBank::from_reader(csv.as_bytes()) {
            Err(LoadError::Malformed { row, found }) => {
                assert_eq!(row, 2);
                assert_eq!(found, 5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_label_fails_the_load() {
        let err = QuestionBank::from_reader("q,a,b,c,d,E\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownLabel { row: 1, ref label } if label == "E"));
    }

    #[test]
    fn empty_source_is_an_error() {
        let err = QuestionBank::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = QuestionBank::load("no/such/questions.csv").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("no/such/questions.csv"));
    }

    #[test]
    fn session_size_follows_bank_size() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in [0, 1, 4, 5, 7, 10, 30] {
            let bank = bank_of(n);
            for _ in 0..20 {
                let session = sample_session(&bank, POOL_SIZE, SESSION_SIZE, &mut rng);
                assert_eq!(session.len(), SESSION_SIZE.min(POOL_SIZE.min(n)));

                let prompts: HashSet<_> = session.iter().map(|q| q.prompt.clone()).collect();
                assert_eq!(prompts.len(), session.len(), "duplicate in session");
                assert!(session.iter().all(|q| bank.contains(q)));
            }
        }
    }

    #[test]
    fn five_question_bank_uses_every_question() {
        let bank = QuestionBank::new(bank_of(5));
        let mut rng = StdRng::seed_from_u64(11);
        let session = bank.draw_session(&mut rng);

        let mut drawn: Vec<_> = session.iter().map(|q| q.prompt.as_str()).collect();
        drawn.sort_unstable();
        assert_eq!(drawn, ["q0", "q1", "q2", "q3", "q4"]);
    }

    #[test]
    fn large_bank_sessions_vary() {
        let bank = QuestionBank::new(bank_of(40));
        let mut rng = StdRng::seed_from_u64(5);
        let seen: HashSet<String> = (0..30)
            .flat_map(|_| bank.draw_session(&mut rng))
            .map(|q| q.prompt)
            .collect();
        assert!(seen.len() > SESSION_SIZE);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(" c".parse::<AnswerLabel>(), Ok(AnswerLabel::C));
        assert!("AB".parse::<AnswerLabel>().is_err());
        assert_eq!(AnswerLabel::D.to_string(), "D");
    }
}
