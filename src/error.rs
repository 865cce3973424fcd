//! Startup errors: loading the question bank and reading settings.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a usable question bank at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open question file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read question data: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row} has {found} fields, expected 6 (prompt, A, B, C, D, answer)")]
    Malformed { row: usize, found: usize },

    #[error("row {row} names answer {label:?}, expected one of A, B, C, D")]
    UnknownLabel { row: usize, label: String },

    #[error("question file contains no questions")]
    Empty,
}

/// A setting that was present but unusable. The default is used instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ignoring QUIZ_SEED={raw:?}: {source}")]
    BadSeed {
        raw: String,
        #[source]
        source: ParseIntError,
    },
}
