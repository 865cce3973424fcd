//! Runtime settings from `QUIZ_*` environment variables.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::error::ConfigError;

const DEFAULT_QUESTIONS: &str = "assets/questions.csv";

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// CSV question bank, read once before the window opens.
    pub questions_path: PathBuf,
    /// Asset path of a font with CJK glyphs. Bevy's built-in font has none.
    pub font: Option<String>,
    /// Fixed seed for question sampling and effects.
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_path: PathBuf::from(DEFAULT_QUESTIONS),
            font: None,
            seed: None,
        }
    }
}

impl QuizConfig {
    /// Reads the process environment. Call once logging is up: rejected
    /// values are reported through `warn!`.
    pub fn from_env() -> Self {
        let (config, rejected) = Self::from_lookup(|key| std::env::var(key).ok());
        for e in rejected {
            warn!("{e}");
        }
        config
    }

    /// Builds the config from any key lookup; empty values count as unset.
    /// Values that fail to parse fall back to the default and are returned
    /// alongside the config.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (Self, Vec<ConfigError>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("QUIZ_QUESTIONS") {
            config.questions_path = PathBuf::from(path);
        }
        config.font = get("QUIZ_FONT");
        let mut rejected = Vec::new();
        config.seed = get("QUIZ_SEED").and_then(|raw| match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(source) => {
                rejected.push(ConfigError::BadSeed { raw, source });
                None
            }
        });

        (config, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let (config, rejected) = QuizConfig::from_lookup(lookup(&[]));
        assert_eq!(config, QuizConfig::default());
        assert!(rejected.is_empty());
    }

    #[test]
    fn reads_all_keys() {
        let (config, rejected) = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_QUESTIONS", "/tmp/bank.csv"),
            ("QUIZ_FONT", "fonts/NotoSansTC.ttf"),
            ("QUIZ_SEED", " 42 "),
        ]));
        assert_eq!(config.questions_path, PathBuf::from("/tmp/bank.csv"));
        assert_eq!(config.font.as_deref(), Some("fonts/NotoSansTC.ttf"));
        assert_eq!(config.seed, Some(42));
        assert!(rejected.is_empty());
    }

    #[test]
    fn bad_seed_and_blank_values_are_ignored() {
        let (config, rejected) = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_SEED", "tomorrow"),
            ("QUIZ_FONT", "  "),
        ]));
        assert_eq!(config.seed, None);
        assert_eq!(config.font, None);

        // Only the seed was unusable; the blank font is simply unset.
        assert_eq!(rejected.len(), 1);
        assert!(matches!(&rejected[0], ConfigError::BadSeed { raw, .. } if raw == "tomorrow"));
        assert!(rejected[0].to_string().starts_with("ignoring QUIZ_SEED=\"tomorrow\""));
    }
}
