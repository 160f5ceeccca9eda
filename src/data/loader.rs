use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::models::QuizBank;

const BUILTIN_QUESTIONS: &str = include_str!("../../data/questions.json");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed JSON or a bank that failed validation.
    #[error("invalid question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The electromagnetism bank compiled into the binary.
pub fn builtin_bank() -> Result<QuizBank, LoadError> {
    load_bank_from_str(BUILTIN_QUESTIONS)
}

pub fn load_bank_from_str(json: &str) -> Result<QuizBank, LoadError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_bank_from_json<P: AsRef<Path>>(path: P) -> Result<QuizBank, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = load_bank_from_str(&json_content)?;
    info!("Loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}

/// Load from `path` when given, otherwise fall back to the built-in bank.
pub fn load_bank(path: Option<&Path>) -> Result<QuizBank, LoadError> {
    match path {
        Some(path) => load_bank_from_json(path),
        None => builtin_bank(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = builtin_bank().unwrap();
        assert_eq!(bank.len(), 7);
        assert_eq!(bank.title(), "Computational Electromagnetism Quiz");
        assert!(!bank.topics().is_empty());

        let correct: Vec<usize> = bank.questions().iter().map(|q| q.correct_index).collect();
        assert_eq!(correct, vec![1, 2, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_invalid_bank_is_a_parse_error() {
        let err = load_bank_from_str(r#"{"title": "x", "questions": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().contains("at least one question"));

        let err = load_bank_from_str("not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_bank_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_load_bank_defaults_to_builtin() {
        assert_eq!(load_bank(None).unwrap().len(), 7);
    }
}
