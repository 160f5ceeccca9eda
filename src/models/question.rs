use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of a question inside a bank.
pub type QuestionId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub hint: String,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// Reasons a question bank is refused at load time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("the bank must contain at least one question")]
    Empty,

    #[error("question ids must be positive")]
    ZeroId,

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),

    #[error("question {id} has {count} options, at least 2 are required")]
    TooFewOptions { id: QuestionId, count: usize },

    #[error("question {id} marks option {index} as correct but only has {options} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        options: usize,
    },
}

/// An ordered, validated question bank.
///
/// The fields are private so that every `QuizBank` in existence went through
/// [`QuizBank::new`]; sessions rely on the bank being non-empty and on every
/// `correct_index` pointing at a real option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBank")]
pub struct QuizBank {
    title: String,
    description: String,
    topics: Vec<String>,
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct RawBank {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    topics: Vec<String>,
    questions: Vec<Question>,
}

impl TryFrom<RawBank> for QuizBank {
    type Error = BankError;

    fn try_from(raw: RawBank) -> Result<Self, Self::Error> {
        Self::new(raw.title, raw.description, raw.topics, raw.questions)
    }
}

impl QuizBank {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        topics: Vec<String>,
        questions: Vec<Question>,
    ) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if question.id == 0 {
                return Err(BankError::ZeroId);
            }
            if !seen.insert(question.id) {
                return Err(BankError::DuplicateId(question.id));
            }
            if question.options.len() < 2 {
                return Err(BankError::TooFewOptions {
                    id: question.id,
                    count: question.options.len(),
                });
            }
            if question.correct_index >= question.options.len() {
                return Err(BankError::CorrectIndexOutOfRange {
                    id: question.id,
                    index: question.correct_index,
                    options: question.options.len(),
                });
            }
        }

        Ok(Self {
            title: title.into(),
            description: description.into(),
            topics,
            questions,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated bank; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: QuestionId, correct_index: usize) -> Question {
    Question {
        id,
        prompt: format!("Question {}", id),
        options: vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ],
        correct_index,
        explanation: format!("Explanation {}", id),
        hint: format!("Hint {}", id),
    }
}
