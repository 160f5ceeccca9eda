//! Quiz progress for a single attempt.
//!
//! A [`QuizSession`] owns a shared handle to the question bank plus the
//! mutable progress record: current position, recorded answers and the
//! completion flag. Every mutating operation either applies fully or returns a
//! [`Rejection`] and leaves the session untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use super::question::{Question, QuestionId, QuizBank};
use super::score::Score;

/// Why an operation was not applied. The session is unchanged in every case.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("the quiz is already completed")]
    Completed,

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),

    #[error("question {0} is not the current question")]
    NotCurrentQuestion(QuestionId),

    #[error("question {question_id} has no option {option}")]
    OptionOutOfRange {
        question_id: QuestionId,
        option: usize,
    },
}

/// One line of the post-completion review.
#[derive(Debug, Clone, Copy)]
pub struct ReviewEntry<'a> {
    pub question: &'a Question,
    pub chosen: Option<usize>,
}

impl ReviewEntry<'_> {
    pub fn is_correct(&self) -> bool {
        self.chosen.is_some_and(|c| self.question.is_correct(c))
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuizBank>,
    current_index: usize,
    answers: BTreeMap<QuestionId, usize>,
    completed: bool,
}

impl QuizSession {
    pub fn new(bank: Arc<QuizBank>) -> Self {
        Self {
            bank,
            current_index: 0,
            answers: BTreeMap::new(),
            completed: false,
        }
    }

    pub fn bank(&self) -> &QuizBank {
        &self.bank
    }

    pub fn questions(&self) -> &[Question] {
        self.bank.questions()
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.bank.questions().get(self.current_index)
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn answer_for(&self, question_id: QuestionId) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// `(current_index + 1) / total`, clamped to 1.0. Display only.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total().max(1);
        ((self.current_index + 1) as f64 / total as f64).min(1.0)
    }

    /// Record (or overwrite) the answer for the question currently shown.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        option_index: usize,
    ) -> Result<(), Rejection> {
        if self.completed {
            return Err(Rejection::Completed);
        }

        let question = self
            .bank
            .get(question_id)
            .ok_or(Rejection::UnknownQuestion(question_id))?;

        if self.current_question().map(|q| q.id) != Some(question_id) {
            return Err(Rejection::NotCurrentQuestion(question_id));
        }

        if question.option(option_index).is_none() {
            return Err(Rejection::OptionOutOfRange {
                question_id,
                option: option_index,
            });
        }

        self.answers.insert(question_id, option_index);
        Ok(())
    }

    /// Move to the next question, or complete the quiz when on the last one.
    /// An answer for the current question is not required.
    pub fn advance(&mut self) -> Result<(), Rejection> {
        if self.completed {
            return Err(Rejection::Completed);
        }

        if self.current_index + 1 >= self.total() {
            self.completed = true;
        } else {
            self.current_index += 1;
        }
        Ok(())
    }

    /// Step back one question. Recorded answers are kept.
    pub fn retreat(&mut self) -> Result<(), Rejection> {
        if self.completed {
            return Err(Rejection::Completed);
        }
        if self.current_index == 0 {
            return Err(Rejection::AtFirstQuestion);
        }

        self.current_index -= 1;
        Ok(())
    }

    pub fn score(&self) -> Score {
        let correct = self
            .questions()
            .iter()
            .filter(|q| self.answer_for(q.id).is_some_and(|a| q.is_correct(a)))
            .count();

        Score {
            correct,
            total: self.total(),
        }
    }

    /// Every question in bank order alongside the recorded answer.
    pub fn review(&self) -> Vec<ReviewEntry<'_>> {
        self.questions()
            .iter()
            .map(|question| ReviewEntry {
                question,
                chosen: self.answer_for(question.id),
            })
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.bank));
    }
}
