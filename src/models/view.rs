//! Owned snapshots of a session, used by the renderers and sent over the wire.

use serde::{Deserialize, Serialize};

use super::question::{QuestionId, QuizBank};
use super::score::{Score, Tier};
use super::session::{QuizSession, ReviewEntry};

/// Static information about a bank, shown on the welcome screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizInfo {
    pub title: String,
    pub description: String,
    pub topics: Vec<String>,
    pub total_questions: usize,
}

impl QuizInfo {
    pub fn from_bank(bank: &QuizBank) -> Self {
        Self {
            title: bank.title().to_string(),
            description: bank.description().to_string(),
            topics: bank.topics().to_vec(),
            total_questions: bank.len(),
        }
    }
}

/// A question as shown while answering. The correct index and the
/// explanation stay on the session side until the quiz is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub chosen: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

impl ReviewItem {
    pub fn chosen_text(&self) -> Option<&str> {
        self.chosen
            .and_then(|c| self.options.get(c))
            .map(String::as_str)
    }

    pub fn correct_text(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl From<ReviewEntry<'_>> for ReviewItem {
    fn from(entry: ReviewEntry<'_>) -> Self {
        Self {
            id: entry.question.id,
            prompt: entry.question.prompt.clone(),
            options: entry.question.options.clone(),
            chosen: entry.chosen,
            correct_index: entry.question.correct_index,
            is_correct: entry.is_correct(),
            explanation: entry.question.explanation.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum SessionView {
    InProgress {
        /// 0-based index of the question shown.
        position: usize,
        total: usize,
        progress: f64,
        answered: usize,
        question: QuestionView,
        /// Previously recorded answer for this question, if any.
        recorded: Option<usize>,
    },
    Completed {
        score: Score,
        tier: Tier,
        review: Vec<ReviewItem>,
    },
}

impl SessionView {
    pub fn capture(session: &QuizSession) -> Self {
        match session.current_question() {
            Some(question) if !session.is_complete() => Self::InProgress {
                position: session.current_index(),
                total: session.total(),
                progress: session.progress_fraction(),
                answered: session.answered_count(),
                question: QuestionView {
                    id: question.id,
                    prompt: question.prompt.clone(),
                    options: question.options.clone(),
                    hint: question.hint.clone(),
                },
                recorded: session.answer_for(question.id),
            },
            _ => {
                let score = session.score();
                Self::Completed {
                    score,
                    tier: score.tier(),
                    review: session.review().into_iter().map(ReviewItem::from).collect(),
                }
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Id of the question on screen, if still answering.
    pub fn question_id(&self) -> Option<QuestionId> {
        match self {
            Self::InProgress { question, .. } => Some(question.id),
            Self::Completed { .. } => None,
        }
    }
}

impl QuizSession {
    pub fn view(&self) -> SessionView {
        SessionView::capture(self)
    }
}
