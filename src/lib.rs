//! # em-quiz
//!
//! A terminal quiz on computational electromagnetism, playable locally or
//! hosted for many users over WebSocket.
//!
//! The core is [`QuizSession`]: an immutable, validated [`QuizBank`] plus one
//! attempt's progress (position, answers, completion). Front-ends drive it
//! through explicit operations and render from [`SessionView`] snapshots.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use em_quiz::{Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load questions from a JSON file
//!     let quiz = Quiz::from_json("questions.json")?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod client;
mod data;
pub mod input;
mod models;
pub mod protocol;
pub mod server;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;

pub use app::App;
pub use data::{builtin_bank, load_bank, load_bank_from_json, load_bank_from_str, LoadError};
pub use models::{
    BankError, Question, QuestionId, QuestionView, QuizBank, QuizInfo, QuizSession, Rejection,
    ReviewEntry, ReviewItem, Score, SessionView, Tier,
};
pub use ui::Cursor;

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading questions from file.
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    /// IO error while running a front-end or the server.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// WebSocket connection or handshake failure.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// A local, single-player quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a validated bank.
    pub fn new(bank: QuizBank) -> Self {
        Self {
            app: App::with_bank(bank),
        }
    }

    /// The built-in electromagnetism quiz.
    pub fn builtin() -> Result<Self, QuizError> {
        Ok(Self::new(builtin_bank()?))
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use em_quiz::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let bank = load_bank_from_json(path)?;
        Ok(Self::new(bank))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let Some(action) = input::action_for(app.phase(), key.code) else {
                continue;
            };
            if app.handle_action(action) {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_quiz_starts_on_welcome() {
        let quiz = Quiz::builtin().unwrap();
        assert_eq!(quiz.app().phase(), input::Phase::Welcome);
        assert_eq!(quiz.app().info().total_questions, 7);
    }

    #[test]
    fn test_load_error_converts() {
        let err = Quiz::from_json("/no/such/bank.json").err().unwrap();
        assert!(matches!(err, QuizError::Load(LoadError::Io { .. })));
        assert!(err.to_string().starts_with("failed to load questions"));
    }

    #[test]
    fn test_perfect_run_through_the_builtin_quiz() {
        let mut quiz = Quiz::builtin().unwrap();
        let app = quiz.app_mut();
        app.handle_action(input::Action::Start);

        let correct: Vec<usize> = app
            .session()
            .questions()
            .iter()
            .map(|q| q.correct_index)
            .collect();
        for index in correct {
            for _ in 0..=index {
                app.handle_action(input::Action::SelectNext);
            }
            app.handle_action(input::Action::Next);
        }

        let score = app.session().score();
        assert_eq!((score.correct, score.total), (7, 7));
        assert_eq!(score.tier(), Tier::Excellent);
    }
}
