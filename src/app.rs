use std::sync::Arc;

use log::{debug, info};
use ratatui::Frame;

use crate::input::{Action, Phase};
use crate::models::{QuizBank, QuizInfo, QuizSession, Rejection, SessionView};
use crate::ui::{self, Cursor, Screen};

/// Local single-player front-end state.
///
/// Owns the [`QuizSession`] and the purely visual bits (option cursor, hint
/// visibility, review scroll). Every event handler mutates the model; the
/// renderer only ever sees a fresh [`SessionView`].
pub struct App {
    session: QuizSession,
    info: QuizInfo,
    started: bool,
    cursor: Cursor,
}

impl App {
    pub fn with_bank(bank: QuizBank) -> Self {
        let info = QuizInfo::from_bank(&bank);
        let session = QuizSession::new(Arc::new(bank));
        let mut app = Self {
            session,
            info,
            started: false,
            cursor: Cursor::default(),
        };
        app.sync_cursor();
        app
    }

    pub fn info(&self) -> &QuizInfo {
        &self.info
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::Welcome
        } else if self.session.is_complete() {
            Phase::Review
        } else {
            Phase::Question
        }
    }

    /// Draw the current state. Reads a fresh snapshot every time.
    pub fn render(&self, frame: &mut Frame) {
        if !self.started {
            ui::render(frame, &Screen::Welcome(&self.info));
            return;
        }

        let view = self.view();
        ui::render(
            frame,
            &Screen::Session {
                title: &self.info.title,
                view: &view,
                cursor: &self.cursor,
            },
        );
    }

    /// Returns true if the app should exit.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Start => self.start_quiz(),
            Action::SelectNext => self.select_next_option(),
            Action::SelectPrevious => self.select_previous_option(),
            Action::ToggleHint => self.toggle_hint(),
            Action::Next => self.next_question(),
            Action::Previous => self.previous_question(),
            Action::ScrollDown => self.scroll_review_down(),
            Action::ScrollUp => self.scroll_review_up(),
            Action::Restart => self.restart(),
            Action::Quit => return true,
        }
        false
    }

    pub fn start_quiz(&mut self) {
        self.started = true;
    }

    pub fn select_next_option(&mut self) {
        if let Some(question) = self.session.current_question() {
            self.cursor.select_next(question.options.len());
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(question) = self.session.current_question() {
            self.cursor.select_previous(question.options.len());
        }
    }

    pub fn toggle_hint(&mut self) {
        self.cursor.toggle_hint();
    }

    /// Record the highlighted option (if any) and move on.
    pub fn next_question(&mut self) {
        let answer = self
            .session
            .current_question()
            .map(|q| q.id)
            .zip(self.cursor.selected);
        if let Some((id, option)) = answer {
            log_rejection(self.session.record_answer(id, option));
        }

        log_rejection(self.session.advance());

        if self.session.is_complete() {
            let score = self.session.score();
            info!(
                "Quiz completed with score {}/{} ({:.1}%)",
                score.correct,
                score.total,
                score.percentage()
            );
        }
        self.sync_cursor();
    }

    pub fn previous_question(&mut self) {
        log_rejection(self.session.retreat());
        self.sync_cursor();
    }

    pub fn scroll_review_down(&mut self) {
        self.cursor.scroll_down(self.session.total());
    }

    pub fn scroll_review_up(&mut self) {
        self.cursor.scroll_up();
    }

    pub fn restart(&mut self) {
        self.session.reset();
        self.sync_cursor();
        info!("Quiz restarted");
    }

    /// Reseed the cursor from whatever is recorded for the question on screen.
    fn sync_cursor(&mut self) {
        let recorded = self
            .session
            .current_question()
            .and_then(|q| self.session.answer_for(q.id));
        self.cursor = Cursor::at(recorded);
    }
}

fn log_rejection(result: Result<(), Rejection>) {
    if let Err(rejection) = result {
        debug!("Ignored quiz action: {}", rejection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_question;

    fn app() -> App {
        let bank = QuizBank::new(
            "Test",
            "",
            Vec::new(),
            vec![
                sample_question(1, 1),
                sample_question(2, 2),
                sample_question(3, 0),
            ],
        )
        .unwrap();
        let mut app = App::with_bank(bank);
        app.start_quiz();
        app
    }

    #[test]
    fn test_next_without_selection_leaves_question_unanswered() {
        let mut app = app();
        app.next_question();
        assert_eq!(app.session().current_index(), 1);
        assert_eq!(app.session().answer_for(1), None);
    }

    #[test]
    fn test_selection_is_recorded_on_next() {
        let mut app = app();
        app.select_next_option(); // 0
        app.select_next_option(); // 1
        app.next_question();
        assert_eq!(app.session().answer_for(1), Some(1));
        assert_eq!(app.cursor().selected, None);
    }

    #[test]
    fn test_cursor_restored_when_going_back() {
        let mut app = app();
        app.select_previous_option(); // wraps to the last option
        app.next_question();
        app.previous_question();
        assert_eq!(app.cursor().selected, Some(2));
        assert_eq!(app.session().answer_for(1), Some(2));
    }

    #[test]
    fn test_complete_and_restart() {
        let mut app = app();
        for _ in 0..3 {
            app.select_next_option();
            app.next_question();
        }
        assert!(app.view().is_completed());
        assert_eq!(app.session().score().correct, 1);

        app.restart();
        assert!(!app.session().is_complete());
        assert_eq!(app.session().answered_count(), 0);
        assert!(app.is_started());
    }

    #[test]
    fn test_phases_follow_the_session() {
        let bank = QuizBank::new("Test", "", Vec::new(), vec![sample_question(1, 0)]).unwrap();
        let mut app = App::with_bank(bank);
        assert_eq!(app.phase(), Phase::Welcome);

        assert!(!app.handle_action(Action::Start));
        assert_eq!(app.phase(), Phase::Question);

        app.handle_action(Action::SelectNext);
        app.handle_action(Action::Next);
        assert_eq!(app.phase(), Phase::Review);
        assert_eq!(app.session().score().correct, 1);

        app.handle_action(Action::Restart);
        assert_eq!(app.phase(), Phase::Question);
        assert!(app.handle_action(Action::Quit));
    }

    #[test]
    fn test_hint_resets_between_questions() {
        let mut app = app();
        app.toggle_hint();
        assert!(app.cursor().show_hint);
        app.next_question();
        assert!(!app.cursor().show_hint);
    }
}
