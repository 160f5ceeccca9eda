//! Client state management.

use crate::input::Phase;
use crate::models::{QuizInfo, SessionView};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::ui::{Cursor, Screen, Status};

/// Client application state.
///
/// The session itself lives on the server; the client only keeps the last
/// snapshot it received and its own cursor.
pub struct ClientApp {
    info: Option<QuizInfo>,
    view: Option<SessionView>,
    started: bool,
    cursor: Cursor,
    connecting_message: String,
    disconnected: Option<String>,
    /// Whether the client should quit.
    pub should_quit: bool,
}

impl ClientApp {
    pub fn new(host: &str, port: u16) -> Self {
        let connecting_message = format!("Connecting to {}:{}...", host, port);
        Self {
            info: None,
            view: None,
            started: false,
            cursor: Cursor::default(),
            connecting_message,
            disconnected: None,
            should_quit: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.disconnected.is_some() || self.info.is_none() {
            return Phase::Status;
        }
        if !self.started {
            return Phase::Welcome;
        }
        match &self.view {
            Some(SessionView::InProgress { .. }) => Phase::Question,
            Some(SessionView::Completed { .. }) => Phase::Review,
            None => Phase::Status,
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        if let Some(message) = &self.disconnected {
            return Screen::Status(Status {
                message,
                is_error: true,
            });
        }

        let Some(info) = &self.info else {
            return Screen::Status(Status {
                message: &self.connecting_message,
                is_error: false,
            });
        };

        match &self.view {
            _ if !self.started => Screen::Welcome(info),
            Some(view) => Screen::Session {
                title: &info.title,
                view,
                cursor: &self.cursor,
            },
            None => Screen::Status(Status {
                message: "Waiting for the server...",
                is_error: false,
            }),
        }
    }

    /// Apply a message from the server.
    pub fn handle_server_message(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::ConnectionAck { resumed, info } => {
                self.info = Some(info);
                // a resumed session skips the welcome screen
                self.started = resumed;
            }
            ServerMessage::Session { view } => self.set_view(view),
            ServerMessage::ServerClosing => {
                self.disconnect("Server is shutting down".to_string());
            }
        }
    }

    /// Move to disconnected state.
    pub fn disconnect(&mut self, message: String) {
        if self.disconnected.is_none() {
            self.disconnected = Some(message);
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    fn set_view(&mut self, view: SessionView) {
        let moved = match &self.view {
            Some(old) => {
                old.question_id() != view.question_id() || old.is_completed() != view.is_completed()
            }
            None => true,
        };

        if moved {
            let recorded = match &view {
                SessionView::InProgress { recorded, .. } => *recorded,
                SessionView::Completed { .. } => None,
            };
            self.cursor = Cursor::at(recorded);
        }
        self.view = Some(view);
    }

    pub fn select_next_option(&mut self) {
        if let Some(SessionView::InProgress { question, .. }) = &self.view {
            self.cursor.select_next(question.options.len());
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(SessionView::InProgress { question, .. }) = &self.view {
            self.cursor.select_previous(question.options.len());
        }
    }

    pub fn toggle_hint(&mut self) {
        self.cursor.toggle_hint();
    }

    /// Messages that record the highlighted option (if any) and advance.
    pub fn next_messages(&self) -> Vec<ClientMessage> {
        let mut messages = Vec::with_capacity(2);
        if let (Some(question_id), Some(option)) = (
            self.view.as_ref().and_then(SessionView::question_id),
            self.cursor.selected,
        ) {
            messages.push(ClientMessage::RecordAnswer {
                question_id,
                option,
            });
        }
        messages.push(ClientMessage::Advance);
        messages
    }

    /// Scroll review down.
    pub fn scroll_review_down(&mut self) {
        if let Some(SessionView::Completed { review, .. }) = &self.view {
            self.cursor.scroll_down(review.len());
        }
    }

    /// Scroll review up.
    pub fn scroll_review_up(&mut self) {
        self.cursor.scroll_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionView, Score, Tier};

    fn info() -> QuizInfo {
        QuizInfo {
            title: "T".to_string(),
            description: String::new(),
            topics: Vec::new(),
            total_questions: 2,
        }
    }

    fn question(id: u32, recorded: Option<usize>) -> SessionView {
        SessionView::InProgress {
            position: id as usize - 1,
            total: 2,
            progress: id as f64 / 2.0,
            answered: 0,
            question: QuestionView {
                id,
                prompt: "p".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                hint: "h".to_string(),
            },
            recorded,
        }
    }

    fn connected() -> ClientApp {
        let mut app = ClientApp::new("localhost", 8712);
        app.handle_server_message(ServerMessage::ConnectionAck {
            resumed: false,
            info: info(),
        });
        app.handle_server_message(ServerMessage::Session {
            view: question(1, None),
        });
        app
    }

    #[test]
    fn test_phases() {
        let mut app = ClientApp::new("localhost", 8712);
        assert_eq!(app.phase(), Phase::Status);

        app.handle_server_message(ServerMessage::ConnectionAck {
            resumed: false,
            info: info(),
        });
        assert_eq!(app.phase(), Phase::Welcome);

        app.handle_server_message(ServerMessage::Session {
            view: question(1, None),
        });
        app.start();
        assert_eq!(app.phase(), Phase::Question);

        app.handle_server_message(ServerMessage::ServerClosing);
        assert_eq!(app.phase(), Phase::Status);
    }

    #[test]
    fn test_resumed_session_skips_welcome() {
        let mut app = ClientApp::new("localhost", 8712);
        app.handle_server_message(ServerMessage::ConnectionAck {
            resumed: true,
            info: info(),
        });
        app.handle_server_message(ServerMessage::Session {
            view: question(2, Some(1)),
        });
        assert_eq!(app.phase(), Phase::Question);
        assert_eq!(app.cursor.selected, Some(1));
    }

    #[test]
    fn test_next_messages() {
        let mut app = connected();
        assert_eq!(app.next_messages(), vec![ClientMessage::Advance]);

        app.select_next_option();
        assert_eq!(
            app.next_messages(),
            vec![
                ClientMessage::RecordAnswer {
                    question_id: 1,
                    option: 0
                },
                ClientMessage::Advance,
            ]
        );
    }

    #[test]
    fn test_cursor_kept_on_same_question_and_reseeded_on_move() {
        let mut app = connected();
        app.select_next_option();
        app.toggle_hint();

        // echo of a recorded answer for the same question
        app.handle_server_message(ServerMessage::Session {
            view: question(1, Some(0)),
        });
        assert_eq!(app.cursor.selected, Some(0));
        assert!(app.cursor.show_hint);

        app.handle_server_message(ServerMessage::Session {
            view: question(2, None),
        });
        assert_eq!(app.cursor.selected, None);
        assert!(!app.cursor.show_hint);
    }

    #[test]
    fn test_review_scroll() {
        let mut app = connected();
        app.start();
        app.handle_server_message(ServerMessage::Session {
            view: SessionView::Completed {
                score: Score {
                    correct: 0,
                    total: 2,
                },
                tier: Tier::KeepPracticing,
                review: Vec::new(),
            },
        });
        assert_eq!(app.phase(), Phase::Review);
        app.scroll_review_down();
        assert_eq!(app.cursor.scroll, 0);
    }

    #[test]
    fn test_first_disconnect_message_wins() {
        let mut app = connected();
        app.disconnect("Connection closed by server".to_string());
        app.handle_server_message(ServerMessage::ServerClosing);
        assert!(matches!(
            app.screen(),
            Screen::Status(Status { message: "Connection closed by server", is_error: true })
        ));
    }
}
