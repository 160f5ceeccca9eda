//! Protocol messages for client-server communication.
//!
//! All messages are serialized as JSON over WebSocket. Client messages map
//! one-to-one onto `QuizSession` operations; the server answers every one of
//! them with a fresh [`SessionView`], whether or not the operation applied.

use serde::{Deserialize, Serialize};

use crate::models::{QuestionId, QuizInfo, SessionView};

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Record (or overwrite) the answer to the question on screen.
    RecordAnswer {
        question_id: QuestionId,
        option: usize,
    },

    /// Move to the next question, completing the quiz after the last one.
    Advance,

    /// Move back one question.
    Retreat,

    /// Start over with no answers.
    Reset,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Connection accepted. `resumed` is set when an earlier session from the
    /// same address was picked up again.
    ConnectionAck { resumed: bool, info: QuizInfo },

    /// Current state of this client's session.
    Session { view: SessionView },

    /// Server is shutting down.
    ServerClosing,
}

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;
