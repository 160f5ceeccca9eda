//! Server-side session store.
//!
//! One [`QuizSession`] per connected user, keyed by a session UUID. Sessions
//! never alias: a message from one connection only ever touches its own
//! session. Disconnected sessions are kept so the same address can resume.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::{QuizBank, QuizInfo, QuizSession, Rejection};
use crate::protocol::{ClientMessage, ServerMessage};

/// A single user session.
pub struct UserSession {
    /// Unique session ID.
    pub id: Uuid,
    /// Client IP address.
    pub ip_addr: IpAddr,
    /// Quiz progress for this user.
    pub session: QuizSession,
    /// Channel to send messages to this client; `None` while disconnected.
    pub sender: Option<mpsc::UnboundedSender<ServerMessage>>,
}

impl UserSession {
    pub fn new(
        ip_addr: IpAddr,
        bank: Arc<QuizBank>,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ip_addr,
            session: QuizSession::new(bank),
            sender: Some(sender),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.sender.is_some()
    }

    /// Send a message to this user.
    pub fn send(&self, msg: ServerMessage) -> bool {
        if let Some(sender) = &self.sender {
            sender.send(msg).is_ok()
        } else {
            false
        }
    }

    pub fn send_view(&self) -> bool {
        self.send(ServerMessage::Session {
            view: self.session.view(),
        })
    }

    fn apply(&mut self, msg: ClientMessage) -> Result<(), Rejection> {
        match msg {
            ClientMessage::RecordAnswer {
                question_id,
                option,
            } => self.session.record_answer(question_id, option),
            ClientMessage::Advance => self.session.advance(),
            ClientMessage::Retreat => self.session.retreat(),
            ClientMessage::Reset => {
                self.session.reset();
                Ok(())
            }
        }
    }
}

/// Main server state.
pub struct ServerState {
    bank: Arc<QuizBank>,
    info: QuizInfo,
    /// All user sessions (by session ID).
    pub sessions: HashMap<Uuid, UserSession>,
    /// IP address to session ID mapping (for reconnection).
    pub ip_to_id: HashMap<IpAddr, Uuid>,
}

impl ServerState {
    pub fn new(bank: Arc<QuizBank>) -> Self {
        let info = QuizInfo::from_bank(&bank);
        Self {
            bank,
            info,
            sessions: HashMap::new(),
            ip_to_id: HashMap::new(),
        }
    }

    /// Attach a new connection, resuming the disconnected session of the same
    /// address if there is one. Sends the ack and the current view.
    ///
    /// Returns the session ID and whether it was resumed.
    pub fn connect(
        &mut self,
        ip: IpAddr,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> (Uuid, bool) {
        let resumable = self
            .ip_to_id
            .get(&ip)
            .copied()
            .filter(|id| self.sessions.get(id).is_some_and(|s| !s.is_connected()));

        let (id, resumed) = match resumable {
            Some(id) => {
                if let Some(existing) = self.sessions.get_mut(&id) {
                    existing.sender = Some(sender);
                }
                info!("Session {} resumed from {}", id, ip);
                (id, true)
            }
            None => {
                let session = UserSession::new(ip, Arc::clone(&self.bank), sender);
                let id = session.id;
                self.sessions.insert(id, session);
                if let Some(previous) = self.ip_to_id.insert(ip, id) {
                    self.evict_if_unreachable(previous);
                }
                info!("Session {} created for {}", id, ip);
                (id, false)
            }
        };

        if let Some(session) = self.sessions.get(&id) {
            session.send(ServerMessage::ConnectionAck {
                resumed,
                info: self.info.clone(),
            });
            session.send_view();
        }

        (id, resumed)
    }

    /// Apply a client message to its own session and reply with the new view.
    pub fn handle_message(&mut self, session_id: Uuid, msg: ClientMessage) {
        let Some(user) = self.sessions.get_mut(&session_id) else {
            return;
        };

        let was_complete = user.session.is_complete();
        if let Err(rejection) = user.apply(msg) {
            debug!("Session {}: ignored message: {}", session_id, rejection);
        }

        if !was_complete && user.session.is_complete() {
            let score = user.session.score();
            info!(
                "Session {} finished with score {}/{}",
                session_id, score.correct, score.total
            );
        }

        user.send_view();
    }

    /// Mark a session as disconnected. Progress is kept for a later resume
    /// while the session is still the one its address maps to; otherwise it
    /// can never be reached again and is dropped.
    pub fn disconnect(&mut self, session_id: Uuid) {
        if let Some(user) = self.sessions.get_mut(&session_id) {
            user.sender = None;
            info!("Session {} ({}) disconnected", session_id, user.ip_addr);
        }
        self.evict_if_unreachable(session_id);
    }

    /// Drop a disconnected session that no address maps to any more.
    fn evict_if_unreachable(&mut self, session_id: Uuid) {
        let Some(user) = self.sessions.get(&session_id) else {
            return;
        };
        if user.is_connected() || self.ip_to_id.get(&user.ip_addr) == Some(&session_id) {
            return;
        }
        self.sessions.remove(&session_id);
        debug!("Session {} dropped, superseded by a newer one", session_id);
    }

    /// Broadcast a message to all connected users.
    pub fn broadcast_all(&self, msg: ServerMessage) {
        for session in self.sessions.values() {
            if session.is_connected() {
                session.send(msg.clone());
            }
        }
    }

    pub fn connected_count(&self) -> usize {
        self.sessions.values().filter(|s| s.is_connected()).count()
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::models::{sample_question, SessionView};

    fn state() -> ServerState {
        let bank = QuizBank::new(
            "Test",
            "",
            Vec::new(),
            vec![sample_question(1, 1), sample_question(2, 0)],
        )
        .unwrap();
        ServerState::new(Arc::new(bank))
    }

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    fn last_view(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> SessionView {
        match drain(rx).pop() {
            Some(ServerMessage::Session { view }) => view,
            other => panic!("expected a session view, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_sends_ack_and_view() {
        let mut state = state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_, resumed) = state.connect(ip(1), tx);
        assert!(!resumed);

        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 2);
        assert!(matches!(
            &messages[0],
            ServerMessage::ConnectionAck { resumed: false, info } if info.total_questions == 2
        ));
        assert!(matches!(&messages[1], ServerMessage::Session { .. }));
    }

    #[test]
    fn test_messages_drive_the_session() {
        let mut state = state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (id, _) = state.connect(ip(1), tx);
        drain(&mut rx);

        state.handle_message(
            id,
            ClientMessage::RecordAnswer {
                question_id: 1,
                option: 1,
            },
        );
        state.handle_message(id, ClientMessage::Advance);
        assert_eq!(last_view(&mut rx).question_id(), Some(2));

        state.handle_message(id, ClientMessage::Advance);
        let SessionView::Completed { score, .. } = last_view(&mut rx) else {
            panic!("expected completion");
        };
        assert_eq!((score.correct, score.total), (1, 2));

        state.handle_message(id, ClientMessage::Reset);
        assert_eq!(last_view(&mut rx).question_id(), Some(1));
    }

    #[test]
    fn test_rejected_message_still_gets_a_view() {
        let mut state = state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (id, _) = state.connect(ip(1), tx);
        drain(&mut rx);

        state.handle_message(id, ClientMessage::Retreat);
        assert_eq!(last_view(&mut rx).question_id(), Some(1));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut state = state();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let (a, _) = state.connect(ip(1), tx_a);
        let (b, _) = state.connect(ip(2), tx_b);
        drain(&mut rx_a);
        drain(&mut rx_b);

        state.handle_message(a, ClientMessage::Advance);
        assert!(drain(&mut rx_b).is_empty());
        assert_eq!(state.sessions[&a].session.current_index(), 1);
        assert_eq!(state.sessions[&b].session.current_index(), 0);
    }

    #[test]
    fn test_reconnect_resumes_progress() {
        let mut state = state();
        let (tx, _rx) = mpsc::unbounded_channel();
        let (id, _) = state.connect(ip(1), tx);
        state.handle_message(id, ClientMessage::Advance);
        state.disconnect(id);
        assert_eq!(state.connected_count(), 0);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let (resumed_id, resumed) = state.connect(ip(1), tx);
        assert!(resumed);
        assert_eq!(resumed_id, id);
        assert_eq!(last_view(&mut rx).question_id(), Some(2));
    }

    #[test]
    fn test_second_connection_from_same_ip_gets_new_session() {
        let mut state = state();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        let (a, _) = state.connect(ip(1), tx_a);
        let (b, resumed) = state.connect(ip(1), tx_b);
        assert!(!resumed);
        assert_ne!(a, b);
        assert_eq!(state.connected_count(), 2);
    }

    #[test]
    fn test_superseded_session_is_dropped_on_disconnect() {
        let mut state = state();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();
        let (a, _) = state.connect(ip(1), tx_a);
        state.handle_message(a, ClientMessage::Advance);
        let (b, _) = state.connect(ip(1), tx_b);

        state.disconnect(a);
        assert!(!state.sessions.contains_key(&a));
        assert!(state.sessions.contains_key(&b));

        // the address still resumes the session it maps to
        state.disconnect(b);
        let (tx, _rx) = mpsc::unbounded_channel();
        let (c, resumed) = state.connect(ip(1), tx);
        assert!(resumed);
        assert_eq!(c, b);
        assert_eq!(state.sessions.len(), 1);
    }

    #[test]
    fn test_one_session_kept_per_address() {
        let mut state = state();
        for _ in 0..50 {
            let (tx_a, _rx_a) = mpsc::unbounded_channel();
            let (tx_b, _rx_b) = mpsc::unbounded_channel();
            let (a, _) = state.connect(ip(1), tx_a);
            let (b, _) = state.connect(ip(1), tx_b);
            state.disconnect(a);
            state.disconnect(b);
        }
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.connected_count(), 0);
    }

    #[test]
    fn test_broadcast_skips_disconnected() {
        let mut state = state();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let (a, _) = state.connect(ip(1), tx_a);
        state.connect(ip(2), tx_b);
        state.disconnect(a);
        drain(&mut rx_a);
        drain(&mut rx_b);

        state.broadcast_all(ServerMessage::ServerClosing);
        assert!(drain(&mut rx_a).is_empty());
        assert_eq!(drain(&mut rx_b), vec![ServerMessage::ServerClosing]);
    }
}
