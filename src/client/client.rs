//! WebSocket client implementation.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;

use crate::input::{action_for, Action};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::{terminal, ui, QuizError};

use super::state::ClientApp;

/// Shared client app state.
type SharedApp = Arc<Mutex<ClientApp>>;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the quiz client.
pub async fn run(host: String, port: u16) -> Result<(), QuizError> {
    let app = Arc::new(Mutex::new(ClientApp::new(&host, port)));

    let url = format!("ws://{}:{}", host, port);
    println!("Connecting to {}...", url);

    let (ws_stream, _) = tokio_tungstenite::connect_async(&url).await?;
    info!("Connected to {}", url);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientMessage>();

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to encode {:?}: {}", msg, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let app_clone = Arc::clone(&app);
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect("Connection closed by server".to_string());
                    break;
                }
                Err(e) => {
                    let mut app = app_clone.lock().await;
                    app.disconnect(format!("Connection error: {}", e));
                    break;
                }
                _ => continue,
            };

            let server_msg: ServerMessage = match serde_json::from_str(&text) {
                Ok(m) => m,
                Err(e) => {
                    debug!("Unreadable server message: {}", e);
                    continue;
                }
            };

            app_clone.lock().await.handle_server_message(server_msg);
        }

        // stream ended without a close frame
        app_clone
            .lock()
            .await
            .disconnect("Connection closed by server".to_string());
    });

    let result = run_tui(app, tx).await;

    recv_task.abort();

    result
}

/// Run the client TUI.
async fn run_tui(app: SharedApp, tx: mpsc::UnboundedSender<ClientMessage>) -> Result<(), QuizError> {
    let mut terminal = terminal::init()?;

    let result = loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break Ok(());
            }
            if let Err(e) = terminal.draw(|frame| ui::render(frame, &app.screen())) {
                break Err(e);
            }
        }

        match poll_key() {
            Ok(Some(key)) => {
                if handle_input(&app, &tx, key).await {
                    break Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => break Err(e),
        }
    };

    terminal::restore()?;
    Ok(result?)
}

fn poll_key() -> std::io::Result<Option<KeyCode>> {
    if event::poll(POLL_INTERVAL)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key.code));
            }
        }
    }
    Ok(None)
}

/// Handle keyboard input. Returns true if the client should exit.
async fn handle_input(
    app: &SharedApp,
    tx: &mpsc::UnboundedSender<ClientMessage>,
    key: KeyCode,
) -> bool {
    let mut app = app.lock().await;

    let Some(action) = action_for(app.phase(), key) else {
        return false;
    };

    let outgoing = match action {
        Action::Quit => {
            app.should_quit = true;
            return true;
        }
        Action::Start => {
            app.start();
            Vec::new()
        }
        Action::SelectNext => {
            app.select_next_option();
            Vec::new()
        }
        Action::SelectPrevious => {
            app.select_previous_option();
            Vec::new()
        }
        Action::ToggleHint => {
            app.toggle_hint();
            Vec::new()
        }
        Action::ScrollDown => {
            app.scroll_review_down();
            Vec::new()
        }
        Action::ScrollUp => {
            app.scroll_review_up();
            Vec::new()
        }
        Action::Next => app.next_messages(),
        Action::Previous => vec![ClientMessage::Retreat],
        Action::Restart => vec![ClientMessage::Reset],
    };

    for msg in outgoing {
        if tx.send(msg).is_err() {
            app.disconnect("Connection lost".to_string());
            break;
        }
    }

    false
}
