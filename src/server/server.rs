//! WebSocket server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use uuid::Uuid;

use crate::models::QuizBank;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::QuizError;

use super::state::ServerState;

/// Shared server state wrapped in Arc<Mutex> for async access.
type SharedState = Arc<Mutex<ServerState>>;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

type WsSender = SplitSink<WebSocketStream<TcpStream>, Message>;
type WsReceiver = SplitStream<WebSocketStream<TcpStream>>;

/// Host quiz sessions on `0.0.0.0:port` until Ctrl-C.
pub async fn run(port: u16, bank: QuizBank) -> Result<(), QuizError> {
    println!("Loaded {} questions: {}", bank.len(), bank.title());

    let state = Arc::new(Mutex::new(ServerState::new(Arc::new(bank))));

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    println!("Server listening on {} (Ctrl-C to stop)", addr);
    info!("Server listening on {}", addr);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    tokio::spawn(handle_connection(stream, addr, Arc::clone(&state)));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            },
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
        }
    }

    let state = state.lock().await;
    info!(
        "Shutting down, notifying {} connected clients",
        state.connected_count()
    );
    state.broadcast_all(ServerMessage::ServerClosing);
    drop(state);

    // Give the writer tasks a moment to flush the goodbye.
    tokio::time::sleep(SHUTDOWN_GRACE).await;
    println!("Server stopped");

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(stream: TcpStream, addr: SocketAddr, state: SharedState) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", addr, e);
            return;
        }
    };

    let (ws_sender, ws_receiver) = ws_stream.split();

    // Create channel for sending messages to this client
    let (tx, rx) = mpsc::unbounded_channel::<ServerMessage>();

    let (session_id, _) = state.lock().await.connect(addr.ip(), tx);

    handle_messages(session_id, ws_sender, ws_receiver, rx, &state).await;

    state.lock().await.disconnect(session_id);
}

/// Pump messages for a connected session until either side goes away.
async fn handle_messages(
    session_id: Uuid,
    mut ws_sender: WsSender,
    mut ws_receiver: WsReceiver,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    state: &SharedState,
) {
    // Forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Failed to encode message for {}: {}", session_id, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text.to_string(),
            Ok(Message::Close(_)) => break,
            Err(e) => {
                debug!("Session {}: connection error: {}", session_id, e);
                break;
            }
            _ => continue,
        };

        let client_msg: ClientMessage = match serde_json::from_str(&text) {
            Ok(m) => m,
            Err(e) => {
                debug!("Session {}: unreadable message: {}", session_id, e);
                continue;
            }
        };

        state.lock().await.handle_message(session_id, client_msg);
    }

    send_task.abort();
}
