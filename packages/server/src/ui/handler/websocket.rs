//! WebSocket connection handlers (Session Gateway).
//!
//! Each socket is given a fresh `ConnectionId`. Inbound frames are parsed and
//! validated here and forwarded to the Broadcast Router as `SessionEvent`s;
//! outbound frames arrive through the connection's channel.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ChatMessage, ConnectionId},
    infrastructure::dto::websocket::{ClientFrame, ProtocolError, parse_client_frame},
    ui::state::AppState,
    usecase::SessionEvent,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Turn one inbound text frame into the event the router expects.
///
/// Frames with empty or oversized fields are rejected before reaching the core.
fn parse_session_event(
    connection_id: ConnectionId,
    text: &str,
) -> Result<SessionEvent, ProtocolError> {
    match parse_client_frame(text)? {
        ClientFrame::JoinRoom(payload) => {
            let (username, room) = payload.into_domain()?;
            Ok(SessionEvent::Join {
                connection_id,
                username,
                room,
            })
        }
        ClientFrame::SendMessage(payload) => Ok(SessionEvent::Message {
            connection_id,
            message: ChatMessage::try_from(payload)?,
        }),
    }
}

/// Spawns a task that drains the connection's channel into the WebSocket sink.
///
/// The task ends when the channel is closed or the socket can no longer be
/// written to.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();
    if state
        .router
        .send(SessionEvent::Connect {
            connection_id,
            channel: tx,
        })
        .is_err()
    {
        tracing::error!(
            "Broadcast router is not running, dropping connection '{}'",
            connection_id
        );
        return;
    }
    tracing::info!("Connection '{}' opened", connection_id);

    let (sender, mut receiver) = socket.split();
    let router = state.router.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text.as_str());
                    match parse_session_event(connection_id, text.as_str()) {
                        Ok(event) => {
                            if router.send(event).is_err() {
                                tracing::warn!("Broadcast router stopped");
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Rejected frame from '{}': {}", connection_id, e);
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push frames from the router to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state
        .router
        .send(SessionEvent::Disconnect { connection_id })
        .is_err()
    {
        tracing::warn!(
            "Broadcast router is not running, disconnect of '{}' dropped",
            connection_id
        );
    }
}
