//! Order push WebSocket
//!
//! GET /ws - upgrade to WebSocket
//!
//! Protocol:
//! - Client -> Server: `{"type": "auth", "userId": "..."}` binds the connection to a user
//! - Server -> Client: `{"type": "orderUpdate", "data": <order>}` on every order mutation
//!
//! Connections carry no credentials on upgrade; a connection receives nothing
//! until it has sent an auth message.

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::core::ServerState;

/// Outbound frames buffered per connection; a slow consumer past this drops events
const OUTBOUND_BUFFER: usize = 32;

/// Messages a client may send over the socket
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    Auth { user_id: String },
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/ws", get(handle_ws))
}

/// GET /ws - upgrade to WebSocket
async fn handle_ws(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_session(socket, state))
}

async fn ws_session(socket: WebSocket, state: ServerState) {
    let (mut sink, mut stream) = socket.split();
    let conn_id = Uuid::new_v4().to_string();

    // Push channel; the notifier hands serialized frames to it
    let (tx, mut rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);

    // Set once the client sends an auth message
    let mut authed_user: Option<String> = None;

    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // Unknown or malformed messages are ignored
                        if let Ok(ClientMessage::Auth { user_id }) = serde_json::from_str(&text) {
                            if user_id.is_empty() {
                                continue;
                            }
                            // Re-auth rebinds the connection to the new user
                            if let Some(prev) = authed_user.take() {
                                state.notifier.unregister(&prev, &conn_id);
                            }
                            state.notifier.register(&user_id, &conn_id, tx.clone());
                            tracing::info!(
                                conn_id = %conn_id,
                                user_id = %user_id,
                                "WebSocket authenticated"
                            );
                            authed_user = Some(user_id);
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::warn!(conn_id = %conn_id, "WebSocket error: {e}");
                        break;
                    }
                    _ => {} // Binary, Pong
                }
            }

            frame = rx.recv() => {
                match frame {
                    Some(json) => {
                        if sink.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    // Send Close frame (best-effort)
    let _ = sink.close().await;

    if let Some(user_id) = authed_user {
        state.notifier.unregister(&user_id, &conn_id);
    }

    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
