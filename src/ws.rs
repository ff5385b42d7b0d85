use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use serde_json::json;

use crate::models::{AppState, SessionRecord, WsParams};

/// Upgrades a connection to a WebSocket, but only for callers presenting
/// the token of an active registered session.
pub async fn websocket_handler(
    Query(params): Query<WsParams>,
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> Response {
    let record = match state.sessions.lookup(&params.token) {
        Some(record) if record.is_active() => record,
        _ => return StatusCode::UNAUTHORIZED.into_response(),
    };

    ws.on_upgrade(move |socket| handle_socket(socket, record))
}

/// Acknowledges the connection, then drains frames until the client goes
/// away. The message-level protocol lives with the game-server
/// integration; this layer only keeps the channel open.
async fn handle_socket(socket: WebSocket, record: SessionRecord) {
    let (mut sender, mut receiver) = socket.split();

    let ack = json!({
        "type": "connected",
        "session_token": record.session_token(),
        "player_id": record.player().as_str(),
    });
    if let Err(e) = sender.send(Message::Text(ack.to_string().into())).await {
        tracing::warn!(error = %e, "failed to send connection ack");
        return;
    }

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                tracing::debug!(
                    player = record.player().as_str(),
                    len = text.len(),
                    "websocket message received"
                );
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => (),
        }
    }

    tracing::info!(
        token = %record.session_token(),
        player = record.player().as_str(),
        "websocket closed"
    );
}
