//! Live viewer connections.
//!
//! # Responsibilities
//! - Complete the WebSocket upgrade handshake
//! - Attach the viewer (register + history snapshot, atomically) and replay
//! - Forward published events to the client as text frames
//! - Unregister on disconnect or send failure
//!
//! # Design Decisions
//! - Registration and the replay snapshot are taken in one step through the
//!   capture engine, so a concurrent capture cannot appear both in the
//!   replay and as a live frame
//! - History is replayed oldest-first so the client can prepend each frame
//!   the same way it handles live events
//! - Inbound frames from viewers are ignored (viewers are read-only);
//!   close frames and transport errors end the session

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};

use crate::http::server::AppState;

/// Upgrade handler for `GET /ws`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| viewer_session(socket, state))
}

/// Drive one viewer connection until it closes.
async fn viewer_session(socket: WebSocket, state: AppState) {
    let (viewer_id, mut events, snapshot) = state.engine.attach_viewer();
    let (mut sink, mut stream) = socket.split();

    // Replay existing history oldest-first, then switch to live events.
    let mut replay_failed = false;
    for entry in snapshot.into_iter().rev() {
        let payload = match serde_json::to_string(&entry) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize history entry for replay");
                continue;
            }
        };
        if sink.send(Message::Text(payload.into())).await.is_err() {
            replay_failed = true;
            break;
        }
    }

    if !replay_failed {
        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(payload) => {
                            if sink.send(Message::Text(payload.into())).await.is_err() {
                                break;
                            }
                        }
                        // Hub dropped the queue; nothing more will arrive.
                        None => break,
                    }
                }
                incoming = stream.next() => {
                    match incoming {
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        // Viewers don't speak; drop anything else on the floor.
                        Some(Ok(_)) => {}
                    }
                }
            }
        }
    }

    state.broadcaster.unregister(viewer_id);
}
