//! WebSocket upgrade handler: one session per connection, translating room
//! commands into lobby calls and lobby results into events.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::api::state::SharedState;
use crate::engine::types::PieceKind;
use crate::lobby::{ClientId, LeaveOutcome, MoveRequest};

use super::messages::{WsCommand, WsEvent};

/// GET /ws: upgrade to WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Core WebSocket session logic.
async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (client_id, mut rx) = state.ws.register().await;
    let (mut sink, mut stream) = socket.split();
    info!(client_id, "WS client connected");

    // Writer task: forward events from the manager → WS sink.
    let mut writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if sink
                .send(Message::Text(event.to_json().into()))
                .await
                .is_err()
            {
                break;
            }
        }
        // Try to close gracefully.
        let _ = sink.close().await;
    });

    // Reader task: handle client → server commands.
    let reader_state = state.clone();
    let mut reader = tokio::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            match msg {
                Message::Text(text) => {
                    handle_client_message(&reader_state, client_id, &text).await;
                }
                Message::Close(_) => break,
                _ => {} // Binary / Ping / Pong handled by Axum
            }
        }
    });

    // Wait for either task to finish, then abort the other.
    tokio::select! {
        _ = &mut writer => { reader.abort(); }
        _ = &mut reader => { writer.abort(); }
    }

    // A dropped connection leaves its room.
    if let Some(outcome) = state.lobby.disconnect(client_id).await {
        notify_opponents(&state, &outcome).await;
    }
    state.ws.unregister(client_id).await;
    info!(client_id, "WS client disconnected");
}

/// Process a client-sent text message.
async fn handle_client_message(state: &SharedState, client_id: ClientId, text: &str) {
    let cmd = match serde_json::from_str::<WsCommand>(text) {
        Ok(c) => c,
        Err(e) => {
            debug!(client_id, "invalid WS command: {e}");
            let msg = format!("invalid command: {e}");
            state.ws.send(client_id, WsEvent::error(&msg)).await;
            return;
        }
    };

    match cmd {
        WsCommand::Ping => {
            state.ws.send(client_id, WsEvent::pong()).await;
        }

        WsCommand::Create { username } => {
            match state.lobby.create_room(client_id, &username).await {
                Ok(code) => {
                    state.ws.send(client_id, WsEvent::created(&code)).await;
                    broadcast_room(state, &code, true).await;
                }
                Err(e) => state.ws.send(client_id, WsEvent::error(&e.to_string())).await,
            }
        }

        WsCommand::Join { code, username } => {
            match state.lobby.join_room(client_id, &username, &code).await {
                Ok(color) => {
                    state.ws.send(client_id, WsEvent::joined(&code, color)).await;
                    broadcast_room(state, &code, true).await;
                }
                Err(e) => state.ws.send(client_id, WsEvent::error(&e.to_string())).await,
            }
        }

        WsCommand::Move {
            code,
            file,
            rank,
            dest_file,
            dest_rank,
            promotion,
        } => {
            let promotion = match promotion.map(PieceKind::from_promotion_char).transpose() {
                Ok(p) => p,
                Err(e) => {
                    state.ws.send(client_id, WsEvent::error(&e.to_string())).await;
                    return;
                }
            };
            let request = MoveRequest {
                file,
                rank,
                dest_file,
                dest_rank,
                promotion,
            };
            match state.lobby.make_move(client_id, &code, request).await {
                Ok(accepted) => {
                    debug!(code = %code, client_id, accepted, "move handled");
                    state
                        .ws
                        .send(client_id, WsEvent::move_result(&code, accepted))
                        .await;
                    // Clocks only change on accepted moves.
                    broadcast_room(state, &code, accepted).await;
                }
                Err(e) => state.ws.send(client_id, WsEvent::error(&e.to_string())).await,
            }
        }

        WsCommand::LegalMoves { code, file, rank } => {
            match state.lobby.legal_moves(client_id, &code, file, rank).await {
                Ok(moves) => {
                    let evt = WsEvent::legal_moves(&code, file, rank, moves);
                    state.ws.send(client_id, evt).await;
                }
                Err(e) => state.ws.send(client_id, WsEvent::error(&e.to_string())).await,
            }
        }

        WsCommand::Leave { code } => match state.lobby.leave(client_id, &code).await {
            Ok(outcome) => {
                state.ws.send(client_id, WsEvent::left(&code)).await;
                notify_opponents(state, &outcome).await;
            }
            Err(e) => state.ws.send(client_id, WsEvent::error(&e.to_string())).await,
        },
    }
}

/// Push the room's current state to everyone seated in it, plus the end
/// state once the game is over.
async fn broadcast_room(state: &SharedState, code: &str, with_players: bool) {
    let Some((snapshot, clients)) = state.lobby.view(code).await else {
        return;
    };
    if with_players {
        state
            .ws
            .send_all(&clients, WsEvent::players(&snapshot))
            .await;
    }
    state.ws.send_all(&clients, WsEvent::state(&snapshot)).await;
    if let Some(end) = snapshot.end_state {
        state
            .ws
            .send_all(&clients, WsEvent::end_state(code, end.as_str()))
            .await;
    }
}

async fn notify_opponents(state: &SharedState, outcome: &LeaveOutcome) {
    debug!(code = %outcome.code, remaining = ?outcome.remaining, "notifying opponents");
    state
        .ws
        .send_all(&outcome.remaining, WsEvent::disconnect(&outcome.code))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
