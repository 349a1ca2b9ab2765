//! WebSocket message types for the room protocol.

use serde::{Deserialize, Serialize};

use crate::engine::types::{Color, Coord, EndState};
use crate::lobby::RoomSnapshot;

// ---------------------------------------------------------------------------
// Server → Client events
// ---------------------------------------------------------------------------

/// Envelope sent from server to a WebSocket client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsEvent {
    /// Discriminator so clients can switch on event type.
    #[serde(rename = "type")]
    pub event_type: WsEventType,
    /// Event-specific payload.
    #[serde(flatten)]
    pub payload: WsPayload,
}

/// Event type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WsEventType {
    Created,
    Joined,
    State,
    Players,
    MoveResult,
    LegalMoves,
    EndState,
    Left,
    Error,
    Pong,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WsPayload {
    Seat(SeatPayload),
    State(StatePayload),
    Players(PlayersPayload),
    MoveResult(MoveResultPayload),
    LegalMoves(LegalMovesPayload),
    EndState(EndStatePayload),
    Left(LeftPayload),
    Error(ErrorPayload),
    Pong(PongPayload),
}

/// Sent for both `created` and `joined`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPayload {
    pub code: String,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePayload {
    pub code: String,
    pub fen: String,
    pub status: String,
    pub turn: Color,
    pub end_state: Option<EndState>,
    pub started: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayersPayload {
    pub code: String,
    pub white: Option<String>,
    pub black: Option<String>,
    /// Remaining clock in milliseconds, absent for an empty seat.
    pub white_time: Option<i64>,
    pub black_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResultPayload {
    pub code: String,
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalMovesPayload {
    pub code: String,
    pub file: i32,
    pub rank: i32,
    pub moves: Vec<Coord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndStatePayload {
    pub code: String,
    /// `checkmate`, `stalemate`, `move_limit` or `disconnect`.
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftPayload {
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PongPayload {
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Client → Server commands
// ---------------------------------------------------------------------------

/// Commands sent from client to server over WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsCommand {
    Create {
        username: String,
    },
    Join {
        code: String,
        username: String,
    },
    Move {
        code: String,
        file: i32,
        rank: i32,
        #[serde(rename = "dFile")]
        dest_file: i32,
        #[serde(rename = "dRank")]
        dest_rank: i32,
        /// Promotion letter: `q`, `r`, `b` or `n`.
        #[serde(default)]
        promotion: Option<char>,
    },
    LegalMoves {
        code: String,
        file: i32,
        rank: i32,
    },
    Leave {
        code: String,
    },
    Ping,
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

impl WsEvent {
    pub fn created(code: &str) -> Self {
        WsEvent {
            event_type: WsEventType::Created,
            payload: WsPayload::Seat(SeatPayload {
                code: code.to_string(),
                color: Color::White,
            }),
        }
    }

    pub fn joined(code: &str, color: Color) -> Self {
        WsEvent {
            event_type: WsEventType::Joined,
            payload: WsPayload::Seat(SeatPayload {
                code: code.to_string(),
                color,
            }),
        }
    }

    pub fn state(snapshot: &RoomSnapshot) -> Self {
        WsEvent {
            event_type: WsEventType::State,
            payload: WsPayload::State(StatePayload {
                code: snapshot.code.clone(),
                fen: snapshot.fen.clone(),
                status: snapshot.status.clone(),
                turn: snapshot.turn,
                end_state: snapshot.end_state,
                started: snapshot.started,
            }),
        }
    }

    pub fn players(snapshot: &RoomSnapshot) -> Self {
        WsEvent {
            event_type: WsEventType::Players,
            payload: WsPayload::Players(PlayersPayload {
                code: snapshot.code.clone(),
                white: snapshot.white.clone(),
                black: snapshot.black.clone(),
                white_time: snapshot.white_time,
                black_time: snapshot.black_time,
            }),
        }
    }

    pub fn move_result(code: &str, accepted: bool) -> Self {
        WsEvent {
            event_type: WsEventType::MoveResult,
            payload: WsPayload::MoveResult(MoveResultPayload {
                code: code.to_string(),
                accepted,
            }),
        }
    }

    pub fn legal_moves(code: &str, file: i32, rank: i32, moves: Vec<Coord>) -> Self {
        WsEvent {
            event_type: WsEventType::LegalMoves,
            payload: WsPayload::LegalMoves(LegalMovesPayload {
                code: code.to_string(),
                file,
                rank,
                moves,
            }),
        }
    }

    pub fn end_state(code: &str, state: &str) -> Self {
        WsEvent {
            event_type: WsEventType::EndState,
            payload: WsPayload::EndState(EndStatePayload {
                code: code.to_string(),
                state: state.to_string(),
            }),
        }
    }

    /// The opponent left or dropped.
    pub fn disconnect(code: &str) -> Self {
        Self::end_state(code, "disconnect")
    }

    pub fn left(code: &str) -> Self {
        WsEvent {
            event_type: WsEventType::Left,
            payload: WsPayload::Left(LeftPayload {
                code: code.to_string(),
            }),
        }
    }

    pub fn error(message: &str) -> Self {
        WsEvent {
            event_type: WsEventType::Error,
            payload: WsPayload::Error(ErrorPayload {
                message: message.to_string(),
            }),
        }
    }

    pub fn pong() -> Self {
        let ts = chrono::Utc::now().timestamp_millis().max(0) as u64;
        WsEvent {
            event_type: WsEventType::Pong,
            payload: WsPayload::Pong(PongPayload { timestamp: ts }),
        }
    }

    /// Serialize to JSON text for sending over WebSocket.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"serialization failed"}"#.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
