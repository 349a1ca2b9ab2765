use axum::Json;
use axum::extract::{Path, Query, State};

use crate::lobby::RoomSnapshot;

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rooms: state.lobby.room_count().await,
        connections: state.ws.connection_count().await,
        uptime: state.start_time.elapsed().as_secs(),
    })
}

// =========================================================================
// Rooms
// =========================================================================

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<SharedState>,
    Query(query): Query<ListRoomsQuery>,
) -> Json<ListRoomsResponse> {
    let limit = query.limit.unwrap_or(10).min(100);
    let offset = query.offset.unwrap_or(0);

    let mut rooms = state.lobby.list().await;
    if let Some(started) = query.started {
        rooms.retain(|r| r.started == started);
    }
    let total = rooms.len();

    let page: Vec<RoomSnapshot> = rooms.into_iter().skip(offset).take(limit).collect();

    Json(ListRoomsResponse {
        rooms: page,
        total,
        limit,
        offset,
    })
}

/// GET /api/rooms/{code}
pub async fn get_room(
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Json<RoomSnapshot>, ApiError> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(ApiError::InvalidRequest(format!(
            "room codes are lowercase letters, got '{code}'"
        )));
    }
    state
        .lobby
        .snapshot(&code)
        .await
        .map(Json)
        .ok_or(ApiError::RoomNotFound(code))
}

// =========================================================================
// Tests
// =========================================================================
