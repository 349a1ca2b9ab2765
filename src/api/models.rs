use serde::{Deserialize, Serialize};

use crate::lobby::RoomSnapshot;

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRoomsQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Only rooms whose game has (or has not) started.
    pub started: Option<bool>,
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rooms: usize,
    pub connections: usize,
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomSnapshot>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
