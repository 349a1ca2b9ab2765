//! Room registry keyed by game code.
//!
//! Every room sits behind its own mutex, so moves within one game are
//! applied one at a time while separate games proceed in parallel. Lock
//! order is always seats, then the room map, then a single room.

pub mod room;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::engine::game::GameOptions;
use crate::engine::types::{ChessError, Color, Coord, PieceKind};

pub use room::{ClientId, INITIAL_CLOCK_MS, Player, Room, RoomSnapshot};

/// Failures of lobby operations. Illegal moves are not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LobbyError {
    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("room is full: {0}")]
    RoomFull(String),

    #[error("not seated in room {0}")]
    NotSeated(String),

    #[error("already seated in room {0}")]
    AlreadySeated(String),

    #[error(transparent)]
    Chess(#[from] ChessError),
}

/// A move as requested by a client, in signed board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub file: i32,
    pub rank: i32,
    pub dest_file: i32,
    pub dest_rank: i32,
    pub promotion: Option<PieceKind>,
}

/// Result of a player leaving: the closed room and who is left to notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub code: String,
    pub remaining: Vec<ClientId>,
}

pub struct Lobby {
    rooms: RwLock<HashMap<String, Arc<Mutex<Room>>>>,
    /// client → code of the room it sits in
    seats: RwLock<HashMap<ClientId, String>>,
    options: GameOptions,
    code_length: usize,
}

impl Lobby {
    pub fn new(options: GameOptions, code_length: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            seats: RwLock::new(HashMap::new()),
            options,
            code_length: code_length.max(1),
        }
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| rng.gen_range(b'a'..=b'z') as char)
            .collect()
    }

    async fn room(&self, code: &str) -> Result<Arc<Mutex<Room>>, LobbyError> {
        self.rooms
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| LobbyError::RoomNotFound(code.to_string()))
    }

    // -----------------------------------------------------------------
    // Seating
    // -----------------------------------------------------------------

    /// Open a new room with `client` seated as White. Returns the code.
    pub async fn create_room(&self, client: ClientId, username: &str) -> Result<String, LobbyError> {
        let mut seats = self.seats.write().await;
        if let Some(existing) = seats.get(&client) {
            return Err(LobbyError::AlreadySeated(existing.clone()));
        }

        let mut rooms = self.rooms.write().await;
        let code = loop {
            let candidate = self.generate_code();
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        let mut room = Room::new(code.clone(), self.options);
        room.seat(Color::White, Player::new(client, username));
        rooms.insert(code.clone(), Arc::new(Mutex::new(room)));
        seats.insert(client, code.clone());

        info!(code = %code, client_id = client, username, "room created");
        Ok(code)
    }

    /// Take the Black seat of an open room. The game starts once both
    /// seats are filled.
    pub async fn join_room(
        &self,
        client: ClientId,
        username: &str,
        code: &str,
    ) -> Result<Color, LobbyError> {
        let mut seats = self.seats.write().await;
        if let Some(existing) = seats.get(&client) {
            return Err(LobbyError::AlreadySeated(existing.clone()));
        }

        let room = self.room(code).await?;
        let mut room = room.lock().await;
        if !room.seat(Color::Black, Player::new(client, username)) {
            return Err(LobbyError::RoomFull(code.to_string()));
        }
        seats.insert(client, code.to_string());

        info!(code, client_id = client, username, "room joined, game started");
        Ok(Color::Black)
    }

    /// Close `code` on behalf of `client`, unseating everyone in it.
    pub async fn leave(&self, client: ClientId, code: &str) -> Result<LeaveOutcome, LobbyError> {
        let mut seats = self.seats.write().await;
        if seats.get(&client).map(String::as_str) != Some(code) {
            return Err(LobbyError::NotSeated(code.to_string()));
        }

        let removed = self.rooms.write().await.remove(code);
        let mut remaining = Vec::new();
        if let Some(room) = removed {
            let room = room.lock().await;
            remaining.extend(room.clients().into_iter().filter(|&c| c != client));
        }

        seats.remove(&client);
        for other in &remaining {
            seats.remove(other);
        }

        info!(code, client_id = client, "room closed");
        Ok(LeaveOutcome {
            code: code.to_string(),
            remaining,
        })
    }

    /// Treat a dropped connection as leaving whatever room it sat in.
    pub async fn disconnect(&self, client: ClientId) -> Option<LeaveOutcome> {
        let code = self.room_of(client).await?;
        self.leave(client, &code).await.ok()
    }

    pub async fn room_of(&self, client: ClientId) -> Option<String> {
        self.seats.read().await.get(&client).cloned()
    }

    // -----------------------------------------------------------------
    // Play
    // -----------------------------------------------------------------

    /// Apply a move for the seat `client` holds.
    ///
    /// `Ok(false)` when the move is illegal, the client is not seated, or the
    /// game has not started. A finished game yields `ChessError::GameOver`.
    /// An accepted move is charged to the mover's clock.
    pub async fn make_move(
        &self,
        client: ClientId,
        code: &str,
        request: MoveRequest,
    ) -> Result<bool, LobbyError> {
        let room = self.room(code).await?;
        let mut room = room.lock().await;

        let Some(color) = room.color_of(client) else {
            debug!(code, client_id = client, "move from unseated client");
            return Ok(false);
        };
        if !room.is_started() {
            debug!(code, client_id = client, "move before game start");
            return Ok(false);
        }

        let accepted = room.game_mut().apply_move_with_promotion(
            request.file,
            request.rank,
            request.dest_file,
            request.dest_rank,
            color,
            request.promotion,
        )?;
        if accepted {
            room.charge_clock(color, Utc::now());
        }
        debug!(code, client_id = client, %color, accepted, "move processed");
        Ok(accepted)
    }

    /// Legal destinations from `(file, rank)` for the colour `client` plays.
    /// Unseated clients get an empty list.
    pub async fn legal_moves(
        &self,
        client: ClientId,
        code: &str,
        file: i32,
        rank: i32,
    ) -> Result<Vec<Coord>, LobbyError> {
        let room = self.room(code).await?;
        let mut room = room.lock().await;
        match room.color_of(client) {
            Some(color) => Ok(room.game_mut().legal_moves(file, rank, color)),
            None => Ok(Vec::new()),
        }
    }

    // -----------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------

    /// Snapshot of a room together with the clients seated in it.
    pub async fn view(&self, code: &str) -> Option<(RoomSnapshot, Vec<ClientId>)> {
        let room = self.room(code).await.ok()?;
        let room = room.lock().await;
        Some((room.snapshot(), room.clients()))
    }

    pub async fn snapshot(&self, code: &str) -> Option<RoomSnapshot> {
        self.view(code).await.map(|(snapshot, _)| snapshot)
    }

    /// All rooms, newest first.
    pub async fn list(&self) -> Vec<RoomSnapshot> {
        let rooms: Vec<Arc<Mutex<Room>>> = self.rooms.read().await.values().cloned().collect();
        let mut out = Vec::with_capacity(rooms.len());
        for room in rooms {
            out.push(room.lock().await.snapshot());
        }
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.code.cmp(&b.code)));
        out
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
