//! A single room: one game and up to two seated players.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::game::{Game, GameOptions};
use crate::engine::types::{Color, EndState};

/// Identifier the transport layer assigns to each connection.
pub type ClientId = u64;

/// Thinking time each player starts with, in milliseconds.
pub const INITIAL_CLOCK_MS: i64 = 600_000;

/// A seated player and their clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub client: ClientId,
    pub username: String,
    /// Remaining thinking time. Never negative; running out is not enforced.
    pub time_left_ms: i64,
    pub last_move_at: Option<DateTime<Utc>>,
}

impl Player {
    pub fn new(client: ClientId, username: &str) -> Self {
        Self {
            client,
            username: username.to_string(),
            time_left_ms: INITIAL_CLOCK_MS,
            last_move_at: None,
        }
    }
}

/// One game plus its seats.
#[derive(Debug)]
pub struct Room {
    code: String,
    game: Game,
    white: Option<Player>,
    black: Option<Player>,
    created_at: DateTime<Utc>,
    /// When the side to move started thinking. Set once both seats fill.
    turn_started_at: Option<DateTime<Utc>>,
}

impl Room {
    pub fn new(code: String, options: GameOptions) -> Self {
        Self {
            code,
            game: Game::with_options(options),
            white: None,
            black: None,
            created_at: Utc::now(),
            turn_started_at: None,
        }
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Seat `player` as `color`. Returns false if the seat is taken.
    /// Filling the second seat starts White's clock.
    pub fn seat(&mut self, color: Color, player: Player) -> bool {
        let slot = match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(player);
        if self.is_started() {
            self.turn_started_at = Some(Utc::now());
        }
        true
    }

    pub fn turn_started_at(&self) -> Option<DateTime<Utc>> {
        self.turn_started_at
    }

    /// Charge `color` for the time since its turn began and start the
    /// opponent's turn at `now`. No-op before the game has started.
    pub fn charge_clock(&mut self, color: Color, now: DateTime<Utc>) {
        let Some(started) = self.turn_started_at else {
            return;
        };
        let elapsed = (now - started).num_milliseconds().max(0);
        let slot = match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        if let Some(player) = slot {
            player.time_left_ms = (player.time_left_ms - elapsed).max(0);
            player.last_move_at = Some(now);
        }
        self.turn_started_at = Some(now);
    }

    /// Remaining time for `color`, if that seat is filled.
    pub fn time_left(&self, color: Color) -> Option<i64> {
        match color {
            Color::White => self.white.as_ref(),
            Color::Black => self.black.as_ref(),
        }
        .map(|p| p.time_left_ms)
    }

    /// The colour `client` plays, if seated here.
    pub fn color_of(&self, client: ClientId) -> Option<Color> {
        if self.white.as_ref().is_some_and(|p| p.client == client) {
            Some(Color::White)
        } else if self.black.as_ref().is_some_and(|p| p.client == client) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Both seats are filled.
    pub fn is_started(&self) -> bool {
        self.white.is_some() && self.black.is_some()
    }

    /// Connection ids of everyone seated.
    pub fn clients(&self) -> Vec<ClientId> {
        self.white
            .iter()
            .chain(self.black.iter())
            .map(|p| p.client)
            .collect()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            code: self.code.clone(),
            fen: self.game.export_fen(),
            status: self.game.status().as_str().to_string(),
            turn: self.game.turn(),
            end_state: self.game.end_state(),
            white: self.white.as_ref().map(|p| p.username.clone()),
            black: self.black.as_ref().map(|p| p.username.clone()),
            white_time: self.time_left(Color::White),
            black_time: self.time_left(Color::Black),
            started: self.is_started(),
            created_at: self.created_at,
        }
    }
}

/// Serializable view of a room, used for broadcasts and the HTTP API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub code: String,
    pub fen: String,
    pub status: String,
    pub turn: Color,
    pub end_state: Option<EndState>,
    pub white: Option<String>,
    pub black: Option<String>,
    /// Remaining clock in milliseconds per seat.
    pub white_time: Option<i64>,
    pub black_time: Option<i64>,
    pub started: bool,
    pub created_at: DateTime<Utc>,
}
