//! Rules-correct chess core plus the room server that drives it.
//!
//! - [`engine`]: board, move generation, FEN and the game controller.
//! - [`lobby`]: rooms keyed by game code, one game per room.
//! - [`ws`] and [`api`]: the websocket protocol and HTTP endpoints.

pub mod api;
pub mod config;
pub mod engine;
pub mod lobby;
pub mod ws;
