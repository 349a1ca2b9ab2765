//! WebSocket module: the room protocol spoken on `/ws`.
//!
//! - [`messages`]: Typed event/command envelopes.
//! - [`manager`]: Connection tracking and per-client delivery.
//! - [`handler`]: Axum WebSocket upgrade handler.

pub mod handler;
pub mod manager;
pub mod messages;

pub use handler::ws_handler;
pub use manager::WsManager;
pub use messages::{WsCommand, WsEvent};
