pub mod board;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod types;

pub use board::{Board, Square};
pub use game::{Game, GameOptions};
pub use movegen::{find_reachable_squares, is_king_attacked, Reach};
pub use types::*;
