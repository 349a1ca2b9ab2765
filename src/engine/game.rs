//! Stateful game controller wrapping a `Board`.
//!
//! `Game` owns the board plus turn, castling rights, move counters and the
//! end state. It is the type the lobby layer drives: one instance per room,
//! mutated by one caller at a time.

use tracing::{debug, info};

use crate::engine::board::Board;
use crate::engine::fen::{self, STARTING_FEN};
use crate::engine::movegen::{self, Reach};
use crate::engine::types::{
    CastleSide, CastlingRights, ChessError, Color, Coord, EndState, GameStatus, PieceKind,
};

/// Fullmove number at which a game is declared drawn.
pub const DEFAULT_MOVE_LIMIT: u16 = 50;

// =========================================================================
// GameOptions
// =========================================================================

/// Per-game tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOptions {
    /// Fullmove number that ends the game as a draw. Zero disables the cap.
    pub move_limit: u16,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            move_limit: DEFAULT_MOVE_LIMIT,
        }
    }
}

// =========================================================================
// Game
// =========================================================================

/// One chess game: position plus the state FEN carries, and the end state.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    /// Indexed by `Color::index()`.
    castling: [CastlingRights; 2],
    halfmove_clock: u16,
    fullmove_number: u16,
    end_state: Option<EndState>,
    options: GameOptions,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Create a new game from the standard starting position.
    pub fn new() -> Self {
        Self::with_options(GameOptions::default())
    }

    pub fn with_options(options: GameOptions) -> Self {
        Self {
            board: Board::starting(),
            turn: Color::White,
            castling: [CastlingRights::ALL; 2],
            halfmove_clock: 0,
            fullmove_number: 1,
            end_state: None,
            options,
        }
    }

    /// Create a game from a FEN string. A position that is already over
    /// (mate, stalemate, past the move cap) starts ended.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        Self::from_fen_with_options(fen, GameOptions::default())
    }

    pub fn from_fen_with_options(fen: &str, options: GameOptions) -> Result<Self, ChessError> {
        let mut game = Self::with_options(options);
        game.import_fen(fen)?;
        Ok(game)
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Read-only view of the position grid.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        self.castling[color.index()]
    }

    pub fn en_passant_target(&self) -> Option<Coord> {
        self.board.en_passant_target()
    }

    pub fn is_ended(&self) -> bool {
        self.end_state.is_some()
    }

    pub fn end_state(&self) -> Option<EndState> {
        self.end_state
    }

    pub fn board_string(&self) -> String {
        self.board.board_string()
    }

    // -----------------------------------------------------------------
    // Status queries
    // -----------------------------------------------------------------

    /// Is `color`'s king currently attacked?
    pub fn is_check(&self, color: Color) -> bool {
        movegen::is_king_attacked(&self.board, color)
    }

    pub fn is_checkmate(&self) -> bool {
        self.end_state == Some(EndState::Checkmate)
    }

    pub fn is_stalemate(&self) -> bool {
        self.end_state == Some(EndState::Stalemate)
    }

    pub fn is_draw_by_move_limit(&self) -> bool {
        self.end_state == Some(EndState::MoveLimit)
    }

    /// Reporting summary of the end state, or of check for a live game.
    pub fn status(&self) -> GameStatus {
        match self.end_state {
            Some(EndState::Checkmate) => GameStatus::Checkmate,
            Some(EndState::Stalemate) => GameStatus::Stalemate,
            Some(EndState::MoveLimit) => GameStatus::Draw,
            None if self.is_check(self.turn) => GameStatus::Check,
            None => GameStatus::Active,
        }
    }

    // -----------------------------------------------------------------
    // Legal move listing
    // -----------------------------------------------------------------

    /// Legal destinations for the piece on `(file, rank)`.
    ///
    /// Empty when the game has ended, the square is off the board or empty,
    /// or it holds a piece that does not belong to `asking`. Castling sides
    /// found permanently unavailable along the way lose their right.
    pub fn legal_moves(&mut self, file: i32, rank: i32, asking: Color) -> Vec<Coord> {
        if self.end_state.is_some() {
            return Vec::new();
        }
        let Some(from) = Coord::checked(file, rank) else {
            return Vec::new();
        };
        match self.board.piece_at(from) {
            Some(piece) if piece.color == asking => {}
            _ => return Vec::new(),
        }
        let reach = self.reach(from, asking);
        self.forfeit(asking, &reach.forfeited);
        reach.squares
    }

    /// Every legal `(from, to)` pair for `color`, a1 first.
    pub fn legal_moves_for(&self, color: Color) -> Vec<(Coord, Coord)> {
        self.board
            .pieces(color)
            .flat_map(|(from, _)| {
                self.reach(from, color)
                    .squares
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    fn reach(&self, from: Coord, color: Color) -> Reach {
        movegen::find_reachable_squares(
            &self.board,
            from,
            !color,
            Some(self.castling[color.index()]),
            true,
        )
    }

    fn forfeit(&mut self, color: Color, sides: &[CastleSide]) {
        for &side in sides {
            debug!(%color, ?side, "castling right forfeited");
            self.castling[color.index()].revoke(side);
        }
    }

    // -----------------------------------------------------------------
    // Move application
    // -----------------------------------------------------------------

    /// Apply a move for `mover`, promoting to a queen if a pawn reaches the
    /// far rank.
    ///
    /// Returns `Ok(false)` for any illegal request, leaving the game
    /// untouched. Fails with `ChessError::GameOver` once the game has ended.
    pub fn apply_move(
        &mut self,
        file: i32,
        rank: i32,
        dest_file: i32,
        dest_rank: i32,
        mover: Color,
    ) -> Result<bool, ChessError> {
        self.apply_move_with_promotion(file, rank, dest_file, dest_rank, mover, None)
    }

    /// Like [`Game::apply_move`] with an explicit promotion choice. Asking
    /// for a king or a pawn rejects the move.
    pub fn apply_move_with_promotion(
        &mut self,
        file: i32,
        rank: i32,
        dest_file: i32,
        dest_rank: i32,
        mover: Color,
        promotion: Option<PieceKind>,
    ) -> Result<bool, ChessError> {
        if let Some(end) = self.end_state {
            return Err(ChessError::GameOver(end));
        }

        if Board::is_off_board(file, rank) || Board::is_off_board(dest_file, dest_rank) {
            debug!(file, rank, dest_file, dest_rank, "move rejected: off board");
            return Ok(false);
        }
        let from = Coord::new(file as u8, rank as u8);
        let to = Coord::new(dest_file as u8, dest_rank as u8);

        if promotion.is_some_and(|kind| !kind.is_promotion_target()) {
            debug!(%from, %to, ?promotion, "move rejected: bad promotion piece");
            return Ok(false);
        }
        if mover != self.turn {
            debug!(%from, %to, %mover, "move rejected: not this side's turn");
            return Ok(false);
        }
        match self.board.piece_at(from) {
            Some(piece) if piece.color == mover => {}
            _ => {
                debug!(%from, %to, %mover, "move rejected: no own piece on source");
                return Ok(false);
            }
        }

        let reach = self.reach(from, mover);
        self.forfeit(mover, &reach.forfeited);
        if !reach.contains(to) {
            debug!(%from, %to, %mover, "move rejected: illegal destination");
            return Ok(false);
        }

        let undo = movegen::play(&mut self.board, from, to, promotion);
        if movegen::is_king_attacked(&self.board, mover) {
            movegen::unplay(&mut self.board, &undo);
            debug!(%from, %to, %mover, "move rejected: leaves king in check");
            return Ok(false);
        }

        self.board.decay_en_passant();
        if undo.is_double_step() {
            let skipped = Coord::new(from.file, (from.rank + to.rank) / 2);
            self.board.mark_en_passant(skipped);
        }

        if undo.moved.kind == PieceKind::King {
            self.castling[mover.index()] = CastlingRights::NONE;
        }
        self.clear_corner_rights(from);
        self.clear_corner_rights(to);

        // Plies since the last pawn move or capture, as FEN counts it; not a
        // raw count of every move played.
        if undo.moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.turn = !mover;

        debug!(%from, %to, %mover, fen = %self.export_fen(), "move applied");
        self.evaluate_end();
        Ok(true)
    }

    /// A piece leaving or arriving on a rook corner ends castling on that side.
    fn clear_corner_rights(&mut self, at: Coord) {
        for color in [Color::White, Color::Black] {
            for side in CastleSide::BOTH {
                if at == Coord::new(side.rook_file(), color.home_rank()) {
                    self.castling[color.index()].revoke(side);
                }
            }
        }
    }

    /// Decide whether the side to move is mated, stalemated, or past the
    /// move cap.
    fn evaluate_end(&mut self) {
        let side = self.turn;
        let rights = Some(self.castling[side.index()]);
        let end = if !movegen::has_any_legal_move(&self.board, side, rights) {
            if self.is_check(side) {
                Some(EndState::Checkmate)
            } else {
                Some(EndState::Stalemate)
            }
        } else if self.options.move_limit > 0 && self.fullmove_number >= self.options.move_limit
        {
            Some(EndState::MoveLimit)
        } else {
            None
        };

        if let Some(end) = end {
            info!(%end, to_move = %side, fullmove = self.fullmove_number, "game ended");
        }
        self.end_state = end;
    }

    // -----------------------------------------------------------------
    // FEN
    // -----------------------------------------------------------------

    /// Current position as FEN.
    pub fn export_fen(&self) -> String {
        fen::format(
            &self.board,
            self.turn,
            &self.castling,
            self.halfmove_clock,
            self.fullmove_number,
        )
    }

    /// Replace the whole position with a FEN-described one. On error the
    /// game is left as it was.
    pub fn import_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        let parsed = fen::parse(fen)?;
        self.board = parsed.board;
        self.turn = parsed.turn;
        self.castling = parsed.castling;
        self.halfmove_clock = parsed.halfmove_clock;
        self.fullmove_number = parsed.fullmove_number;
        self.evaluate_end();
        debug!(fen, ended = ?self.end_state, "position imported");
        Ok(())
    }

    /// Whether the current position is the standard opening one.
    pub fn is_starting_position(&self) -> bool {
        self.export_fen() == STARTING_FEN
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
