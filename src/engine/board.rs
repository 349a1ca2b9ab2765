//! Mailbox board representation.
//!
//! `Board` is an 8×8 grid of `Square`s. Each square knows its own
//! coordinates, the piece on it (if any) and an en-passant marker. The board
//! has no knowledge of the rules; it only stores pieces and answers bounds
//! questions.

use std::fmt;

use crate::engine::types::{Color, Coord, Piece, PieceKind};

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// One cell of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    coord: Coord,
    piece: Option<Piece>,
    /// Plies for which this square stays a valid en-passant target.
    en_passant: u8,
}

impl Square {
    fn empty(coord: Coord) -> Self {
        Square {
            coord,
            piece: None,
            en_passant: 0,
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    #[inline]
    pub fn en_passant(&self) -> u8 {
        self.en_passant
    }

    /// Whether a pawn may currently capture en passant onto this square.
    #[inline]
    pub fn is_en_passant_target(&self) -> bool {
        self.en_passant > 0
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// The 8×8 position grid. Indexing is `rank * 8 + file`, a1 = 0, h8 = 63.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Square; 64],
}

pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: std::array::from_fn(|i| Square::empty(Coord::new(i as u8 % 8, i as u8 / 8))),
        }
    }

    /// Standard starting array.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                board.set(
                    Coord::new(file as u8, color.home_rank()),
                    Some(Piece::new(color, kind)),
                );
                board.set(
                    Coord::new(file as u8, color.pawn_rank()),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    #[inline]
    fn index(coord: Coord) -> usize {
        coord.rank as usize * 8 + coord.file as usize
    }

    /// True when `(file, rank)` lies outside the 8×8 grid.
    #[inline]
    pub fn is_off_board(file: i32, rank: i32) -> bool {
        !(0..8).contains(&file) || !(0..8).contains(&rank)
    }

    // -----------------------------------------------------------------------
    // Raw access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn get(&self, coord: Coord) -> &Square {
        &self.squares[Self::index(coord)]
    }

    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.get(coord).piece
    }

    /// Place a piece (or nothing) on a square. Returns whatever was there.
    #[inline]
    pub fn set(&mut self, coord: Coord, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[Self::index(coord)].piece, piece)
    }

    /// Remove and return the piece on `coord`.
    #[inline]
    pub fn take(&mut self, coord: Coord) -> Option<Piece> {
        self.set(coord, None)
    }

    // -----------------------------------------------------------------------
    // En-passant markers
    // -----------------------------------------------------------------------

    /// Mark `coord` as capturable en passant for the next ply.
    pub fn mark_en_passant(&mut self, coord: Coord) {
        self.squares[Self::index(coord)].en_passant = 1;
    }

    /// Age every marker by one ply; markers that reach zero are gone.
    pub fn decay_en_passant(&mut self) {
        for sq in self.squares.iter_mut() {
            sq.en_passant = sq.en_passant.saturating_sub(1);
        }
    }

    /// The currently active en-passant target, if any.
    pub fn en_passant_target(&self) -> Option<Coord> {
        self.squares
            .iter()
            .find(|sq| sq.is_en_passant_target())
            .map(|sq| sq.coord)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Every occupied square of the given colour, a1 first.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares.iter().filter_map(move |sq| match sq.piece {
            Some(p) if p.color == color => Some((sq.coord, p)),
            _ => None,
        })
    }

    /// Locate the king of `color`.
    pub fn find_king(&self, color: Color) -> Option<Coord> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(c, _)| c)
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces(color).filter(|(_, p)| p.kind == kind).count()
    }

    /// Render the board as an 8-line string (rank 8 at top), useful for debugging.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for rank in (0..8u8).rev() {
            s.push((b'1' + rank) as char);
            s.push(' ');
            for file in 0..8u8 {
                let ch = match self.piece_at(Coord::new(file, rank)) {
                    Some(p) => p.to_char(),
                    None => '.',
                };
                s.push(ch);
                if file < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  a b c d e f g h");
        s
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self.board_string())?;
        write!(f, ")")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Coord {
        Coord::from_algebraic(name).unwrap()
    }

    #[test]
    fn square_coords_match_grid_position() {
        let board = Board::empty();
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let c = Coord::new(file, rank);
                assert_eq!(board.get(c).coord(), c);
            }
        }
    }

    #[test]
    fn off_board_bounds() {
        assert!(!Board::is_off_board(0, 0));
        assert!(!Board::is_off_board(7, 7));
        assert!(Board::is_off_board(-1, 0));
        assert!(Board::is_off_board(0, 8));
        assert!(Board::is_off_board(8, 3));
        assert!(Board::is_off_board(3, -2));
    }

    #[test]
    fn starting_layout() {
        let board = Board::starting();
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(board.count(Color::White, PieceKind::Pawn), 8);
        assert_eq!(board.count(Color::Black, PieceKind::Knight), 2);
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert!(board.get(sq("e4")).is_empty());
    }

    #[test]
    fn set_returns_previous_piece() {
        let mut board = Board::empty();
        let rook = Piece::new(Color::White, PieceKind::Rook);
        assert_eq!(board.set(sq("a1"), Some(rook)), None);
        assert_eq!(board.take(sq("a1")), Some(rook));
        assert!(board.get(sq("a1")).is_empty());
    }

    #[test]
    fn find_king() {
        let board = Board::starting();
        assert_eq!(board.find_king(Color::White), Some(sq("e1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn en_passant_marker_decays_after_one_ply() {
        let mut board = Board::empty();
        board.mark_en_passant(sq("e3"));
        assert_eq!(board.en_passant_target(), Some(sq("e3")));
        assert_eq!(board.get(sq("e3")).en_passant(), 1);
        board.decay_en_passant();
        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn board_string_starting() {
        let s = Board::starting().board_string();
        assert!(s.starts_with("8 r n b q k b n r"));
        assert!(s.ends_with("  a b c d e f g h"));
    }
}
