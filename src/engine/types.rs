use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank direction a pawn of this colour advances in.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this colour's king and rooks at the start.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank this colour's pawns start on.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank on which this colour's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// FEN side-to-move letter.
    pub fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Queen,
    King,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a FEN piece letter; case decides the colour.
    pub fn from_char(c: char) -> Option<(Color, PieceKind)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        Some((color, kind))
    }

    /// Parse a promotion choice letter (`q`, `r`, `b` or `n`, either case).
    pub fn from_promotion_char(c: char) -> Result<PieceKind, ChessError> {
        match Self::from_char(c) {
            Some((_, kind)) if kind.is_promotion_target() => Ok(kind),
            _ => Err(ChessError::InvalidPromotion(c)),
        }
    }

    /// Whether a pawn may promote to this kind.
    #[inline]
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Queen => write!(f, "queen"),
            PieceKind::King => write!(f, "king"),
            PieceKind::Rook => write!(f, "rook"),
            PieceKind::Bishop => write!(f, "bishop"),
            PieceKind::Knight => write!(f, "knight"),
            PieceKind::Pawn => write!(f, "pawn"),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece on the board. `moves` counts how often this piece has moved and
/// gates first-move behaviour (pawn double step, castling).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub moves: u16,
}

impl Piece {
    /// A piece that has not moved yet.
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece {
            color,
            kind,
            moves: 0,
        }
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moves > 0
    }

    #[inline]
    pub fn to_char(&self) -> char {
        self.kind.to_char(self.color)
    }
}

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A board coordinate: file 0..8 (a..h), rank 0..8 (1..8). Rank 0 is
/// White's back rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    pub file: u8,
    pub rank: u8,
}

/// Unchecked wire form of a [`Coord`].
#[derive(Deserialize)]
struct RawCoord {
    file: i32,
    rank: i32,
}

impl TryFrom<RawCoord> for Coord {
    type Error = String;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        Coord::checked(raw.file, raw.rank)
            .ok_or_else(|| format!("square off the board: ({}, {})", raw.file, raw.rank))
    }
}

impl Coord {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Coord { file, rank }
    }

    /// Build a coordinate from signed components, `None` when off the board.
    #[inline]
    pub fn checked(file: i32, rank: i32) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Coord {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Step by a direction vector, `None` when the result leaves the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        Self::checked(
            self.file as i32 + df as i32,
            self.rank as i32 + dr as i32,
        )
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Coord::new(file, rank))
        } else {
            None
        }
    }

    /// Convert to algebraic notation like "e4".
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

// ---------------------------------------------------------------------------
// CastlingRights
// ---------------------------------------------------------------------------

/// Castling availability for one colour. Rights are only ever cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        kingside: true,
        queenside: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        kingside: false,
        queenside: false,
    };

    #[inline]
    pub fn has(self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }

    #[inline]
    pub fn revoke(&mut self, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.kingside = false,
            CastleSide::Queenside => self.queenside = false,
        }
    }

    #[inline]
    pub fn any(self) -> bool {
        self.kingside || self.queenside
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// Which rook a king castles with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File the castling rook starts on.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File the king lands on.
    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// File the rook lands on.
    #[inline]
    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Direction the king travels along the rank.
    #[inline]
    pub const fn step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

// ---------------------------------------------------------------------------
// EndState & GameStatus
// ---------------------------------------------------------------------------

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndState {
    Checkmate,
    Stalemate,
    /// Fullmove counter reached the configured cap.
    MoveLimit,
}

impl EndState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndState::Checkmate => "checkmate",
            EndState::Stalemate => "stalemate",
            EndState::MoveLimit => "move_limit",
        }
    }
}

impl fmt::Display for EndState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current status of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Contract violations raised by the chess core. Illegal moves are not
/// errors; they are reported as a rejected move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("game is already over: {0}")]
    GameOver(EndState),

    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(char),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_toggle() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::White.to_string(), "white");
        assert_eq!(Color::Black.to_string(), "black");
    }

    #[test]
    fn color_ranks() {
        assert_eq!(Color::White.home_rank(), 0);
        assert_eq!(Color::Black.home_rank(), 7);
        assert_eq!(Color::White.pawn_rank(), 1);
        assert_eq!(Color::Black.pawn_rank(), 6);
        assert_eq!(Color::White.forward(), 1);
        assert_eq!(Color::Black.forward(), -1);
    }

    #[test]
    fn piece_kind_char_round_trip() {
        for kind in PieceKind::ALL {
            let wc = kind.to_char(Color::White);
            let bc = kind.to_char(Color::Black);
            assert!(wc.is_ascii_uppercase());
            assert!(bc.is_ascii_lowercase());
            assert_eq!(PieceKind::from_char(wc), Some((Color::White, kind)));
            assert_eq!(PieceKind::from_char(bc), Some((Color::Black, kind)));
        }
    }

    #[test]
    fn piece_kind_from_char_invalid() {
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('1'), None);
    }

    #[test]
    fn promotion_targets() {
        assert!(PieceKind::Queen.is_promotion_target());
        assert!(PieceKind::Knight.is_promotion_target());
        assert!(!PieceKind::King.is_promotion_target());
        assert!(!PieceKind::Pawn.is_promotion_target());
    }

    #[test]
    fn promotion_char_parsing() {
        assert_eq!(PieceKind::from_promotion_char('q'), Ok(PieceKind::Queen));
        assert_eq!(PieceKind::from_promotion_char('N'), Ok(PieceKind::Knight));
        assert_eq!(
            PieceKind::from_promotion_char('k'),
            Err(ChessError::InvalidPromotion('k'))
        );
        assert_eq!(
            PieceKind::from_promotion_char('x'),
            Err(ChessError::InvalidPromotion('x'))
        );
    }

    #[test]
    fn coord_algebraic() {
        assert_eq!(Coord::from_algebraic("a1"), Some(Coord::new(0, 0)));
        assert_eq!(Coord::from_algebraic("h8"), Some(Coord::new(7, 7)));
        assert_eq!(Coord::from_algebraic("e4"), Some(Coord::new(4, 3)));
        assert_eq!(Coord::new(4, 3).to_algebraic(), "e4");
        assert_eq!(Coord::from_algebraic("i1"), None);
        assert_eq!(Coord::from_algebraic("a9"), None);
        assert_eq!(Coord::from_algebraic("abc"), None);
    }

    #[test]
    fn coord_offset_stays_on_board() {
        let a1 = Coord::new(0, 0);
        assert_eq!(a1.offset(1, 1), Some(Coord::new(1, 1)));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(Coord::new(7, 7).offset(0, 1), None);
        assert_eq!(Coord::checked(8, 0), None);
        assert_eq!(Coord::checked(3, -1), None);
    }

    #[test]
    fn coord_serializes_as_file_rank() {
        let json = serde_json::to_value(Coord::new(2, 5)).unwrap();
        assert_eq!(json, serde_json::json!({"file": 2, "rank": 5}));
    }

    #[test]
    fn coord_deserialization_rejects_off_board() {
        let ok: Coord = serde_json::from_value(serde_json::json!({"file": 2, "rank": 5})).unwrap();
        assert_eq!(ok, Coord::new(2, 5));
        for bad in [
            serde_json::json!({"file": 8, "rank": 0}),
            serde_json::json!({"file": 0, "rank": 200}),
            serde_json::json!({"file": -1, "rank": 3}),
        ] {
            assert!(serde_json::from_value::<Coord>(bad).is_err());
        }
    }

    #[test]
    fn castling_rights_revoke() {
        let mut cr = CastlingRights::ALL;
        cr.revoke(CastleSide::Kingside);
        assert!(!cr.has(CastleSide::Kingside));
        assert!(cr.has(CastleSide::Queenside));
        assert!(cr.any());
        cr.revoke(CastleSide::Queenside);
        assert!(!cr.any());
    }

    #[test]
    fn castle_side_files() {
        assert_eq!(CastleSide::Kingside.rook_file(), 7);
        assert_eq!(CastleSide::Kingside.king_target_file(), 6);
        assert_eq!(CastleSide::Kingside.rook_target_file(), 5);
        assert_eq!(CastleSide::Queenside.rook_file(), 0);
        assert_eq!(CastleSide::Queenside.king_target_file(), 2);
        assert_eq!(CastleSide::Queenside.rook_target_file(), 3);
    }

    #[test]
    fn game_status_strings() {
        assert_eq!(GameStatus::Active.as_str(), "active");
        assert_eq!(GameStatus::Check.as_str(), "check");
        assert_eq!(GameStatus::Checkmate.as_str(), "checkmate");
    }

    #[test]
    fn end_state_strings() {
        assert_eq!(EndState::Checkmate.to_string(), "checkmate");
        assert_eq!(EndState::MoveLimit.as_str(), "move_limit");
    }
}
