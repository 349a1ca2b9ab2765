//! Forsyth–Edwards Notation import and export.
//!
//! FEN carries no per-piece move history, so move counters are rebuilt on
//! import: pawns away from their start rank count as moved, and a king or
//! rook counts as unmoved only while it stands on its home square with a
//! matching castling right.

use crate::engine::board::Board;
use crate::engine::types::{CastleSide, CastlingRights, ChessError, Color, Coord, Piece, PieceKind};

/// Standard opening position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Everything a FEN string describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFen {
    pub board: Board,
    pub turn: Color,
    /// Indexed by `Color::index()`.
    pub castling: [CastlingRights; 2],
    pub en_passant: Option<Coord>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

fn invalid(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(msg.into())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a FEN string.
///
/// Validates all 6 fields and ensures exactly one king per side. The
/// en-passant square, when present, is marked on the returned board.
pub fn parse(fen: &str) -> Result<ParsedFen, ChessError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(invalid(format!("expected 6 fields, got {}", fields.len())));
    }

    let mut board = parse_placement(fields[0])?;

    let turn = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(invalid(format!("invalid side to move '{other}'"))),
    };

    let castling = parse_castling(fields[2])?;

    let en_passant = match fields[3] {
        "-" => None,
        s => {
            let sq = Coord::from_algebraic(s)
                .ok_or_else(|| invalid(format!("invalid en passant square '{s}'")))?;
            if sq.rank != 2 && sq.rank != 5 {
                return Err(invalid(format!("en passant square '{s}' must be on rank 3 or 6")));
            }
            Some(sq)
        }
    };

    let halfmove_clock: u16 = fields[4]
        .parse()
        .map_err(|_| invalid(format!("invalid halfmove clock '{}'", fields[4])))?;
    let fullmove_number: u16 = fields[5]
        .parse()
        .map_err(|_| invalid(format!("invalid fullmove number '{}'", fields[5])))?;
    if fullmove_number == 0 {
        return Err(invalid("fullmove number must be at least 1"));
    }

    for color in [Color::White, Color::Black] {
        let kings = board.count(color, PieceKind::King);
        if kings != 1 {
            return Err(invalid(format!("expected exactly one {color} king, found {kings}")));
        }
    }

    restore_move_counters(&mut board, &castling);
    if let Some(sq) = en_passant {
        board.mark_en_passant(sq);
    }

    Ok(ParsedFen {
        board,
        turn,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_placement(field: &str) -> Result<Board, ChessError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(format!("expected 8 ranks, got {}", ranks.len())));
    }

    let mut board = Board::empty();
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8; // FEN starts from rank 8
        let mut file: u8 = 0;
        for ch in rank_str.chars() {
            if file > 7 {
                return Err(invalid(format!("too many squares in rank {}", rank + 1)));
            }
            if let Some(digit) = ch.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(invalid(format!(
                        "invalid empty count '{ch}' in rank {}",
                        rank + 1
                    )));
                }
                file += digit as u8;
            } else if let Some((color, kind)) = PieceKind::from_char(ch) {
                board.set(Coord::new(file, rank), Some(Piece::new(color, kind)));
                file += 1;
            } else {
                return Err(invalid(format!("invalid character '{ch}' in piece placement")));
            }
        }
        if file != 8 {
            return Err(invalid(format!(
                "rank {} has {} squares instead of 8",
                rank + 1,
                file
            )));
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<[CastlingRights; 2], ChessError> {
    let mut rights = [CastlingRights::NONE; 2];
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, side) = match c {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => return Err(invalid(format!("invalid castling field '{field}'"))),
        };
        match side {
            CastleSide::Kingside => rights[color.index()].kingside = true,
            CastleSide::Queenside => rights[color.index()].queenside = true,
        }
    }
    Ok(rights)
}

fn restore_move_counters(board: &mut Board, castling: &[CastlingRights; 2]) {
    for color in [Color::White, Color::Black] {
        let rights = castling[color.index()];
        let home = color.home_rank();
        let placed: Vec<(Coord, Piece)> = board.pieces(color).collect();
        for (at, mut piece) in placed {
            let unmoved = match piece.kind {
                PieceKind::Pawn => at.rank == color.pawn_rank(),
                PieceKind::King => at == Coord::new(4, home) && rights.any(),
                PieceKind::Rook => CastleSide::BOTH
                    .iter()
                    .any(|&side| rights.has(side) && at == Coord::new(side.rook_file(), home)),
                _ => true,
            };
            if !unmoved {
                piece.moves = 1;
                board.set(at, Some(piece));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render a position as FEN. The en-passant field comes from the board's
/// active marker.
pub fn format(
    board: &Board,
    turn: Color,
    castling: &[CastlingRights; 2],
    halfmove_clock: u16,
    fullmove_number: u16,
) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match board.piece_at(Coord::new(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    fen.push(piece.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push((b'0' + empty) as char);
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(turn.fen_char());

    fen.push(' ');
    fen.push_str(&castling_field(castling));

    fen.push(' ');
    match board.en_passant_target() {
        Some(sq) => fen.push_str(&sq.to_algebraic()),
        None => fen.push('-'),
    }

    fen.push_str(&format!(" {halfmove_clock} {fullmove_number}"));
    fen
}

fn castling_field(castling: &[CastlingRights; 2]) -> String {
    let white = castling[Color::White.index()];
    let black = castling[Color::Black.index()];
    let mut s = String::with_capacity(4);
    if white.kingside {
        s.push('K');
    }
    if white.queenside {
        s.push('Q');
    }
    if black.kingside {
        s.push('k');
    }
    if black.queenside {
        s.push('q');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
