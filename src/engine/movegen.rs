//! Move generation over a mailbox `Board`.
//!
//! Pipeline:
//!   1. Walk the piece's direction vectors to collect reachable squares,
//!      flagging a walk that runs into the opposing king instead of adding
//!      the king's square as a capture.
//!   2. Optionally prune: play each candidate on a scratch copy of the board
//!      and drop it when the mover's own king ends up attacked.
//!
//! Attack detection reuses step 1 with the roles reversed: a king is
//! attacked when any opposing piece's walk raises the king flag.

use crate::engine::board::Board;
use crate::engine::types::{CastleSide, CastlingRights, Color, Coord, Piece, PieceKind};

// =========================================================================
// Direction tables
// =========================================================================

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Movement strategy for a piece class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Movement {
    /// Walks each direction until blocked.
    Slider(&'static [(i8, i8)]),
    /// Evaluates each offset exactly once.
    Leaper(&'static [(i8, i8)]),
    Pawn,
    /// One step in every direction, plus castling.
    King,
}

fn movement(kind: PieceKind) -> Movement {
    match kind {
        PieceKind::Queen => Movement::Slider(&ALL_DIRECTIONS),
        PieceKind::Rook => Movement::Slider(&ORTHOGONAL),
        PieceKind::Bishop => Movement::Slider(&DIAGONAL),
        PieceKind::Knight => Movement::Leaper(&KNIGHT_JUMPS),
        PieceKind::King => Movement::King,
        PieceKind::Pawn => Movement::Pawn,
    }
}

// =========================================================================
// Reach
// =========================================================================

/// Result of walking a piece's movement pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reach {
    /// Destination squares, each listed once.
    pub squares: Vec<Coord>,
    /// A walk ran into the opposing king.
    pub attacks_king: bool,
    /// Castling sides found permanently unavailable while examining the king.
    pub forfeited: Vec<CastleSide>,
}

impl Reach {
    #[inline]
    fn add(&mut self, to: Coord) {
        if !self.squares.contains(&to) {
            self.squares.push(to);
        }
    }

    #[inline]
    fn forfeit(&mut self, side: CastleSide) {
        if !self.forfeited.contains(&side) {
            self.forfeited.push(side);
        }
    }

    #[inline]
    pub fn contains(&self, to: Coord) -> bool {
        self.squares.contains(&to)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

// =========================================================================
// Public API
// =========================================================================

/// Squares reachable by the piece on `origin`.
///
/// `castling` carries the mover's rights; pass `None` to leave castling out
/// (attack scans never castle). With `prune_for_check` set, destinations that
/// would leave the mover's king attacked are removed. An empty origin yields
/// an empty `Reach`.
pub fn find_reachable_squares(
    board: &Board,
    origin: Coord,
    opponent: Color,
    castling: Option<CastlingRights>,
    prune_for_check: bool,
) -> Reach {
    let mut reach = Reach::default();
    let Some(piece) = board.piece_at(origin) else {
        return reach;
    };

    match movement(piece.kind) {
        Movement::Slider(dirs) => walk(board, origin, dirs, 7, opponent, &mut reach),
        Movement::Leaper(offsets) => walk(board, origin, offsets, 1, opponent, &mut reach),
        Movement::Pawn => pawn_moves(board, origin, piece, opponent, &mut reach),
        Movement::King => {
            walk(board, origin, &ALL_DIRECTIONS, 1, opponent, &mut reach);
            if let Some(rights) = castling {
                castling_moves(board, origin, piece, rights, &mut reach);
            }
        }
    }

    if prune_for_check {
        reach.squares.retain(|&to| {
            let mut scratch = board.clone();
            play(&mut scratch, origin, to, None);
            !is_king_attacked(&scratch, piece.color)
        });
    }

    reach
}

/// Is the king of `color` attacked by any opposing piece?
///
/// Returns `false` when `color` has no king on the board.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .pieces(!color)
        .any(|(from, _)| find_reachable_squares(board, from, color, None, false).attacks_king)
}

/// Does `color` have at least one legal move anywhere on the board?
///
/// The king is tried first, then every other piece.
pub fn has_any_legal_move(board: &Board, color: Color, castling: Option<CastlingRights>) -> bool {
    let opponent = !color;
    if let Some(king) = board.find_king(color)
        && !find_reachable_squares(board, king, opponent, castling, true).is_empty()
    {
        return true;
    }
    board
        .pieces(color)
        .filter(|(_, p)| p.kind != PieceKind::King)
        .any(|(from, _)| !find_reachable_squares(board, from, opponent, None, true).is_empty())
}

// =========================================================================
// Walkers
// =========================================================================

/// Walk each direction up to `max_steps`, stopping at the first occupied
/// square. Opposing pieces are capturable except the king, which raises
/// `attacks_king` instead.
fn walk(
    board: &Board,
    origin: Coord,
    dirs: &[(i8, i8)],
    max_steps: i8,
    opponent: Color,
    reach: &mut Reach,
) {
    for &(df, dr) in dirs {
        for step in 1..=max_steps {
            let Some(to) = origin.offset(df * step, dr * step) else {
                break;
            };
            match board.piece_at(to) {
                None => reach.add(to),
                Some(target) => {
                    if target.color == opponent {
                        if target.kind == PieceKind::King {
                            reach.attacks_king = true;
                        } else {
                            reach.add(to);
                        }
                    }
                    break;
                }
            }
        }
    }
}

fn pawn_moves(board: &Board, origin: Coord, pawn: Piece, opponent: Color, reach: &mut Reach) {
    let dir = pawn.color.forward();

    // Forward steps never capture.
    let steps = if pawn.has_moved() { 1 } else { 2 };
    for step in 1..=steps {
        match origin.offset(0, dir * step) {
            Some(to) if board.get(to).is_empty() => reach.add(to),
            _ => break,
        }
    }

    for df in [-1, 1] {
        let Some(to) = origin.offset(df, dir) else {
            continue;
        };
        let square = board.get(to);
        match square.piece() {
            Some(target) if target.color == opponent => {
                if target.kind == PieceKind::King {
                    reach.attacks_king = true;
                } else {
                    reach.add(to);
                }
            }
            Some(_) => {}
            None => {
                if square.is_en_passant_target()
                    && en_passant_victim(board, origin, to, opponent).is_some()
                {
                    reach.add(to);
                }
            }
        }
    }
}

/// The pawn an en-passant capture onto `to` would remove: it sits beside the
/// capturing pawn, on the destination's file.
fn en_passant_victim(board: &Board, origin: Coord, to: Coord, opponent: Color) -> Option<Coord> {
    let beside = Coord::new(to.file, origin.rank);
    match board.piece_at(beside) {
        Some(p) if p.color == opponent && p.kind == PieceKind::Pawn => Some(beside),
        _ => None,
    }
}

fn castling_moves(
    board: &Board,
    origin: Coord,
    king: Piece,
    rights: CastlingRights,
    reach: &mut Reach,
) {
    let home = king.color.home_rank();
    let king_home = Coord::new(4, home);

    for side in CastleSide::BOTH {
        if !rights.has(side) {
            continue;
        }

        // Permanent failures: the right can never come back.
        if king.has_moved() || origin != king_home {
            reach.forfeit(side);
            continue;
        }
        let rook_sq = Coord::new(side.rook_file(), home);
        match board.piece_at(rook_sq) {
            Some(p) if p.color == king.color && p.kind == PieceKind::Rook && !p.has_moved() => {}
            _ => {
                reach.forfeit(side);
                continue;
            }
        }

        // Transient failures: skip this time only.
        let (lo, hi) = if side.rook_file() < origin.file {
            (side.rook_file(), origin.file)
        } else {
            (origin.file, side.rook_file())
        };
        if (lo + 1..hi).any(|f| !board.get(Coord::new(f, home)).is_empty()) {
            continue;
        }

        let target = Coord::new(side.king_target_file(), home);
        let mut file = origin.file as i8;
        let mut path_safe = true;
        loop {
            let through = Coord::new(file as u8, home);
            if king_attacked_on(board, origin, through, king.color) {
                path_safe = false;
                break;
            }
            if through == target {
                break;
            }
            file += side.step();
        }
        if path_safe {
            reach.add(target);
        }
    }
}

/// Would the king standing on `origin` be attacked if it stood on `at`?
fn king_attacked_on(board: &Board, origin: Coord, at: Coord, color: Color) -> bool {
    if origin == at {
        return is_king_attacked(board, color);
    }
    let mut scratch = board.clone();
    let king = scratch.take(origin);
    scratch.set(at, king);
    is_king_attacked(&scratch, color)
}

// =========================================================================
// Playing moves on a board
// =========================================================================

/// Everything needed to take back a move made with [`play`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    pub from: Coord,
    pub to: Coord,
    /// The mover as it stood before the move.
    pub moved: Piece,
    /// Captured piece and where it stood (differs from `to` en passant).
    pub captured: Option<(Coord, Piece)>,
    /// Castling rook: origin, destination and the rook before it moved.
    pub rook: Option<(Coord, Coord, Piece)>,
}

impl Undo {
    #[inline]
    pub fn is_double_step(&self) -> bool {
        self.moved.kind == PieceKind::Pawn && self.from.rank.abs_diff(self.to.rank) == 2
    }
}

/// Move the piece on `from` to `to` with no legality checks.
///
/// Handles the mechanical side effects: captures (including en passant onto
/// a marked square), the rook hop of a two-file king move, and promotion of
/// a pawn reaching the far rank (`promotion` defaults to a queen). En-passant
/// markers are left untouched.
///
/// # Panics
/// Panics if `from` is empty.
pub fn play(board: &mut Board, from: Coord, to: Coord, promotion: Option<PieceKind>) -> Undo {
    let moved = board
        .take(from)
        .unwrap_or_else(|| panic!("no piece on {from} (board:\n{})", board.board_string()));

    let mut captured = board.get(to).piece().map(|p| (to, p));
    if captured.is_none()
        && moved.kind == PieceKind::Pawn
        && from.file != to.file
        && board.get(to).is_en_passant_target()
        && let Some(victim) = en_passant_victim(board, from, to, !moved.color)
    {
        captured = board.take(victim).map(|p| (victim, p));
    }

    let mut landed = Piece {
        moves: moved.moves + 1,
        ..moved
    };
    if moved.kind == PieceKind::Pawn && to.rank == moved.color.promotion_rank() {
        landed.kind = promotion.unwrap_or(PieceKind::Queen);
    }
    board.set(to, Some(landed));

    let mut rook = None;
    if moved.kind == PieceKind::King && from.file.abs_diff(to.file) == 2 {
        let side = if to.file > from.file {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        let rook_from = Coord::new(side.rook_file(), from.rank);
        let rook_to = Coord::new(side.rook_target_file(), from.rank);
        if let Some(r) = board.take(rook_from) {
            board.set(
                rook_to,
                Some(Piece {
                    moves: r.moves + 1,
                    ..r
                }),
            );
            rook = Some((rook_from, rook_to, r));
        }
    }

    Undo {
        from,
        to,
        moved,
        captured,
        rook,
    }
}

/// Reverse a move previously applied with [`play`].
pub fn unplay(board: &mut Board, undo: &Undo) {
    if let Some((rook_from, rook_to, rook)) = undo.rook {
        board.take(rook_to);
        board.set(rook_from, Some(rook));
    }
    board.take(undo.to);
    board.set(undo.from, Some(undo.moved));
    if let Some((at, piece)) = undo.captured {
        board.set(at, Some(piece));
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fen;

    fn sq(name: &str) -> Coord {
        Coord::from_algebraic(name).unwrap()
    }

    fn board(fen_str: &str) -> Board {
        fen::parse(fen_str).unwrap().board
    }

    fn names(reach: &Reach) -> Vec<String> {
        let mut v: Vec<String> = reach.squares.iter().map(|c| c.to_algebraic()).collect();
        v.sort();
        v
    }

    fn legal(b: &Board, from: &str) -> Reach {
        let color = b.piece_at(sq(from)).unwrap().color;
        find_reachable_squares(b, sq(from), !color, None, true)
    }

    // -------------------------------------------------------------------
    // Sliders and leapers
    // -------------------------------------------------------------------

    #[test]
    fn rook_on_empty_board_reaches_14_squares() {
        let b = board("4k3/8/8/8/3R4/8/8/K7 w - - 0 1");
        assert_eq!(legal(&b, "d4").squares.len(), 14);
    }

    #[test]
    fn bishop_stops_at_blockers() {
        // c5 is capturable, e3 and a1 are friendly.
        let b = board("4k3/8/8/2p5/3B4/4P3/8/K7 w - - 0 1");
        assert_eq!(
            names(&legal(&b, "d4")),
            vec!["b2", "c3", "c5", "e5", "f6", "g7", "h8"]
        );
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let b = board("4k3/8/8/8/3Q4/8/8/K7 w - - 0 1");
        // 14 orthogonal + 12 diagonal; the a1 king blocks the long diagonal.
        let reach = legal(&b, "d4");
        assert!(reach.contains(sq("d8")));
        assert!(reach.contains(sq("h8")));
        assert!(!reach.contains(sq("a1")));
        assert_eq!(reach.squares.len(), 26);
    }

    #[test]
    fn knight_jumps_from_corner() {
        let b = board("4k3/8/8/8/8/8/8/N3K3 w - - 0 1");
        assert_eq!(names(&legal(&b, "a1")), vec!["b3", "c2"]);
    }

    #[test]
    fn knight_in_start_position() {
        let b = Board::starting();
        assert_eq!(names(&legal(&b, "g1")), vec!["f3", "h3"]);
    }

    #[test]
    fn empty_origin_yields_nothing() {
        let b = Board::starting();
        let reach = find_reachable_squares(&b, sq("e4"), Color::Black, None, true);
        assert!(reach.is_empty());
        assert!(!reach.attacks_king);
    }

    // -------------------------------------------------------------------
    // King detection
    // -------------------------------------------------------------------

    #[test]
    fn opposing_king_raises_flag_instead_of_capture() {
        let b = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        // Rook on a1 does not see e8; move it to the e-file.
        let b2 = board("4k3/8/8/8/8/8/8/4RK2 w - - 0 1");
        let reach = find_reachable_squares(&b2, sq("e1"), Color::Black, None, false);
        assert!(reach.attacks_king);
        assert!(!reach.contains(sq("e8")));
        assert!(reach.contains(sq("e7")));
        assert!(!find_reachable_squares(&b, sq("a1"), Color::Black, None, false).attacks_king);
    }

    #[test]
    fn pawn_attacks_king_diagonally_only() {
        let b = board("8/8/8/8/8/3k4/4P3/4K3 b - - 0 1");
        assert!(is_king_attacked(&b, Color::Black));
        let straight = board("8/8/8/8/8/4k3/4P3/4K3 b - - 0 1");
        assert!(!is_king_attacked(&straight, Color::Black));
    }

    #[test]
    fn knight_check_detected() {
        let b = board("4k3/8/3N4/8/8/8/8/4K3 b - - 0 1");
        assert!(is_king_attacked(&b, Color::Black));
        assert!(!is_king_attacked(&b, Color::White));
    }

    #[test]
    fn missing_king_is_never_attacked() {
        let b = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let mut no_king = b.clone();
        no_king.take(sq("e1"));
        assert!(!is_king_attacked(&no_king, Color::White));
    }

    // -------------------------------------------------------------------
    // Pawns
    // -------------------------------------------------------------------

    #[test]
    fn pawn_single_and_double_step() {
        let b = Board::starting();
        assert_eq!(names(&legal(&b, "e2")), vec!["e3", "e4"]);
        assert_eq!(names(&legal(&b, "d7")), vec!["d5", "d6"]);
    }

    #[test]
    fn moved_pawn_steps_once() {
        let b = board("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        assert_eq!(names(&legal(&b, "e4")), vec!["e5"]);
    }

    #[test]
    fn pawn_blocked() {
        let b = board("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1");
        assert!(legal(&b, "e2").is_empty());
        let far = board("4k3/8/8/8/4p3/8/4P3/4K3 w - - 0 1");
        assert_eq!(names(&legal(&far, "e2")), vec!["e3"]);
    }

    #[test]
    fn pawn_captures_diagonally() {
        let b = board("4k3/8/8/8/8/3p1b2/4P3/4K3 w - - 0 1");
        assert_eq!(names(&legal(&b, "e2")), vec!["d3", "e3", "e4", "f3"]);
    }

    #[test]
    fn en_passant_requires_marker_and_adjacent_pawn() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(names(&legal(&b, "e5")), vec!["d6", "e6"]);

        let unmarked = board("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2");
        assert_eq!(names(&legal(&unmarked, "e5")), vec!["e6"]);
    }

    #[test]
    fn en_passant_exposing_king_is_pruned() {
        // Capturing en passant would open the fifth rank to the rook.
        let b = board("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 2");
        let reach = legal(&b, "b5");
        assert!(!reach.contains(sq("c6")));
        assert!(reach.contains(sq("b6")));
    }

    // -------------------------------------------------------------------
    // Self-check pruning
    // -------------------------------------------------------------------

    #[test]
    fn pinned_piece_keeps_only_pin_line() {
        let b = board("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        assert_eq!(
            names(&legal(&b, "e2")),
            vec!["e3", "e4", "e5", "e6", "e7", "e8"]
        );
    }

    #[test]
    fn unpruned_walk_keeps_illegal_squares() {
        let b = board("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let raw = find_reachable_squares(&b, sq("e2"), Color::Black, None, false);
        assert!(raw.contains(sq("a2")));
    }

    #[test]
    fn king_cannot_step_next_to_king() {
        let b = board("8/8/8/8/3k4/8/3K4/8 w - - 0 1");
        let reach = legal(&b, "d2");
        assert!(!reach.contains(sq("d3")));
        assert!(!reach.contains(sq("c3")));
        assert!(!reach.contains(sq("e3")));
        assert!(reach.contains(sq("d1")));
    }

    #[test]
    fn has_any_legal_move_detects_mate() {
        let mate = board("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1");
        assert!(!has_any_legal_move(&mate, Color::Black, None));
        assert!(has_any_legal_move(&mate, Color::White, None));
    }

    // -------------------------------------------------------------------
    // Castling
    // -------------------------------------------------------------------

    fn castles(fen_str: &str, from: &str) -> Reach {
        let parsed = fen::parse(fen_str).unwrap();
        let color = parsed.board.piece_at(sq(from)).unwrap().color;
        find_reachable_squares(
            &parsed.board,
            sq(from),
            !color,
            Some(parsed.castling[color.index()]),
            true,
        )
    }

    #[test]
    fn castling_both_sides() {
        let reach = castles("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1", "e1");
        assert!(reach.contains(sq("g1")));
        assert!(reach.contains(sq("c1")));
        assert!(reach.forfeited.is_empty());
    }

    #[test]
    fn castling_blocked_is_not_forfeited() {
        let reach = castles("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/RN2K1NR w KQkq - 0 1", "e1");
        assert!(!reach.contains(sq("g1")));
        assert!(!reach.contains(sq("c1")));
        assert!(reach.forfeited.is_empty());
    }

    #[test]
    fn castling_through_attacked_square_refused() {
        let reach = castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1");
        assert!(!reach.contains(sq("g1")));
        assert!(reach.contains(sq("c1")));
    }

    #[test]
    fn castling_out_of_check_refused() {
        let reach = castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1");
        assert!(!reach.contains(sq("g1")));
        assert!(!reach.contains(sq("c1")));
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        // b1 is attacked but the king never crosses it.
        let reach = castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1");
        assert!(reach.contains(sq("c1")));
    }

    #[test]
    fn missing_rook_forfeits_right() {
        let reach = castles("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1", "e1");
        assert!(reach.contains(sq("g1")));
        assert_eq!(reach.forfeited, vec![CastleSide::Queenside]);
    }

    // -------------------------------------------------------------------
    // play / unplay
    // -------------------------------------------------------------------

    #[test]
    fn play_unplay_restores_board() {
        let fen_str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let parsed = fen::parse(fen_str).unwrap();
        for (from, _) in parsed.board.pieces(Color::White).collect::<Vec<_>>() {
            let reach = find_reachable_squares(
                &parsed.board,
                from,
                Color::Black,
                Some(parsed.castling[0]),
                true,
            );
            for to in reach.squares {
                let mut b = parsed.board.clone();
                let undo = play(&mut b, from, to, None);
                unplay(&mut b, &undo);
                assert_eq!(b, parsed.board, "board differs after {from}{to}");
            }
        }
    }

    #[test]
    fn play_castling_moves_rook() {
        let mut b = board("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let undo = play(&mut b, sq("e1"), sq("g1"), None);
        assert!(undo.rook.is_some());
        assert_eq!(b.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
        assert!(b.get(sq("h1")).is_empty());
    }

    #[test]
    fn play_en_passant_removes_victim() {
        let mut b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let undo = play(&mut b, sq("e5"), sq("d6"), None);
        assert_eq!(undo.captured.map(|(at, _)| at), Some(sq("d5")));
        assert!(b.get(sq("d5")).is_empty());
        unplay(&mut b, &undo);
        assert_eq!(b.piece_at(sq("d5")).map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn play_promotes() {
        let mut b = board("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        play(&mut b, sq("e7"), sq("e8"), Some(PieceKind::Knight));
        assert_eq!(b.piece_at(sq("e8")).map(|p| p.kind), Some(PieceKind::Knight));

        let mut b = board("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let undo = play(&mut b, sq("e7"), sq("e8"), None);
        assert_eq!(b.piece_at(sq("e8")).map(|p| p.kind), Some(PieceKind::Queen));
        unplay(&mut b, &undo);
        assert_eq!(b.piece_at(sq("e7")).map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn play_increments_move_counter() {
        let mut b = Board::starting();
        play(&mut b, sq("g1"), sq("f3"), None);
        assert_eq!(b.piece_at(sq("f3")).unwrap().moves, 1);
    }
}
