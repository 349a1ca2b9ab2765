//! End-to-end rule scenarios through the public `Game` API.

use relay_chess::engine::{ChessError, Color, Coord, EndState, Game, GameStatus, PieceKind};

fn sq(name: &str) -> Coord {
    Coord::from_algebraic(name).unwrap()
}

fn attempt(g: &mut Game, from: &str, to: &str, mover: Color) -> Result<bool, ChessError> {
    let (f, t) = (sq(from), sq(to));
    g.apply_move(f.file as i32, f.rank as i32, t.file as i32, t.rank as i32, mover)
}

/// Play a sequence of coordinate moves, alternating colours from the side
/// to move.
fn play_line(g: &mut Game, line: &[&str]) {
    for mv in line {
        let (from, to) = mv.split_at(2);
        let mover = g.turn();
        assert_eq!(attempt(g, from, to, mover), Ok(true), "{mv} rejected");
    }
}

#[test]
fn fools_mate() {
    let mut g = Game::new();
    play_line(&mut g, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(g.is_checkmate());
    assert_eq!(g.end_state(), Some(EndState::Checkmate));
    assert_eq!(g.status(), GameStatus::Checkmate);
    assert_eq!(
        attempt(&mut g, "a2", "a3", Color::White),
        Err(ChessError::GameOver(EndState::Checkmate))
    );
}

#[test]
fn queen_supported_by_king_mates() {
    let g = Game::from_fen("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(g.is_checkmate());
    assert!(g.is_ended());
}

#[test]
fn lone_queen_check_is_not_mate() {
    let mut g = Game::from_fen("4k3/8/8/8/8/8/4Q3/4K3 b - - 0 1").unwrap();
    assert_eq!(g.status(), GameStatus::Check);
    assert!(!g.is_ended());
    let e8 = sq("e8");
    let escapes = g.legal_moves(e8.file as i32, e8.rank as i32, Color::Black);
    assert!(!escapes.is_empty());
    assert!(escapes.iter().all(|c| c.file != 4));
}

#[test]
fn ruy_lopez_with_castling_exports_expected_fen() {
    let mut g = Game::new();
    play_line(
        &mut g,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "e1g1"],
    );
    assert_eq!(
        g.export_fen(),
        "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 1 4"
    );
}

#[test]
fn en_passant_window_closes_after_one_ply() {
    let mut g = Game::new();
    play_line(&mut g, &["e2e4", "h7h6", "e4e5", "d7d5"]);
    assert_eq!(g.en_passant_target(), Some(sq("d6")));

    let mut taken = g.clone();
    play_line(&mut taken, &["e5d6"]);
    assert!(taken.board().get(sq("d5")).is_empty());

    play_line(&mut g, &["b1c3", "h6h5"]);
    assert_eq!(g.en_passant_target(), None);
    assert_eq!(attempt(&mut g, "e5", "d6", Color::White), Ok(false));
}

#[test]
fn rejected_moves_change_nothing() {
    let mut g = Game::new();
    let before = g.export_fen();
    assert_eq!(attempt(&mut g, "e7", "e5", Color::Black), Ok(false));
    assert_eq!(attempt(&mut g, "e7", "e5", Color::White), Ok(false));
    assert_eq!(attempt(&mut g, "e2", "e5", Color::White), Ok(false));
    assert_eq!(g.apply_move(4, 1, 4, 8, Color::White), Ok(false));
    assert_eq!(g.apply_move(-1, 1, 0, 2, Color::White), Ok(false));
    assert_eq!(g.export_fen(), before);
    assert!(g.is_starting_position());
}

#[test]
fn underpromotion_to_knight_gives_check() {
    let mut g = Game::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let accepted = g
        .apply_move_with_promotion(4, 6, 4, 7, Color::White, Some(PieceKind::Knight))
        .unwrap();
    assert!(accepted);
    assert_eq!(g.board().piece_at(sq("e8")).map(|p| p.kind), Some(PieceKind::Knight));
    assert!(g.is_check(Color::Black));
}

#[test]
fn move_limit_draws_at_fifty() {
    let mut g = Game::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 3 49").unwrap();
    play_line(&mut g, &["e8d7"]);
    assert_eq!(g.fullmove_number(), 50);
    assert!(g.is_draw_by_move_limit());
    assert_eq!(g.end_state(), Some(EndState::MoveLimit));
}

#[test]
fn fen_round_trips_through_import() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut g = Game::new();
        g.import_fen(fen).unwrap();
        assert_eq!(g.export_fen(), fen);
    }
}

#[test]
fn games_are_independent() {
    let mut a = Game::new();
    let b = Game::new();
    play_line(&mut a, &["d2d4"]);
    assert!(!a.is_starting_position());
    assert!(b.is_starting_position());
}
