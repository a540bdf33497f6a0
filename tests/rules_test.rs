use rchess::game::board::{Board, Position};
use rchess::game::mv::MoveHistory;
use rchess::game::piece::{Color, PieceKind};
use rchess::game::rules::{
    apply_move, describe_move, game_status, is_game_over, is_king_in_check, is_legal_move,
    is_promotion, legal_moves, legal_targets,
};
use rchess::game::state::GameStatus;

fn sq(s: &str) -> Position {
    s.parse().unwrap()
}

fn board(placement: &str) -> Board {
    Board::from_placement(placement).unwrap()
}

fn legal(board: &Board, from: &str, to: &str, side: Color) -> bool {
    is_legal_move(board, sq(from), sq(to), side, &MoveHistory::new(), false)
}

/// Plays `moves` (from, to) in order without legality checks, recording history.
fn replay(mut board: Board, moves: &[(&str, &str)]) -> (Board, MoveHistory) {
    let mut history = MoveHistory::new();
    for (from, to) in moves {
        let mv = describe_move(&board, sq(from), sq(to)).unwrap();
        board = apply_move(&board, sq(from), sq(to));
        history.push(mv);
    }
    (board, history)
}

#[test]
fn initial_position_has_twenty_moves() {
    let start = Board::new();
    let moves = legal_moves(&start, Color::White, &MoveHistory::new());
    assert_eq!(moves.len(), 20);
    let pawn_moves = moves
        .iter()
        .filter(|m| m.piece.kind == PieceKind::Pawn)
        .count();
    assert_eq!(pawn_moves, 16);
    assert_eq!(moves.len() - pawn_moves, 4);
    assert!(!is_game_over(&start, Color::White, &MoveHistory::new()));
    assert!(!is_king_in_check(&start, Color::White));
}

#[test]
fn black_also_has_twenty_replies() {
    let (after, history) = replay(Board::new(), &[("e2", "e4")]);
    assert_eq!(legal_moves(&after, Color::Black, &history).len(), 20);
}

#[test]
fn wrong_colour_and_empty_squares_are_rejected() {
    let start = Board::new();
    assert!(!legal(&start, "e7", "e5", Color::White));
    assert!(!legal(&start, "e4", "e5", Color::White));
    assert!(legal(&start, "e7", "e5", Color::Black));
}

#[test]
fn no_self_capture() {
    let start = Board::new();
    assert!(!legal(&start, "a1", "a2", Color::White));
    assert!(!legal(&start, "d1", "e1", Color::White));
}

#[test]
fn fools_mate_is_checkmate() {
    let (after, history) = replay(
        Board::new(),
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );
    assert!(is_king_in_check(&after, Color::White));
    assert!(is_game_over(&after, Color::White, &history));
    assert_eq!(
        game_status(&after, Color::White, &history),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn cornered_king_is_stalemate() {
    let b = board("k7/8/1Q6/8/8/8/8/4K3");
    let history = MoveHistory::new();
    assert!(is_game_over(&b, Color::Black, &history));
    assert!(!is_king_in_check(&b, Color::Black));
    assert_eq!(game_status(&b, Color::Black, &history), GameStatus::Stalemate);
    assert!(!is_game_over(&b, Color::White, &history));
}

#[test]
fn pawn_shapes() {
    let start = Board::new();
    assert!(legal(&start, "e2", "e3", Color::White));
    assert!(legal(&start, "e2", "e4", Color::White));
    assert!(!legal(&start, "e2", "e5", Color::White));
    assert!(!legal(&start, "e2", "d3", Color::White));

    // Blocked one square ahead: neither push is possible.
    let blocked = board("4k3/8/8/8/8/4n3/4P3/4K3");
    assert!(!legal(&blocked, "e2", "e3", Color::White));
    assert!(!legal(&blocked, "e2", "e4", Color::White));

    // Double push only from the starting row.
    let advanced = board("4k3/8/8/8/8/4P3/8/4K3");
    assert!(legal(&advanced, "e3", "e4", Color::White));
    assert!(!legal(&advanced, "e3", "e5", Color::White));

    // Diagonal only onto an enemy piece, never backwards.
    let capture = board("4k3/8/8/3p4/4P3/8/8/4K3");
    assert!(legal(&capture, "e4", "d5", Color::White));
    assert!(!legal(&capture, "e4", "f5", Color::White));
    assert!(legal(&capture, "d5", "e4", Color::Black));
    assert!(!legal(&capture, "e4", "d3", Color::White));
}

#[test]
fn sliding_pieces_stop_at_blockers() {
    let b = board("4k3/8/8/8/3p4/8/1P6/R2QK3");
    // Rook along the rank up to the queen, up the file freely.
    assert!(legal(&b, "a1", "c1", Color::White));
    assert!(!legal(&b, "a1", "e1", Color::White));
    assert!(legal(&b, "a1", "a7", Color::White));
    assert!(!legal(&b, "a1", "b2", Color::White));
    // Queen up the file as far as the pawn, and along open diagonals.
    assert!(legal(&b, "d1", "d4", Color::White));
    assert!(!legal(&b, "d1", "d5", Color::White));
    assert!(legal(&b, "d1", "h5", Color::White));
    assert!(legal(&b, "d1", "a4", Color::White));
    assert!(!legal(&b, "d1", "b4", Color::White));
}

#[test]
fn bishops_and_knights() {
    let start = Board::new();
    assert!(legal(&start, "g1", "f3", Color::White));
    assert!(legal(&start, "g1", "h3", Color::White));
    assert!(!legal(&start, "g1", "g3", Color::White));
    assert!(!legal(&start, "f1", "c4", Color::White));

    let (open, history) = replay(start, &[("e2", "e4"), ("e7", "e5")]);
    assert!(is_legal_move(&open, sq("f1"), sq("c4"), Color::White, &history, false));
    assert!(is_legal_move(&open, sq("f1"), sq("a6"), Color::White, &history, false));
    assert!(!is_legal_move(&open, sq("f1"), sq("f3"), Color::White, &history, false));
}

#[test]
fn king_steps_one_square() {
    let b = board("4k3/8/8/8/8/8/8/4K3");
    assert!(legal(&b, "e1", "d2", Color::White));
    assert!(legal(&b, "e1", "f1", Color::White));
    assert!(!legal(&b, "e1", "e3", Color::White));
}

#[test]
fn king_cannot_step_into_check() {
    let b = board("4k3/8/8/8/8/8/r7/4K3");
    assert!(!legal(&b, "e1", "e2", Color::White));
    assert!(legal(&b, "e1", "f1", Color::White));
}

#[test]
fn check_detection_by_piece() {
    // Pawns attack diagonally forward only.
    assert!(is_king_in_check(&board("8/8/8/3k4/4P3/8/8/4K3"), Color::Black));
    assert!(!is_king_in_check(&board("8/8/4P3/3k4/8/8/8/4K3"), Color::Black));
    assert!(!is_king_in_check(&board("8/8/8/4k3/4P3/8/8/4K3"), Color::Black));
    // Knight jumps over anything.
    assert!(is_king_in_check(&board("4k3/8/3N4/8/8/8/8/4K3"), Color::Black));
    // A rook behind a blocker does not give check.
    assert!(is_king_in_check(&board("4k3/8/8/8/8/8/8/4RK2"), Color::Black));
    assert!(!is_king_in_check(&board("4k3/4p3/8/8/8/8/8/4RK2"), Color::Black));
    // No king, no check.
    assert!(!is_king_in_check(&board("8/8/8/8/8/8/8/4RK2"), Color::Black));
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    let b = board("4r1k1/8/8/8/8/8/4B3/4K3");
    assert!(!legal(&b, "e2", "d3", Color::White));
    // The bishop's shape alone would allow it.
    assert!(is_legal_move(&b, sq("e2"), sq("d3"), Color::White, &MoveHistory::new(), true));
    // A rook pinned on the same file may slide along it.
    let rook_pin = board("4r1k1/8/8/8/8/8/4R3/4K3");
    assert!(legal(&rook_pin, "e2", "e5", Color::White));
    assert!(legal(&rook_pin, "e2", "e8", Color::White));
    assert!(!legal(&rook_pin, "e2", "d2", Color::White));
}

#[test]
fn must_answer_check() {
    let b = board("4k3/8/8/8/8/8/3P4/r3K2R");
    assert!(is_king_in_check(&b, Color::White));
    // Blocking, capturing or stepping away are fine; anything else is not.
    assert!(!legal(&b, "d2", "d3", Color::White));
    assert!(!legal(&b, "h1", "h5", Color::White));
    assert!(legal(&b, "e1", "e2", Color::White));
    assert!(!legal(&b, "e1", "d1", Color::White));
}

#[test]
fn castling_both_sides_when_clear() {
    let b = board("r3k2r/8/8/8/8/8/8/R3K2R");
    assert!(legal(&b, "e1", "g1", Color::White));
    assert!(legal(&b, "e1", "c1", Color::White));
    assert!(legal(&b, "e8", "g8", Color::Black));
    assert!(legal(&b, "e8", "c8", Color::Black));
    let castle = describe_move(&b, sq("e1"), sq("g1")).unwrap();
    assert!(castle.is_castle);
    assert!(!castle.is_capture);
}

#[test]
fn castling_never_in_attack_mode() {
    let b = board("r3k2r/8/8/8/8/8/8/R3K2R");
    assert!(!is_legal_move(&b, sq("e1"), sq("g1"), Color::White, &MoveHistory::new(), true));
}

#[test]
fn castling_through_attacked_square_is_illegal() {
    // f1 is covered by the rook on f6; g1 itself is safe.
    let b = board("r3k2r/8/5r2/8/8/8/8/R3K2R");
    assert!(!legal(&b, "e1", "g1", Color::White));
    assert!(legal(&b, "e1", "c1", Color::White));

    let onto_attacked = board("r3k2r/8/6r1/8/8/8/8/R3K2R");
    assert!(!legal(&onto_attacked, "e1", "g1", Color::White));

    let out_of_check = board("r3k2r/8/4r3/8/8/8/8/R3K2R");
    assert!(!legal(&out_of_check, "e1", "g1", Color::White));
    assert!(!legal(&out_of_check, "e1", "c1", Color::White));
}

#[test]
fn queenside_castling_through_attacked_square_is_illegal() {
    // d1 is covered by the rook on d5; c1 itself is safe.
    let b = board("4k3/8/8/3r4/8/8/8/R3K3");
    assert!(!legal(&b, "e1", "c1", Color::White));
    assert!(legal(&b, "a1", "b1", Color::White));

    let onto_attacked = board("4k3/8/8/2r5/8/8/8/R3K3");
    assert!(!legal(&onto_attacked, "e1", "c1", Color::White));

    let black_side = board("r3k3/8/8/3R4/8/8/8/4K3");
    assert!(!legal(&black_side, "e8", "c8", Color::Black));
}

#[test]
fn queenside_rook_square_may_be_attacked() {
    // b1 is attacked but the king never crosses it.
    let b = board("1r2k3/8/8/8/8/8/8/R3K3");
    assert!(legal(&b, "e1", "c1", Color::White));
}

#[test]
fn castling_needs_empty_path_and_home_pieces() {
    let blocked = board("r3k2r/8/8/8/8/8/8/RN2K2R");
    assert!(!legal(&blocked, "e1", "c1", Color::White));
    assert!(legal(&blocked, "e1", "g1", Color::White));

    let no_rook = board("r3k2r/8/8/8/8/8/8/R3K3");
    assert!(!legal(&no_rook, "e1", "g1", Color::White));

    let knight_in_corner = board("r3k2r/8/8/8/8/8/8/R3K2N");
    assert!(!legal(&knight_in_corner, "e1", "g1", Color::White));

    let king_off_home = board("r3k2r/8/8/8/8/8/8/R2K3R");
    assert!(!legal(&king_off_home, "d1", "f1", Color::White));
}

#[test]
fn castling_rights_follow_current_squares() {
    // A rook that left and came back is treated as never having moved.
    let (b, history) = replay(
        board("r3k2r/p7/8/8/8/8/8/R3K2R"),
        &[("h1", "h2"), ("a7", "a6"), ("h2", "h1"), ("a6", "a5")],
    );
    assert!(is_legal_move(&b, sq("e1"), sq("g1"), Color::White, &history, false));
}

#[test]
fn en_passant_right_after_double_push() {
    let (b, history) = replay(board("4k3/3p4/8/4P3/8/8/8/4K3"), &[("d7", "d5")]);
    assert!(is_legal_move(&b, sq("e5"), sq("d6"), Color::White, &history, false));
    let mv = describe_move(&b, sq("e5"), sq("d6")).unwrap();
    assert!(mv.is_en_passant);
    assert!(mv.is_capture);
    let after = apply_move(&b, sq("e5"), sq("d6"));
    assert_eq!(after.get_piece(sq("d5")), None);
    assert_eq!(after.placement(), "4k3/8/3P4/8/8/8/8/4K3");
}

#[test]
fn en_passant_expires_after_one_move() {
    let (b, history) = replay(
        board("4k3/3p4/8/4P3/8/8/8/4K3"),
        &[("d7", "d5"), ("e1", "e2"), ("e8", "f7")],
    );
    assert!(!is_legal_move(&b, sq("e5"), sq("d6"), Color::White, &history, false));
    assert!(!legal_targets(&b, sq("e5"), Color::White, &history).contains(&sq("d6")));
}

#[test]
fn en_passant_requires_a_double_push() {
    let (b, history) = replay(
        board("4k3/8/3p4/4P3/8/8/8/4K3"),
        &[("d6", "d5")],
    );
    assert!(!is_legal_move(&b, sq("e5"), sq("d6"), Color::White, &history, false));
}

#[test]
fn en_passant_cannot_expose_the_king() {
    // Both pawns leave the fifth rank, opening it for the rook.
    let (b, history) = replay(board("8/3p4/8/K3P2r/8/8/8/4k3"), &[("d7", "d5")]);
    assert!(!is_legal_move(&b, sq("e5"), sq("d6"), Color::White, &history, false));
    assert!(is_legal_move(&b, sq("e5"), sq("e6"), Color::White, &history, false));
}

#[test]
fn en_passant_escape_prevents_mate() {
    // The pawn on b5 checks a4; every flight square is covered and b5 is
    // defended, so capturing it en passant is the only reply.
    let (b, history) = replay(board("7k/1p6/8/2P5/K1n5/8/8/1r6"), &[("b7", "b5")]);
    assert!(is_king_in_check(&b, Color::White));
    assert!(!is_game_over(&b, Color::White, &history));
    assert!(is_game_over(&b, Color::White, &MoveHistory::new()));
}

#[test]
fn promotion_is_a_legal_pawn_move() {
    let b = board("4k3/P7/8/8/8/8/8/4K3");
    assert!(legal(&b, "a7", "a8", Color::White));
    assert!(is_promotion(&b, sq("a7"), sq("a8")));
    assert!(!is_promotion(&Board::new(), sq("e2"), sq("e4")));
}

#[test]
fn quiet_move_and_its_inverse_restore_the_board() {
    let start = Board::new();
    let out = apply_move(&start, sq("g1"), sq("f3"));
    assert_ne!(out, start);
    let back = apply_move(&out, sq("f3"), sq("g1"));
    assert_eq!(back, start);
}
