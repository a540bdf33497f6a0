//! The rules engine.
//!
//! Everything here is a pure function of its arguments: a board snapshot, the
//! side to move and, where en passant matters, the move history. Legality is
//! answered with a plain `bool`; there is no error taxonomy.
//!
//! `is_legal_move` and `is_king_in_check` call each other. The
//! `skip_safety_check` flag breaks the cycle: attack detection asks for
//! pseudo-legal moves only, which never re-enter the king-safety test and
//! never consider castling.

use crate::game::board::{Board, Position};
use crate::game::mv::{Move, MoveHistory};
use crate::game::piece::{Color, Piece, PieceKind};
use crate::game::state::GameStatus;

const KINGSIDE_ROOK_COL: usize = 7;
const QUEENSIDE_ROOK_COL: usize = 0;
const KING_COL: usize = 4;

/// Whether moving the piece on `from` to `to` is legal for `side`.
///
/// With `skip_safety_check` set, the mover's own king safety is ignored and
/// castling is never allowed. That mode exists for attack detection.
pub fn is_legal_move(
    board: &Board,
    from: Position,
    to: Position,
    side: Color,
    history: &MoveHistory,
    skip_safety_check: bool,
) -> bool {
    let Some(piece) = board.get_piece(from) else {
        return false;
    };
    if piece.color != side {
        return false;
    }
    if board.get_piece(to).is_some_and(|target| target.color == side) {
        return false;
    }
    if !skip_safety_check && leaves_king_in_check(board, from, to, side) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_move_ok(board, from, to, side, history),
        PieceKind::Rook => straight_path_clear(board, from, to),
        PieceKind::Knight => {
            let (dr, dc) = deltas(from, to);
            matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
        }
        PieceKind::Bishop => diagonal_path_clear(board, from, to),
        PieceKind::Queen => {
            straight_path_clear(board, from, to) || diagonal_path_clear(board, from, to)
        }
        PieceKind::King => {
            let (dr, dc) = deltas(from, to);
            if dr.abs() <= 1 && dc.abs() <= 1 {
                return true;
            }
            !skip_safety_check && castling_ok(board, from, to, side)
        }
    }
}

/// Whether the king of `color` is attacked by any opposing piece.
///
/// A board without that king is not in check; simulations may pass through
/// such transient states.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_square(color) else {
        return false;
    };
    let attacker = color.opponent();
    let no_history = MoveHistory::new();
    board
        .pieces()
        .filter(|(_, p)| p.color == attacker)
        .any(|(from, _)| is_legal_move(board, from, king, attacker, &no_history, true))
}

/// True when `color` has no legal move at all.
///
/// Does not tell checkmate from stalemate; see [`game_status`].
pub fn is_game_over(board: &Board, color: Color, history: &MoveHistory) -> bool {
    !board
        .pieces()
        .filter(|(_, p)| p.color == color)
        .any(|(from, _)| {
            Position::all().any(|to| is_legal_move(board, from, to, color, history, false))
        })
}

/// Terminal classification for the side about to move.
pub fn game_status(board: &Board, side_to_move: Color, history: &MoveHistory) -> GameStatus {
    if !is_game_over(board, side_to_move, history) {
        GameStatus::InProgress
    } else if is_king_in_check(board, side_to_move) {
        GameStatus::Checkmate {
            winner: side_to_move.opponent(),
        }
    } else {
        GameStatus::Stalemate
    }
}

/// Squares the piece on `from` may legally move to.
pub fn legal_targets(
    board: &Board,
    from: Position,
    side: Color,
    history: &MoveHistory,
) -> Vec<Position> {
    Position::all()
        .filter(|&to| is_legal_move(board, from, to, side, history, false))
        .collect()
}

/// Every legal move for `side`. Promotions appear once, without a chosen piece.
pub fn legal_moves(board: &Board, side: Color, history: &MoveHistory) -> Vec<Move> {
    board
        .pieces()
        .filter(|(_, p)| p.color == side)
        .flat_map(|(from, _)| {
            legal_targets(board, from, side, history)
                .into_iter()
                .filter_map(move |to| describe_move(board, from, to))
        })
        .collect()
}

/// Builds the move value for the piece on `from` going to `to`.
/// Legality is not checked.
pub fn describe_move(board: &Board, from: Position, to: Position) -> Option<Move> {
    let piece = board.get_piece(from)?;
    let is_en_passant = is_en_passant_shape(board, piece, from, to);
    Some(Move {
        from,
        to,
        piece,
        is_capture: board.get_piece(to).is_some() || is_en_passant,
        is_castle: piece.kind == PieceKind::King && from.col.abs_diff(to.col) == 2,
        is_en_passant,
        promotion: None,
    })
}

/// A pawn landing on its far rank.
pub fn is_promotion(board: &Board, from: Position, to: Position) -> bool {
    board
        .get_piece(from)
        .is_some_and(|p| p.kind == PieceKind::Pawn && to.row == p.color.promotion_row())
}

/// The board after moving `from` to `to`.
///
/// Removes an en-passant victim and, for a two-square king move, brings the
/// rook over to the square the king crossed. A promoting pawn stays a pawn
/// until the caller substitutes the chosen piece.
pub fn apply_move(board: &Board, from: Position, to: Position) -> Board {
    let mut next = board.clone();
    let Some(piece) = board.get_piece(from) else {
        return next;
    };

    if is_en_passant_shape(board, piece, from, to) {
        next.set(Position::new(from.row, to.col), None);
    }
    if piece.kind == PieceKind::King && from.row == to.row && from.col.abs_diff(to.col) == 2 {
        let (rook_col, rook_to) = if to.col > from.col {
            (KINGSIDE_ROOK_COL, to.col - 1)
        } else {
            (QUEENSIDE_ROOK_COL, to.col + 1)
        };
        let rook_from = Position::new(from.row, rook_col);
        let rook = next.get_piece(rook_from);
        next.set(rook_from, None);
        next.set(Position::new(from.row, rook_to), rook);
    }

    next.set(from, None);
    next.set(to, Some(piece));
    next
}

fn leaves_king_in_check(board: &Board, from: Position, to: Position, side: Color) -> bool {
    let scratch = apply_move(board, from, to);
    is_king_in_check(&scratch, side)
}

fn deltas(from: Position, to: Position) -> (i32, i32) {
    (
        to.row as i32 - from.row as i32,
        to.col as i32 - from.col as i32,
    )
}

// A pawn stepping diagonally onto an empty square can only be capturing en passant.
fn is_en_passant_shape(board: &Board, piece: Piece, from: Position, to: Position) -> bool {
    piece.kind == PieceKind::Pawn && from.col != to.col && board.get_piece(to).is_none()
}

fn pawn_move_ok(
    board: &Board,
    from: Position,
    to: Position,
    side: Color,
    history: &MoveHistory,
) -> bool {
    let dir = side.pawn_direction();
    let (dr, dc) = deltas(from, to);
    let target = board.get_piece(to);

    if dc == 0 {
        if dr == dir {
            return target.is_none();
        }
        if dr == 2 * dir && from.row == side.pawn_start_row() {
            let Some(middle) = from.offset(dir, 0) else {
                return false;
            };
            return target.is_none() && board.get_piece(middle).is_none();
        }
        return false;
    }

    if dc.abs() == 1 && dr == dir {
        // Own pieces were already rejected, so an occupied target is an enemy.
        return target.is_some() || en_passant_available(history, from, to, side);
    }
    false
}

fn en_passant_available(history: &MoveHistory, from: Position, to: Position, side: Color) -> bool {
    history.last().is_some_and(|last| {
        last.piece.color != side
            && last.is_double_pawn_push()
            && last.to.row == from.row
            && last.to.col == to.col
    })
}

fn straight_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr != 0 && dc != 0 {
        return false;
    }
    ray_clear(board, from, to)
}

fn diagonal_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr.abs() != dc.abs() {
        return false;
    }
    ray_clear(board, from, to)
}

// Squares strictly between `from` and `to` along a rank, file or diagonal are empty.
fn ray_clear(board: &Board, from: Position, to: Position) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr == 0 && dc == 0 {
        return false;
    }
    let step = (dr.signum(), dc.signum());
    let mut cur = from;
    loop {
        let Some(next) = cur.offset(step.0, step.1) else {
            return false;
        };
        if next == to {
            return true;
        }
        if board.get_piece(next).is_some() {
            return false;
        }
        cur = next;
    }
}

fn castling_ok(board: &Board, from: Position, to: Position, side: Color) -> bool {
    if from.row != to.row || from.col.abs_diff(to.col) != 2 {
        return false;
    }
    let home = side.back_rank();
    if from != Position::new(home, KING_COL) {
        return false;
    }

    let kingside = to.col > from.col;
    let rook_col = if kingside {
        KINGSIDE_ROOK_COL
    } else {
        QUEENSIDE_ROOK_COL
    };
    if board.get_piece(Position::new(home, rook_col)) != Some(Piece::new(PieceKind::Rook, side)) {
        return false;
    }

    let (lo, hi) = if kingside {
        (KING_COL + 1, rook_col)
    } else {
        (rook_col + 1, KING_COL)
    };
    if (lo..hi).any(|col| board.get_piece(Position::new(home, col)).is_some()) {
        return false;
    }

    // Start, transit and landing squares must all be safe for the king.
    let king = Piece::new(PieceKind::King, side);
    (0..=2).all(|i| {
        let col = if kingside { KING_COL + i } else { KING_COL - i };
        let scratch = board
            .clone()
            .with_piece(from, None)
            .with_piece(Position::new(home, col), Some(king));
        !is_king_in_check(&scratch, side)
    })
}
