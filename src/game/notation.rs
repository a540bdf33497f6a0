//! Standard algebraic notation for played moves and PGN movetext export.

use crate::game::board::Board;
use crate::game::mv::{Move, MoveHistory};
use crate::game::piece::{Color, PieceKind};
use crate::game::rules;
use crate::game::state::GameStatus;

/// Algebraic text for `mv`, played from `before` (with `history` preceding it)
/// and producing `after`.
pub fn san(before: &Board, history: &MoveHistory, mv: &Move, after: &Board) -> String {
    let mut out = String::new();

    if mv.is_castle {
        out.push_str(if mv.to.col > mv.from.col { "O-O" } else { "O-O-O" });
    } else {
        match mv.piece.kind {
            PieceKind::Pawn => {
                if mv.is_capture {
                    out.push(mv.from.file_char());
                    out.push('x');
                }
            }
            kind => {
                out.push(kind.letter());
                out.push_str(&disambiguation(before, history, mv));
                if mv.is_capture {
                    out.push('x');
                }
            }
        }
        out.push_str(&mv.to.to_string());
        if let Some(kind) = mv.promotion {
            out.push('=');
            out.push(kind.letter());
        }
    }

    let opponent = mv.piece.color.opponent();
    if rules::is_king_in_check(after, opponent) {
        let mut played = history.clone();
        played.push(*mv);
        out.push(if rules::is_game_over(after, opponent, &played) {
            '#'
        } else {
            '+'
        });
    }
    out
}

// File, rank or both of the origin square when another piece of the same kind
// could also reach the target.
fn disambiguation(before: &Board, history: &MoveHistory, mv: &Move) -> String {
    let rivals: Vec<_> = before
        .pieces()
        .filter(|&(pos, p)| p == mv.piece && pos != mv.from)
        .filter(|&(pos, _)| rules::is_legal_move(before, pos, mv.to, mv.piece.color, history, false))
        .map(|(pos, _)| pos)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|r| r.col != mv.from.col) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|r| r.row != mv.from.row) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

pub fn result_token(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "*",
        GameStatus::Checkmate {
            winner: Color::White,
        } => "1-0",
        GameStatus::Checkmate {
            winner: Color::Black,
        } => "0-1",
        GameStatus::Stalemate => "1/2-1/2",
    }
}

/// Numbered movetext followed by the result token, e.g. `1. e4 e5 2. Nf3 *`.
pub fn pgn(moves: &[String], status: GameStatus) -> String {
    let mut parts: Vec<String> = moves
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| format!("{}. {}", i + 1, pair.join(" ")))
        .collect();
    parts.push(result_token(status).to_string());
    parts.join(" ")
}
