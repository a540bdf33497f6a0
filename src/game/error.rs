//! Error types for everything outside the rules engine.
//!
//! The engine itself answers with plain booleans; these errors come from
//! parsing user text, driving the game controller and reading save files.

use crate::game::board::Position;
use crate::game::piece::PieceKind;
use crate::game::state::GameStatus;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid square `{0}` (expected a file a-h and a rank 1-8, e.g. e4)")]
    Square(String),

    #[error("invalid piece `{0}`")]
    Piece(String),

    #[error("invalid board placement: {0}")]
    Placement(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("illegal move {from}-{to}")]
    IllegalMove { from: Position, to: Position },

    #[error("a promotion is pending on {square}; choose a piece first")]
    PromotionPending { square: Position },

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("cannot promote to a {0}")]
    InvalidPromotion(PieceKind),

    #[error("the game is over ({0})")]
    GameOver(GameStatus),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
