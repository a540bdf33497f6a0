pub mod board;
pub mod error;
pub mod mv;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod save;
pub mod state;

pub use board::{Board, Position};
pub use error::{GameError, GameResult, ParseError};
pub use mv::{Move, MoveHistory};
pub use piece::{Color, Piece, PieceKind};
pub use state::{Game, GameStatus, MoveOutcome, Phase};
