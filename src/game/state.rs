//! Game controller: owns the current snapshot and drives the turn cycle.
//!
//! The rules engine only answers questions. `Game` asks them, replaces its
//! board wholesale on each accepted move, and holds the turn while a pawn
//! promotion waits for the player's choice.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::board::{Board, Position};
use crate::game::error::{GameError, GameResult};
use crate::game::mv::{Move, MoveHistory};
use crate::game::notation;
use crate::game::piece::{Color, Piece, PieceKind};
use crate::game::rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate, draw"),
        }
    }
}

/// Whether the turn is open or held by a pawn waiting to be promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Normal,
    AwaitingPromotion {
        square: Position,
        color: Color,
        pending: Move,
    },
}

/// What happened on an accepted `play` or `promote`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    /// The side now to move is in check.
    pub check: bool,
    pub promotion_pending: bool,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    history: MoveHistory,
    notation: Vec<String>,
    phase: Phase,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game::from_position(Board::new(), Color::White)
    }

    /// A game starting from an arbitrary position with no history.
    pub fn from_position(board: Board, turn: Color) -> Self {
        let history = MoveHistory::new();
        let status = rules::game_status(&board, turn, &history);
        Game {
            board,
            turn,
            history,
            notation: Vec::new(),
            phase: Phase::Normal,
            status,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Algebraic text of every completed move.
    pub fn notation(&self) -> &[String] {
        &self.notation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn in_check(&self) -> bool {
        rules::is_king_in_check(&self.board, self.turn)
    }

    /// Target squares for the piece on `from`; empty while the turn is held.
    pub fn legal_targets(&self, from: Position) -> Vec<Position> {
        if self.status.is_over() || self.phase != Phase::Normal {
            return Vec::new();
        }
        rules::legal_targets(&self.board, from, self.turn, &self.history)
    }

    pub fn play(&mut self, from: Position, to: Position) -> GameResult<MoveOutcome> {
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }
        if let Phase::AwaitingPromotion { square, .. } = self.phase {
            return Err(GameError::PromotionPending { square });
        }
        if !rules::is_legal_move(&self.board, from, to, self.turn, &self.history, false) {
            return Err(GameError::IllegalMove { from, to });
        }
        let mv = rules::describe_move(&self.board, from, to)
            .ok_or(GameError::IllegalMove { from, to })?;

        if rules::is_promotion(&self.board, from, to) {
            self.board = rules::apply_move(&self.board, from, to);
            self.phase = Phase::AwaitingPromotion {
                square: to,
                color: self.turn,
                pending: mv,
            };
            debug!("{} pawn reached {to}, awaiting promotion", self.turn);
            return Ok(MoveOutcome {
                mv,
                check: false,
                promotion_pending: true,
                status: self.status,
            });
        }

        let before = self.board.clone();
        self.board = rules::apply_move(&before, from, to);
        Ok(self.finish_turn(&before, mv))
    }

    /// Resolve a pending promotion and hand the turn over.
    pub fn promote(&mut self, kind: PieceKind) -> GameResult<MoveOutcome> {
        let Phase::AwaitingPromotion {
            square,
            color,
            pending,
        } = self.phase
        else {
            return Err(GameError::NoPromotionPending);
        };
        if !kind.is_promotion_choice() {
            return Err(GameError::InvalidPromotion(kind));
        }

        // Pawn back on its origin square. A captured piece is not restored;
        // pawn notation reads the capture from the move itself.
        let before = self
            .board
            .clone()
            .with_piece(square, None)
            .with_piece(pending.from, Some(pending.piece));

        self.board.set(square, Some(Piece::new(kind, color)));
        self.phase = Phase::Normal;
        Ok(self.finish_turn(&before, pending.with_promotion(kind)))
    }

    /// Back to the initial position.
    pub fn restart(&mut self) {
        info!("game restarted");
        *self = Game::new();
    }

    pub fn pgn(&self) -> String {
        notation::pgn(&self.notation, self.status)
    }

    fn finish_turn(&mut self, before: &Board, mv: Move) -> MoveOutcome {
        let text = notation::san(before, &self.history, &mv, &self.board);
        debug!("{} plays {text}", self.turn);
        self.history.push(mv);
        self.notation.push(text);
        self.turn = self.turn.opponent();
        self.status = rules::game_status(&self.board, self.turn, &self.history);
        if self.status.is_over() {
            info!("game over: {}", self.status);
        }
        MoveOutcome {
            mv,
            check: self.in_check(),
            promotion_pending: false,
            status: self.status,
        }
    }
}
