// Simple representation of a chess board.
// An 8x8 array of optional pieces; row 0 is black's back rank, col 0 the a-file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::error::ParseError;
use crate::game::piece::{Color, Piece, PieceKind};

/// A square on the board, addressed by (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 8 && col < 8, "square ({row}, {col}) is off the board");
        Position { row, col }
    }

    /// The square `(dr, dc)` away, if it is still on the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Position> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Every square, row by row from a8 to h1.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|row| (0..8).map(move |col| Position::new(row, col)))
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col as u8) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.row as u8) as char
    }

    /// Same square seen from the other side (rows flipped).
    pub fn mirrored(self) -> Position {
        Position::new(7 - self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(ParseError::Square(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ParseError::Square(s.to_string()));
        }
        // rank 8 -> row 0, rank 1 -> row 7
        Ok(Position::new((b'8' - rank) as usize, (file - b'a') as usize))
    }
}

impl TryFrom<String> for Position {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> String {
        pos.to_string()
    }
}

/// An immutable board snapshot. Serialized as its FEN placement field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Standard starting position.
    pub fn new() -> Self {
        let mut squares = [[None; 8]; 8];
        for (col, kind) in BACK_RANK.iter().enumerate() {
            squares[0][col] = Some(Piece::new(*kind, Color::Black));
            squares[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            squares[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            squares[7][col] = Some(Piece::new(*kind, Color::White));
        }
        Board { squares }
    }

    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Return the piece on a square. Returns None if empty.
    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row][pos.col]
    }

    /// A copy of this board with `pos` set to `piece`.
    pub fn with_piece(mut self, pos: Position, piece: Option<Piece>) -> Self {
        self.set(pos, piece);
        self
    }

    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row][pos.col] = piece;
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get_piece(pos).map(|p| (pos, p)))
    }

    pub fn king_square(&self, color: Color) -> Option<Position> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces().find(|(_, p)| *p == king).map(|(pos, _)| pos)
    }

    /// Colours swapped and rows flipped: the same position from the other side.
    pub fn mirrored(&self) -> Board {
        let mut out = Board::empty();
        for (pos, piece) in self.pieces() {
            out.set(pos.mirrored(), Some(piece.swapped()));
        }
        out
    }

    /// Parse the piece placement field of a FEN string
    /// (e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`).
    pub fn from_placement(placement: &str) -> Result<Board, ParseError> {
        let ranks: Vec<&str> = placement.trim().split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseError::Placement(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }
        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or_else(|| {
                        ParseError::Placement(format!("unknown piece letter `{c}`"))
                    })?;
                    if col >= 8 {
                        return Err(ParseError::Placement(format!(
                            "rank {} is longer than 8 squares",
                            8 - row
                        )));
                    }
                    board.set(Position::new(row, col), Some(piece));
                    col += 1;
                }
            }
            if col != 8 {
                return Err(ParseError::Placement(format!(
                    "rank {} covers {col} squares",
                    8 - row
                )));
            }
        }
        Ok(board)
    }

    pub fn placement(&self) -> String {
        let mut out = String::new();
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.squares[row][col] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl TryFrom<String> for Board {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Board::from_placement(&s)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> String {
        board.placement()
    }
}
