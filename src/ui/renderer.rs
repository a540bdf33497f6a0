use crate::game::board::{Board, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyphs {
    #[default]
    Unicode,
    /// FEN letters, for terminals without chess symbols.
    Ascii,
}

/// Simple text renderer for the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardRenderer {
    pub glyphs: Glyphs,
    /// Draw from black's side: rank 1 on top, h-file on the left.
    pub flipped: bool,
}

impl BoardRenderer {
    pub fn new(glyphs: Glyphs, flipped: bool) -> Self {
        BoardRenderer { glyphs, flipped }
    }

    pub fn render(&self, board: &Board) -> String {
        self.render_with_targets(board, &[])
    }

    /// Marks `targets` with `*` on empty squares and `x` on occupied ones.
    pub fn render_with_targets(&self, board: &Board, targets: &[Position]) -> String {
        let mut output = String::new();
        let files = self.file_labels();
        output.push_str(&files);
        for row in self.order() {
            let rank = 8 - row;
            output.push_str(&format!("{rank} "));
            for col in self.order() {
                let pos = Position::new(row, col);
                let piece = board.get_piece(pos);
                let ch = if targets.contains(&pos) {
                    if piece.is_some() {
                        'x'
                    } else {
                        '*'
                    }
                } else {
                    match (piece, self.glyphs) {
                        (Some(p), Glyphs::Unicode) => p.symbol(),
                        (Some(p), Glyphs::Ascii) => p.to_char(),
                        (None, _) => '.',
                    }
                };
                output.push(ch);
                output.push(' ');
            }
            output.push_str(&format!("{rank}\n"));
        }
        output.push_str(&files);
        output
    }

    fn order(&self) -> Vec<usize> {
        if self.flipped {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        }
    }

    fn file_labels(&self) -> String {
        let mut labels = String::from(" ");
        for col in self.order() {
            labels.push(' ');
            labels.push((b'a' + col as u8) as char);
        }
        labels.push('\n');
        labels
    }
}
