//! Text commands on top of a `Game`: parsing what the player types and
//! turning the game's answers into something to print.

use std::path::PathBuf;

use anyhow::{bail, Result};
use log::warn;

use rchess::game::board::Position;
use rchess::game::error::GameError;
use rchess::game::piece::PieceKind;
use rchess::game::rules;
use rchess::game::save;
use rchess::game::state::{Game, GameStatus, MoveOutcome, Phase};
use rchess::ui::{BoardRenderer, Glyphs};

use crate::cli::Commands;
use crate::config::Config;

pub const HELP: &str = "\
commands:
  e2 e4 | e2e4 | e7e8q   move (optional promotion piece)
  moves e2               show legal targets of a piece
  promote q|r|b|n        resolve a pending promotion
  show                   print the board
  flip                   turn the board around
  pgn                    print the game as PGN
  restart                start a new game
  save                   save now
  help                   this text
  quit                   leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move {
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    },
    Moves(Position),
    Promote(PieceKind),
    Show,
    Flip,
    Pgn,
    Restart,
    Save,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let cmd = match words.as_slice() {
        ["moves", square] => Command::Moves(square.parse()?),
        ["promote", piece] => Command::Promote(piece.parse()?),
        ["move", from, to] | [from, to] => Command::Move {
            from: from.parse()?,
            to: to.parse()?,
            promotion: None,
        },
        ["show"] => Command::Show,
        ["flip"] => Command::Flip,
        ["pgn"] => Command::Pgn,
        ["restart"] => Command::Restart,
        ["save"] => Command::Save,
        ["help"] | ["?"] => Command::Help,
        ["quit"] | ["exit"] => Command::Quit,
        [word] => parse_compact_move(word)?,
        [] => bail!("empty command"),
        _ => bail!("unknown command `{}` (try `help`)", line.trim()),
    };
    Ok(cmd)
}

// `e2e4`, `e2-e4` or `e7e8q`.
fn parse_compact_move(word: &str) -> Result<Command> {
    let compact: String = word.chars().filter(|c| *c != '-').collect();
    if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
        bail!("unknown command `{word}` (try `help`)");
    }
    let (Ok(from), Ok(to)) = (
        compact[0..2].parse::<Position>(),
        compact[2..4].parse::<Position>(),
    ) else {
        bail!("unknown command `{word}` (try `help`)");
    };
    let promotion = match &compact[4..] {
        "" => None,
        p => Some(p.parse()?),
    };
    Ok(Command::Move {
        from,
        to,
        promotion,
    })
}

impl TryFrom<Commands> for Command {
    type Error = anyhow::Error;

    fn try_from(cmd: Commands) -> Result<Self> {
        Ok(match cmd {
            Commands::Play | Commands::Show => Command::Show,
            Commands::Moves { square } => Command::Moves(square.parse()?),
            Commands::Move { from, to } => parse_command(&format!("{from} {to}"))?,
            Commands::Promote { piece } => Command::Promote(piece.parse()?),
            Commands::Pgn => Command::Pgn,
            Commands::Restart => Command::Restart,
        })
    }
}

pub struct Session {
    game: Game,
    renderer: BoardRenderer,
    config: Config,
    config_path: Option<PathBuf>,
}

impl Session {
    pub fn new(game: Game, config: &Config) -> Self {
        let glyphs = if config.unicode {
            Glyphs::Unicode
        } else {
            Glyphs::Ascii
        };
        Session {
            game,
            renderer: BoardRenderer::new(glyphs, config.flip_board),
            config: config.clone(),
            config_path: None,
        }
    }

    /// Where view settings changed during play (the board flip) are written.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn save(&self) -> Result<()> {
        save::save(&self.game, &self.config.save_path)?;
        Ok(())
    }

    /// Runs one command and returns the text to show. Game errors (an illegal
    /// move, a missing promotion choice) come back as `Err` and leave the game
    /// unchanged.
    pub fn execute(&mut self, cmd: Command) -> Result<String> {
        let text = match cmd {
            Command::Move {
                from,
                to,
                promotion,
            } => {
                if let Some(kind) = promotion {
                    self.check_promotion_suffix(from, to, kind)?;
                }
                let mut outcome = self.game.play(from, to)?;
                if let (true, Some(kind)) = (outcome.promotion_pending, promotion) {
                    outcome = self.game.promote(kind)?;
                }
                self.after_change(&outcome)
            }
            Command::Promote(kind) => {
                let outcome = self.game.promote(kind)?;
                self.after_change(&outcome)
            }
            Command::Moves(square) => {
                let targets = self.game.legal_targets(square);
                if targets.is_empty() {
                    format!("no legal moves from {square}")
                } else {
                    let list: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
                    format!(
                        "{}{}: {}",
                        self.renderer.render_with_targets(self.game.board(), &targets),
                        square,
                        list.join(" ")
                    )
                }
            }
            Command::Show => self.board_and_status(),
            Command::Flip => {
                self.renderer.flipped = !self.renderer.flipped;
                self.config.flip_board = self.renderer.flipped;
                self.remember_view();
                self.board_and_status()
            }
            Command::Pgn => self.game.pgn(),
            Command::Restart => {
                self.game.restart();
                self.autosave_now();
                self.board_and_status()
            }
            Command::Save => {
                self.save()?;
                format!("saved to {}", self.config.save_path.display())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => "bye".to_string(),
        };
        Ok(text)
    }

    // A promotion letter is only accepted on a pawn move to the last rank, and
    // is checked before the move so a bad letter leaves the game untouched.
    fn check_promotion_suffix(&self, from: Position, to: Position, kind: PieceKind) -> Result<()> {
        if !kind.is_promotion_choice() {
            return Err(GameError::InvalidPromotion(kind).into());
        }
        if !rules::is_promotion(self.game.board(), from, to) {
            bail!("{from}{to} does not promote, drop the `{}`", kind.letter().to_ascii_lowercase());
        }
        Ok(())
    }

    fn after_change(&self, outcome: &MoveOutcome) -> String {
        self.autosave_now();
        let mut text = self.board_and_status();
        if let Some(kind) = outcome.mv.promotion {
            text.push_str(&format!("\n{} promoted to a {kind}", outcome.mv.to));
        }
        text
    }

    fn autosave_now(&self) {
        if !self.config.autosave {
            return;
        }
        if let Err(e) = self.save() {
            warn!("autosave to {} failed: {e:#}", self.config.save_path.display());
        }
    }

    fn remember_view(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save(path) {
            warn!("could not store the board orientation: {e:#}");
        }
    }

    pub fn board_and_status(&self) -> String {
        format!(
            "{}{}",
            self.renderer.render(self.game.board()),
            status_line(&self.game)
        )
    }
}

pub fn status_line(game: &Game) -> String {
    if let Phase::AwaitingPromotion { square, color, .. } = game.phase() {
        return format!("{color} pawn on {square} promotes: choose q, r, b or n");
    }
    match game.status() {
        GameStatus::InProgress => {
            let mut line = format!("Turn: {}", game.turn());
            if game.in_check() {
                line.push_str(" (in check)");
            }
            line
        }
        GameStatus::Checkmate { winner } => format!("Checkmate! {winner} wins!"),
        GameStatus::Stalemate => "Stalemate! It's a draw!".to_string(),
    }
}
