use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rchess", version, about = "Two-player chess in the terminal")]
pub struct Cli {
    /// YAML config file (overrides RCHESS_CONFIG_PATH).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Play interactively (the default).
    Play,
    /// Print the saved board and whose turn it is.
    Show,
    /// List the legal targets of the piece on a square.
    Moves { square: String },
    /// Make a move on the saved game, e.g. `move e2 e4`.
    Move { from: String, to: String },
    /// Choose the piece for a pending promotion (q, r, b or n).
    Promote { piece: String },
    /// Print the game as PGN movetext.
    Pgn,
    /// Start over from the initial position.
    Restart,
}
