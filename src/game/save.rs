//! JSON persistence of a whole game: board, side to move, history,
//! notation, a pending promotion and the status.

use std::fs;
use std::path::Path;

use log::debug;

use crate::game::error::GameResult;
use crate::game::state::Game;

pub fn to_json(game: &Game) -> GameResult<String> {
    Ok(serde_json::to_string_pretty(game)?)
}

pub fn from_json(json: &str) -> GameResult<Game> {
    Ok(serde_json::from_str(json)?)
}

pub fn save(game: &Game, path: &Path) -> GameResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(game)?)?;
    debug!("saved game to {}", path.display());
    Ok(())
}

pub fn load(path: &Path) -> GameResult<Game> {
    let content = fs::read_to_string(path)?;
    let game = from_json(&content)?;
    debug!("loaded game from {}", path.display());
    Ok(game)
}

/// Loads `path`, or starts a new game when there is no save yet.
pub fn load_or_new(path: &Path) -> GameResult<Game> {
    if path.exists() {
        load(path)
    } else {
        Ok(Game::new())
    }
}
