use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PATH: &str = "rchess.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the game is saved between sessions.
    pub save_path: PathBuf,
    /// Chess symbols instead of FEN letters.
    pub unicode: bool,
    /// Draw the board from black's side.
    pub flip_board: bool,
    /// Save after every accepted command.
    pub autosave: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("rchess-save.json"),
            unicode: true,
            flip_board: false,
            autosave: true,
        }
    }
}

impl Config {
    /// Defaults, overridden by the YAML file at `path` when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => {
                let content = fs::read_to_string(p)
                    .with_context(|| format!("failed to read config {}", p.display()))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("failed to parse config {}", p.display()))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Writes the whole config back as YAML, replacing the file at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))
    }
}
