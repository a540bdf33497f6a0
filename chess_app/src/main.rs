mod cli;
mod config;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use rchess::game::save;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::session::{parse_command, Command, Session};

fn main() -> Result<()> {
    // Initialize logger
    let env = Env::default().filter_or("RCHESS_LOG_LEVEL", "info");
    env_logger::Builder::from_env(env).init();

    let cli = Cli::parse();
    let cfg_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("RCHESS_CONFIG_PATH").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH));
    let cfg = Config::load(Some(cfg_path.as_path()))?;

    let game = save::load_or_new(&cfg.save_path)
        .with_context(|| format!("failed to load {}", cfg.save_path.display()))?;
    info!("using save file {}", cfg.save_path.display());
    let mut session = Session::new(game, &cfg).with_config_path(cfg_path);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_interactive(&mut session),
        other => {
            let cmd = Command::try_from(other)?;
            println!("{}", session.execute(cmd)?);
            session.save()
        }
    }
}

fn run_interactive(session: &mut Session) -> Result<()> {
    println!("{}", session.board_and_status());
    println!("type `help` for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match session.execute(cmd) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                debug!("rejected `{line}`: {e:#}");
                println!("{e}");
            }
        }
        if cmd == Command::Quit {
            break;
        }
    }
    info!("leaving after {} moves", session.game().history().len());
    session.save()
}
