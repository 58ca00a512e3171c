//! Terminal adapter for the tic-tac-toe engine.
//!
//! A thin I/O loop: it reads cell indices from stdin, applies them through
//! the engine, and asks the selector for the computer's replies. No game
//! logic lives here.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::io::{self, BufRead, Write};
use tictactoe_engine::{
    Difficulty, GameConfig, GameState, GameStatus, Mark, MoveError, MoveSelector, SelectError,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Fail fast on a bad difficulty instead of substituting a default.
    let difficulty: Difficulty = cli
        .difficulty
        .parse()
        .context("Invalid --difficulty value")?;

    let computer = if cli.computer_first { Mark::X } else { Mark::O };
    let human = computer.opponent();

    let mut config = GameConfig::new(Mark::X);
    if let Some(cell) = cli.opening {
        config = config
            .with_opening(cell)
            .context("Invalid --opening cell")?;
    }
    let mut game = GameState::with_config(config).context("Invalid game configuration")?;

    let mut selector = match cli.seed {
        Some(seed) => MoveSelector::with_seed(seed),
        None => MoveSelector::new(),
    };

    info!(%difficulty, %human, %computer, "Starting game");
    println!("You are {human}. Computer ({computer}) plays {difficulty}.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        // Computer moves whenever it is the active player.
        while game.status().is_in_progress() && game.active_player() == computer {
            match selector.select(&game, difficulty) {
                Ok(cell) => {
                    game.apply_move(cell)
                        .context("Selector returned an unplayable cell")?;
                    println!("Computer plays {cell}.");
                }
                Err(SelectError::NoMoveAvailable) => {
                    warn!("No move available, skipping computer turn");
                    break;
                }
            }
        }

        println!("{}", game.board().display());

        match game.status() {
            GameStatus::InProgress => {}
            GameStatus::Won(mark) => {
                println!("{mark} wins!");
                if !prompt_restart(&mut lines, &mut game)? {
                    return Ok(());
                }
                continue;
            }
            GameStatus::Draw => {
                println!("Draw!");
                if !prompt_restart(&mut lines, &mut game)? {
                    return Ok(());
                }
                continue;
            }
        }

        print!("Your move (0-8): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Failed to read from stdin")?;

        let cell: usize = match line.trim().parse() {
            Ok(cell) => cell,
            Err(_) => {
                println!("Enter a cell index from 0 to 8.");
                continue;
            }
        };

        match game.apply_move(cell) {
            Ok(_) => {}
            Err(err @ (MoveError::OutOfBounds { .. } | MoveError::Occupied { .. })) => {
                println!("{err}");
            }
            Err(MoveError::GameOver) => {
                println!("Game is over; restart to keep playing.");
            }
        }
    }
}

/// Offers a restart after a finished game; returns false to quit.
fn prompt_restart(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    game: &mut GameState,
) -> Result<bool> {
    print!("Play again? (y/n): ");
    io::stdout().flush()?;

    let Some(line) = lines.next() else {
        return Ok(false);
    };
    let line = line.context("Failed to read from stdin")?;

    if line.trim().eq_ignore_ascii_case("y") {
        game.reset();
        Ok(true)
    } else {
        Ok(false)
    }
}
