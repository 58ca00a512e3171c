//! Command-line interface for the terminal play loop.

use clap::Parser;

/// Play tic-tac-toe against the computer in the terminal.
#[derive(Parser, Debug)]
#[command(name = "tictactoe_engine")]
#[command(about = "Tic-tac-toe with a three-tier computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Computer difficulty: easy, medium, or hard
    #[arg(short, long, default_value = "medium")]
    pub difficulty: String,

    /// Seed for the computer's random choices (reproducible games)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Let the computer play X and move first
    #[arg(long)]
    pub computer_first: bool,

    /// Pre-seed the first mover's opening on this cell (0-8)
    #[arg(long)]
    pub opening: Option<usize>,
}
