//! Tic-tac-toe engine with a three-tier computer opponent.
//!
//! The crate has two components:
//!
//! - [`GameState`]: the 3x3 board, the active player, and the
//!   running/terminal status, mutated only through [`GameState::apply_move`]
//!   and [`GameState::reset`].
//! - [`MoveSelector`]: chooses the computer's move for a [`Difficulty`]
//!   tier - uniform random (`Easy`), win/block/random (`Medium`), or
//!   exhaustive minimax (`Hard`).
//!
//! The selector never mutates the state; the caller applies its choice
//! back through `apply_move`, so every state change flows through one
//! audited path.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Difficulty, GameState, MoveSelector};
//!
//! let mut game = GameState::new();
//! let mut selector = MoveSelector::with_seed(7);
//!
//! // Human (X) takes the center, computer (O) replies.
//! game.apply_move(4)?;
//! let reply = selector.select(&game, Difficulty::Hard)?;
//! game.apply_move(reply)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod selector;
mod types;

pub use game::{GameConfig, GameState, MoveError};
pub use selector::{Difficulty, MoveSelector, ParseDifficultyError, SelectError};
pub use types::{Board, GameStatus, Mark, Square, WIN_LINES};
