//! Game state machine: move validation, status evaluation, reset.

use crate::types::{Board, GameStatus, Mark, Square};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Errors that can occur when applying a move.
///
/// All variants are locally recoverable: the state is left untouched and
/// the caller may simply ignore the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Cell index is outside 0-8.
    #[display("Cell {index} is out of bounds (must be 0-8)")]
    OutOfBounds {
        /// The rejected index.
        index: usize,
    },
    /// Cell is already occupied.
    #[display("Cell {index} is already occupied")]
    Occupied {
        /// The rejected index.
        index: usize,
    },
    /// Game has already ended.
    #[display("Game is already over")]
    GameOver,
}

/// Initial-position configuration for a game.
///
/// The default starts with an empty board and X to move. An opening move
/// may be pre-seeded: the cell is occupied by the starting mark and the
/// opponent becomes the active player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mark that moves first.
    starting_mark: Mark,
    /// Optional pre-seeded opening cell, played by the starting mark.
    opening_move: Option<usize>,
}

impl GameConfig {
    /// Creates a configuration with the given starting mark and no opening.
    pub fn new(starting_mark: Mark) -> Self {
        Self {
            starting_mark,
            opening_move: None,
        }
    }

    /// Pre-seeds an opening move for the starting mark.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::OutOfBounds` if the cell is not in 0-8.
    pub fn with_opening(mut self, cell: usize) -> Result<Self, MoveError> {
        if cell >= 9 {
            return Err(MoveError::OutOfBounds { index: cell });
        }
        self.opening_move = Some(cell);
        Ok(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

/// Complete game state.
///
/// Owns the board, the active player, and the running/terminal status.
/// Every mutation goes through [`GameState::apply_move`] or
/// [`GameState::reset`], so the state can only change along the
/// `InProgress -> {InProgress, Won, Draw}` machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    active_player: Mark,
    status: GameStatus,
    history: Vec<usize>,
    config: GameConfig,
}

impl GameState {
    /// Creates a new game with the default configuration (X to move,
    /// empty board).
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active_player: Mark::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
            config: GameConfig::default(),
        }
    }

    /// Creates a new game from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::OutOfBounds` if the configured opening cell is
    /// not in 0-8.
    #[instrument]
    pub fn with_config(config: GameConfig) -> Result<Self, MoveError> {
        let mut state = Self {
            board: Board::new(),
            active_player: config.starting_mark,
            status: GameStatus::InProgress,
            history: Vec::new(),
            config,
        };
        state.seed_opening()?;
        Ok(state)
    }

    fn seed_opening(&mut self) -> Result<(), MoveError> {
        if let Some(cell) = self.config.opening_move {
            if cell >= 9 {
                return Err(MoveError::OutOfBounds { index: cell });
            }
            self.board
                .set(cell, Square::Occupied(self.config.starting_mark));
            self.history.push(cell);
            self.active_player = self.config.starting_mark.opponent();
        }
        Ok(())
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that moves next.
    pub fn active_player(&self) -> Mark {
        self.active_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the cells played since the last reset, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns the configuration the game was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Indices of empty cells, in ascending order. An empty sequence
    /// signals a full board.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.board.empty_cells()
    }

    /// Re-evaluates the board without mutating anything.
    ///
    /// Win-lines are scanned in declaration order; a full board with no
    /// winning line is a draw.
    pub fn evaluate(&self) -> GameStatus {
        self.board.status()
    }

    /// Applies the active player's mark to the given cell.
    ///
    /// On success the status is re-evaluated and, only while the game
    /// remains in progress, the active player flips to the other mark.
    /// Returns the status after the move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] when the cell is out of range, occupied, or
    /// the game has already ended. The state is left byte-for-byte
    /// unchanged on error.
    #[instrument(skip(self), fields(player = %self.active_player))]
    pub fn apply_move(&mut self, cell: usize) -> Result<GameStatus, MoveError> {
        if !self.status.is_in_progress() {
            return Err(MoveError::GameOver);
        }
        if cell >= 9 {
            return Err(MoveError::OutOfBounds { index: cell });
        }
        if !self.board.is_empty_cell(cell) {
            return Err(MoveError::Occupied { index: cell });
        }

        self.board.set(cell, Square::Occupied(self.active_player));
        self.history.push(cell);

        self.status = self.board.status();
        if self.status.is_in_progress() {
            self.active_player = self.active_player.opponent();
        }

        debug!(cell, status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Reinitializes the game from its configuration and returns the
    /// fresh `InProgress` status.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> GameStatus {
        self.board = Board::new();
        self.active_player = self.config.starting_mark;
        self.status = GameStatus::InProgress;
        self.history.clear();
        // Config was validated at construction, reseeding cannot fail.
        let _ = self.seed_opening();
        debug!("Game reset");
        self.status
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
