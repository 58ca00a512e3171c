//! Computer move selection at three difficulty tiers.

use crate::game::GameState;
use crate::types::{Board, GameStatus, Mark, Square, WIN_LINES};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Difficulty tier for the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniform-random choice among legal moves.
    Easy,
    /// Win if possible, block if necessary, otherwise random.
    Medium,
    /// Exhaustive minimax; never loses.
    Hard,
}

/// Error for an unrecognized difficulty name.
///
/// Unrecognized values are a configuration error and must be surfaced,
/// never silently substituted.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized difficulty '{input}' (expected easy, medium, or hard)")]
pub struct ParseDifficultyError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError {
                input: s.to_string(),
            }),
        }
    }
}

/// Errors that can occur when selecting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SelectError {
    /// No legal move exists (full board or finished game).
    ///
    /// Callers treat this as "skip turn", never as a crash.
    #[display("No move available")]
    NoMoveAvailable,
}

/// Chooses the computer's move for a given game state and difficulty.
///
/// The selector reads the state but never mutates it; the caller applies
/// the returned cell through [`GameState::apply_move`], preserving a
/// single mutation path. The only state held between calls is the
/// random-number generator.
#[derive(Debug)]
pub struct MoveSelector {
    rng: StdRng,
}

impl MoveSelector {
    /// Creates a selector with an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a selector with a fixed seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selects a cell for the active player.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NoMoveAvailable`] when the game is over or
    /// no empty cell remains.
    #[instrument(skip(self, state), fields(player = %state.active_player()))]
    pub fn select(
        &mut self,
        state: &GameState,
        difficulty: Difficulty,
    ) -> Result<usize, SelectError> {
        if !state.status().is_in_progress() {
            return Err(SelectError::NoMoveAvailable);
        }

        let cell = match difficulty {
            Difficulty::Easy => self.random_move(state)?,
            Difficulty::Medium => self.heuristic_move(state)?,
            Difficulty::Hard => minimax_move(state)?,
        };

        debug!(cell, "Move selected");
        Ok(cell)
    }

    /// Uniform-random choice among the legal moves.
    fn random_move(&mut self, state: &GameState) -> Result<usize, SelectError> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(SelectError::NoMoveAvailable)
    }

    /// Win-then-block-then-random, one ply deep.
    fn heuristic_move(&mut self, state: &GameState) -> Result<usize, SelectError> {
        let computer = state.active_player();

        if let Some(cell) = line_completion(state.board(), computer) {
            debug!(cell, "Taking winning cell");
            return Ok(cell);
        }
        if let Some(cell) = line_completion(state.board(), computer.opponent()) {
            debug!(cell, "Blocking opponent");
            return Ok(cell);
        }

        self.random_move(state)
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the empty cell that completes a line holding two of `mark`.
///
/// Lines are scanned in [`WIN_LINES`] declaration order; ties between
/// simultaneous completions go to the first line declared.
fn line_completion(board: &Board, mark: Mark) -> Option<usize> {
    for line in WIN_LINES {
        let mut empty = None;
        let mut owned = 0;

        for cell in line {
            match board.get(cell) {
                Some(Square::Occupied(m)) if m == mark => owned += 1,
                Some(Square::Empty) => empty = Some(cell),
                _ => {}
            }
        }

        if owned == 2 && let Some(cell) = empty {
            return Some(cell);
        }
    }

    None
}

/// Picks the move with the greatest minimax value, breaking ties by the
/// lowest cell index.
fn minimax_move(state: &GameState) -> Result<usize, SelectError> {
    let computer = state.active_player();
    let mut best: Option<(usize, i32)> = None;

    for cell in state.legal_moves() {
        // Recursion works on a copy of the board, so the caller's state
        // is never touched.
        let mut board = *state.board();
        board.set(cell, Square::Occupied(computer));
        let score = minimax(&board, computer, computer.opponent());

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((cell, score));
        }
    }

    best.map(|(cell, _)| cell).ok_or(SelectError::NoMoveAvailable)
}

/// Exhaustively evaluates a position assuming perfect play by both sides.
///
/// Terminal values: computer win = +1, opponent win = -1, draw = 0. The
/// board bounds the recursion to at most 9 plies, so no depth cutoff is
/// needed.
fn minimax(board: &Board, computer: Mark, to_move: Mark) -> i32 {
    match board.status() {
        GameStatus::Won(mark) => {
            if mark == computer {
                1
            } else {
                -1
            }
        }
        GameStatus::Draw => 0,
        GameStatus::InProgress => {
            let maximizing = to_move == computer;
            let mut best = if maximizing { i32::MIN } else { i32::MAX };

            for cell in board.empty_cells() {
                let mut next = *board;
                next.set(cell, Square::Occupied(to_move));
                let score = minimax(&next, computer, to_move.opponent());
                best = if maximizing {
                    best.max(score)
                } else {
                    best.min(score)
                };
            }

            best
        }
    }
}
