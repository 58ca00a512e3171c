//! Tests for the computer move selector across all three difficulties.

use strum::IntoEnumIterator;
use tictactoe_engine::{Difficulty, GameState, GameStatus, Mark, MoveSelector, SelectError};

/// Plays a sequence of cells, panicking on any rejected move.
fn play(game: &mut GameState, cells: &[usize]) {
    for &cell in cells {
        game.apply_move(cell)
            .unwrap_or_else(|err| panic!("Move {cell} rejected: {err}"));
    }
}

/// Plays a full game between two selectors, X moving first.
fn play_out(
    x: &mut MoveSelector,
    x_level: Difficulty,
    o: &mut MoveSelector,
    o_level: Difficulty,
) -> GameStatus {
    let mut game = GameState::new();

    while game.status().is_in_progress() {
        let (selector, level) = match game.active_player() {
            Mark::X => (&mut *x, x_level),
            Mark::O => (&mut *o, o_level),
        };
        let cell = selector.select(&game, level).expect("Game still running");
        game.apply_move(cell).expect("Selected cell must be legal");
    }

    game.status()
}

// ─── Easy ────────────────────────────────────────────────────

#[test]
fn test_easy_picks_a_legal_move() {
    let mut game = GameState::new();
    play(&mut game, &[4, 0, 8]);

    let mut selector = MoveSelector::with_seed(42);
    for _ in 0..50 {
        let cell = selector.select(&game, Difficulty::Easy).unwrap();
        assert!(game.legal_moves().contains(&cell));
    }
}

#[test]
fn test_easy_is_deterministic_under_a_fixed_seed() {
    let mut game = GameState::new();
    play(&mut game, &[4]);

    let mut a = MoveSelector::with_seed(7);
    let mut b = MoveSelector::with_seed(7);

    for _ in 0..20 {
        assert_eq!(
            a.select(&game, Difficulty::Easy),
            b.select(&game, Difficulty::Easy)
        );
    }
}

#[test]
fn test_selection_on_terminal_state_is_no_move_available() {
    let mut game = GameState::new();
    play(&mut game, &[0, 3, 1, 4, 2]);
    assert_eq!(game.status(), GameStatus::Won(Mark::X));

    let mut selector = MoveSelector::with_seed(0);
    for level in Difficulty::iter() {
        assert_eq!(
            selector.select(&game, level),
            Err(SelectError::NoMoveAvailable),
            "{level} must skip the turn on a finished game"
        );
    }
}

#[test]
fn test_selection_on_drawn_board_is_no_move_available() {
    let mut game = GameState::new();
    play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(game.status(), GameStatus::Draw);

    let mut selector = MoveSelector::with_seed(0);
    assert_eq!(
        selector.select(&game, Difficulty::Easy),
        Err(SelectError::NoMoveAvailable)
    );
}

// ─── Medium ──────────────────────────────────────────────────

#[test]
fn test_medium_takes_an_immediate_win() {
    let mut game = GameState::new();
    // X: 0, 1, 8 / O: 3, 4 - O to move, wins the middle row at 5.
    play(&mut game, &[0, 3, 1, 4, 8]);
    assert_eq!(game.active_player(), Mark::O);

    let mut selector = MoveSelector::with_seed(0);
    assert_eq!(selector.select(&game, Difficulty::Medium), Ok(5));
}

#[test]
fn test_medium_prefers_winning_over_blocking() {
    let mut game = GameState::new();
    // Same position: X threatens the top row at 2, but O's win at 5 comes
    // first in the priority order.
    play(&mut game, &[0, 3, 1, 4, 8]);

    for seed in 0..10 {
        let mut selector = MoveSelector::with_seed(seed);
        assert_eq!(selector.select(&game, Difficulty::Medium), Ok(5));
    }
}

#[test]
fn test_medium_blocks_the_opponent() {
    let mut game = GameState::new();
    // X: 0, 1 threatening the top row at 2 / O: 4 - O must block.
    play(&mut game, &[0, 4, 1]);
    assert_eq!(game.active_player(), Mark::O);

    for seed in 0..10 {
        let mut selector = MoveSelector::with_seed(seed);
        assert_eq!(selector.select(&game, Difficulty::Medium), Ok(2));
    }
}

#[test]
fn test_medium_blocks_a_diagonal_threat() {
    let mut game = GameState::new();
    // X: 0, 4 threatening the diagonal at 8 / O: 1.
    play(&mut game, &[0, 1, 4]);

    let mut selector = MoveSelector::with_seed(0);
    assert_eq!(selector.select(&game, Difficulty::Medium), Ok(8));
}

#[test]
fn test_medium_falls_back_to_random_legal_move() {
    let mut game = GameState::new();
    // No two-in-line for either side.
    play(&mut game, &[4]);

    let mut selector = MoveSelector::with_seed(3);
    let cell = selector.select(&game, Difficulty::Medium).unwrap();
    assert!(game.legal_moves().contains(&cell));
}

#[test]
fn test_medium_games_always_terminate() {
    for seed in 0..20 {
        let mut medium = MoveSelector::with_seed(seed);
        let mut easy = MoveSelector::with_seed(seed.wrapping_add(1000));
        let status = play_out(&mut medium, Difficulty::Medium, &mut easy, Difficulty::Easy);
        assert!(!status.is_in_progress());
    }
}

// ─── Hard ────────────────────────────────────────────────────

#[test]
fn test_hard_opening_move_is_deterministic() {
    // Every opening move draws under perfect play, so the tie-break picks
    // the lowest cell.
    let game = GameState::new();
    let mut selector = MoveSelector::with_seed(0);
    assert_eq!(selector.select(&game, Difficulty::Hard), Ok(0));
}

#[test]
fn test_hard_takes_an_immediate_win() {
    let mut game = GameState::new();
    // X: 0, 1, 8 / O: 3, 4 - O to move.
    play(&mut game, &[0, 3, 1, 4, 8]);

    let mut selector = MoveSelector::with_seed(0);
    assert_eq!(selector.select(&game, Difficulty::Hard), Ok(5));
}

#[test]
fn test_hard_blocks_the_only_saving_cell() {
    let mut game = GameState::new();
    // X: 0, 1 threatening the top row / O: 4. Blocking at 2 is the only
    // move that holds the draw; everything else loses outright.
    play(&mut game, &[0, 4, 1]);

    let mut selector = MoveSelector::with_seed(0);
    assert_eq!(selector.select(&game, Difficulty::Hard), Ok(2));
}

#[test]
fn test_hard_breaks_ties_by_lowest_index() {
    let mut game = GameState::new();
    // X: 0, 1, 3 / O: 5, 7, 8 - X to move with immediate wins at both
    // 2 (top row) and 6 (left column); the lower index wins the tie.
    play(&mut game, &[0, 5, 1, 7, 3, 8]);
    assert_eq!(game.active_player(), Mark::X);

    let mut selector = MoveSelector::with_seed(0);
    assert_eq!(selector.select(&game, Difficulty::Hard), Ok(2));
}

#[test]
fn test_hard_versus_hard_always_draws() {
    let mut x = MoveSelector::with_seed(0);
    let mut o = MoveSelector::with_seed(1);
    let status = play_out(&mut x, Difficulty::Hard, &mut o, Difficulty::Hard);
    assert_eq!(status, GameStatus::Draw);
}

#[test]
fn test_hard_never_loses_to_easy() {
    for seed in 0..30 {
        let mut easy = MoveSelector::with_seed(seed);
        let mut hard = MoveSelector::with_seed(0);
        let status = play_out(&mut easy, Difficulty::Easy, &mut hard, Difficulty::Hard);
        assert_ne!(
            status,
            GameStatus::Won(Mark::X),
            "Hard (O) lost to Easy with seed {seed}"
        );
    }
}

#[test]
fn test_hard_never_loses_to_medium() {
    for seed in 0..30 {
        let mut hard = MoveSelector::with_seed(0);
        let mut medium = MoveSelector::with_seed(seed);
        let status = play_out(&mut hard, Difficulty::Hard, &mut medium, Difficulty::Medium);
        assert_ne!(
            status,
            GameStatus::Won(Mark::O),
            "Hard (X) lost to Medium with seed {seed}"
        );
    }
}

#[test]
fn test_replay_with_same_seeds_reproduces_the_game() {
    let run = || {
        let mut game = GameState::new();
        let mut x = MoveSelector::with_seed(99);
        let mut o = MoveSelector::with_seed(7);

        while game.status().is_in_progress() {
            let cell = match game.active_player() {
                Mark::X => x.select(&game, Difficulty::Easy).unwrap(),
                Mark::O => o.select(&game, Difficulty::Medium).unwrap(),
            };
            game.apply_move(cell).expect("Selected cell must be legal");
        }
        game
    };

    assert_eq!(run(), run());
}

// ─── Difficulty parsing ──────────────────────────────────────

#[test]
fn test_difficulty_parses_case_insensitively() {
    assert_eq!("easy".parse(), Ok(Difficulty::Easy));
    assert_eq!("MEDIUM".parse(), Ok(Difficulty::Medium));
    assert_eq!(" Hard ".parse(), Ok(Difficulty::Hard));
}

#[test]
fn test_unrecognized_difficulty_fails_fast() {
    let err = "brutal".parse::<Difficulty>().unwrap_err();
    assert_eq!(err.input, "brutal");
    assert!(err.to_string().contains("brutal"));
}
