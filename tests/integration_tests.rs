//! Integration tests for the turn loop

use tile_merge::core::SimpleRng;
use tile_merge::engine::{Game, GameConfig, GameError, Phase};
use tile_merge::types::Direction;

const POLICY: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

/// Play one turn with the first direction that moves. None when nothing moves.
fn play_turn<R: tile_merge::core::RandomSource + 'static>(
    game: &mut Game<R>,
) -> Option<tile_merge::engine::TurnOutcome> {
    for dir in POLICY {
        let turn = game.submit(dir).unwrap();
        if turn.moved() {
            return Some(turn);
        }
    }
    None
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(GameConfig::default(), SimpleRng::new(12345)).unwrap();
    assert_eq!(game.phase(), Some(Phase::AwaitInput));
    assert_eq!(game.board().empty_count(), 14);
    assert!(game.last_turn().is_none());

    let mut turns = 0;
    while !game.is_game_over() {
        assert!(play_turn(&mut game).is_some(), "stuck before game over");
        turns += 1;
        assert!(turns < 10_000, "game did not terminate");
    }

    assert_eq!(game.phase(), Some(Phase::GameOver));
    assert!(!game.board().has_moves());
    assert!(matches!(
        game.submit(Direction::Left),
        Err(GameError::GameOver)
    ));
}

#[test]
fn test_turn_invariants() {
    let mut game = Game::new(GameConfig::default(), SimpleRng::new(777)).unwrap();

    while !game.is_game_over() {
        let score_before = game.score();
        let total_before = game.board().total_value();

        let turn = play_turn(&mut game).expect("a move exists until game over");

        // Merges conserve value; only the spawned tile adds to the board.
        let spawned = turn.spawned.expect("a moving turn always frees a cell");
        assert_eq!(game.board().total_value(), total_before + spawned.value);
        assert_eq!(game.board().get(spawned.x, spawned.y).unwrap().value, spawned.value);

        let swept: u32 = turn.sweeps.iter().map(|s| s.score).sum();
        assert_eq!(turn.score, swept);
        assert_eq!(game.score(), score_before + turn.score);

        assert!(game.board().cells().iter().all(|cell| !cell.locked));
        assert_eq!(turn.game_over, game.is_game_over());
    }
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    };
    let mut a = Game::from_config(config.clone()).unwrap();
    let mut b = Game::from_config(config).unwrap();
    assert_eq!(a.board(), b.board());

    for _ in 0..50 {
        if a.is_game_over() {
            break;
        }
        let ta = play_turn(&mut a);
        let tb = play_turn(&mut b);
        assert_eq!(ta, tb);
        assert_eq!(a.board(), b.board());
    }
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_snapshot_reflects_last_turn() {
    let mut game = Game::new(GameConfig::default(), SimpleRng::new(5)).unwrap();
    let turn = play_turn(&mut game).unwrap();

    let snap = game.snapshot();
    assert_eq!(snap.values, game.board().to_values());
    assert_eq!(snap.score_delta, turn.score);
    assert_eq!(snap.score, game.score());
    assert_eq!(
        snap.moves.as_slice(),
        turn.sweeps.last().unwrap().moves.as_slice()
    );
    assert!(!snap.game_over);
}

#[test]
fn test_pause_blocks_input_until_resume() {
    let mut game = Game::new(GameConfig::default(), SimpleRng::new(9)).unwrap();

    game.pause().unwrap();
    assert_eq!(game.phase(), Some(Phase::Paused));
    assert!(matches!(game.submit(Direction::Left), Err(GameError::Paused)));

    game.resume().unwrap();
    assert_eq!(game.phase(), Some(Phase::AwaitInput));
    assert!(play_turn(&mut game).is_some());
}

#[test]
fn test_restart_while_paused() {
    let mut game = Game::new(GameConfig::default(), SimpleRng::new(11)).unwrap();
    play_turn(&mut game).unwrap();
    game.pause().unwrap();

    game.restart().unwrap();
    assert_eq!(game.phase(), Some(Phase::AwaitInput));
    assert_eq!(game.score(), 0);
    assert_eq!(game.board().empty_count(), 14);
    assert!(game.last_turn().is_none());
}
