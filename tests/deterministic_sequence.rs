use std::collections::HashSet;

use wrap_snake::config::GameConfig;
use wrap_snake::game::{EndReason, GameEngine, GameStatus, TickOutcome};
use wrap_snake::grid::{Cell, Position};
use wrap_snake::input::Direction;
use wrap_snake::leaderboard::{Leaderboard, MemoryLeaderboard, ScoreEntry};
use wrap_snake::snake::Snake;

fn body(engine: &GameEngine) -> Vec<Position> {
    engine.snake().segments().copied().collect()
}

fn classic_game() -> GameEngine {
    GameEngine::new_with_seed(GameConfig::default(), 42).expect("default config should build")
}

#[test]
fn plain_tick_slides_the_body_forward() {
    let mut engine = classic_game();
    assert_eq!(
        body(&engine),
        vec![
            Position::new(8, 10),
            Position::new(9, 10),
            Position::new(10, 10)
        ]
    );
    engine
        .place_food(Position::new(0, 0))
        .expect("corner is free at start");

    assert_eq!(engine.tick(), Ok(TickOutcome::Moved));

    assert_eq!(
        body(&engine),
        vec![
            Position::new(9, 10),
            Position::new(10, 10),
            Position::new(11, 10)
        ]
    );
    assert_eq!(engine.grid().get(Position::new(8, 10)), Ok(Cell::Empty));
    assert_eq!(engine.score(), 0);
}

#[test]
fn eating_food_grows_and_respawns_elsewhere() {
    let mut engine = classic_game();
    engine
        .place_food(Position::new(11, 10))
        .expect("cell ahead is free");

    let outcome = engine.tick().expect("tick should succeed");

    assert_eq!(
        body(&engine),
        vec![
            Position::new(8, 10),
            Position::new(9, 10),
            Position::new(10, 10),
            Position::new(11, 10)
        ]
    );
    assert_eq!(engine.score(), 10);

    let TickOutcome::Ate { food } = outcome else {
        panic!("expected the snake to eat, got {outcome:?}");
    };
    assert_eq!(engine.food(), Some(food));
    assert!(!engine.snake().occupies(food));
    assert_eq!(engine.grid().count(Cell::Food), 1);
}

#[test]
fn hitting_the_body_ends_the_game_and_freezes_it() {
    let mut engine = GameEngine::new_with_seed(GameConfig::with_board_size(6), 3)
        .expect("valid config should build");
    engine
        .set_snake(Snake::from_segments(
            vec![
                Position::new(3, 2),
                Position::new(3, 3),
                Position::new(2, 3),
                Position::new(1, 3),
                Position::new(1, 2),
                Position::new(2, 2),
            ],
            Direction::Left,
        ))
        .expect("snake fits");
    let score_before = engine.score();

    assert_eq!(
        engine.tick(),
        Ok(TickOutcome::Ended(EndReason::SelfCollision))
    );
    assert_eq!(engine.status(), GameStatus::GameOver);
    assert_eq!(engine.score(), score_before);

    let frozen = engine.snapshot();
    for _ in 0..5 {
        assert_eq!(engine.tick(), Ok(TickOutcome::Idle));
    }
    assert_eq!(engine.snapshot(), frozen);

    engine.restart().expect("restart should succeed");
    assert_eq!(engine.status(), GameStatus::Running);
}

#[test]
fn reversal_request_keeps_moving_right() {
    let mut engine = classic_game();
    engine
        .place_food(Position::new(0, 0))
        .expect("corner is free at start");

    engine.set_direction(Direction::Left);
    engine.tick().expect("tick should succeed");

    assert_eq!(engine.snake().head(), Position::new(11, 10));
    assert_eq!(engine.snake().direction(), Direction::Right);
}

#[test]
fn snake_wraps_around_the_board() {
    let mut engine = classic_game();
    engine
        .place_food(Position::new(5, 0))
        .expect("cell is free at start");

    // From x = 10 it takes ten ticks to leave the right edge and reappear at x = 0.
    for _ in 0..10 {
        engine.tick().expect("tick should succeed");
    }

    assert_eq!(engine.snake().head(), Position::new(0, 10));
    assert_eq!(engine.status(), GameStatus::Running);

    engine.set_direction(Direction::Up);
    for _ in 0..11 {
        engine.tick().expect("tick should succeed");
    }
    assert_eq!(engine.snake().head(), Position::new(0, 19));
}

#[test]
fn restart_is_idempotent_from_any_state() {
    let mut engine = classic_game();
    engine.restart().expect("restart should succeed");
    let fresh_body = body(&engine);

    engine
        .place_food(Position::new(11, 10))
        .expect("cell ahead is free");
    engine.tick().expect("tick should succeed");
    engine.set_direction(Direction::Down);

    for _ in 0..2 {
        engine.restart().expect("restart should succeed");
        assert_eq!(body(&engine), fresh_body);
        assert_eq!(engine.snake().direction(), Direction::Right);
        assert_eq!(engine.snake().pending_direction(), None);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.grid().count(Cell::Food), 1);
        assert_eq!(engine.grid().count(Cell::SnakeBody), 3);
    }
}

#[test]
fn long_seeded_run_keeps_board_invariants() {
    let mut engine = GameEngine::new_with_seed(GameConfig::with_board_size(10), 7)
        .expect("valid config should build");
    let turns = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    for step in 0..2_000_usize {
        if step % 7 == 0 {
            engine.set_direction(turns[(step / 7) % turns.len()]);
        }
        let length_before = engine.snake().len();
        let score_before = engine.score();

        match engine.tick().expect("tick should succeed") {
            TickOutcome::Moved => {
                assert_eq!(engine.snake().len(), length_before);
                assert_eq!(engine.score(), score_before);
            }
            TickOutcome::Ate { .. } => {
                assert_eq!(engine.snake().len(), length_before + 1);
                assert_eq!(engine.score(), score_before + 10);
            }
            TickOutcome::Ended(_) => {
                assert_eq!(engine.score(), score_before);
                engine.restart().expect("restart should succeed");
                continue;
            }
            TickOutcome::Idle => unreachable!("running game never idles"),
        }

        let segments = body(&engine);
        let distinct: HashSet<Position> = segments.iter().copied().collect();
        assert_eq!(distinct.len(), segments.len());
        assert_eq!(engine.grid().count(Cell::SnakeBody), segments.len());
        assert_eq!(engine.grid().count(Cell::Food), 1);
        let food = engine.food().expect("running game has food");
        assert!(!engine.snake().occupies(food));
    }
}

#[test]
fn leaderboard_keeps_the_best_five() {
    let mut board = MemoryLeaderboard::default();

    board.save_score("A", 50).expect("save should succeed");
    board.save_score("B", 90).expect("save should succeed");
    assert_eq!(
        board.load_top_scores(),
        vec![ScoreEntry::new("B", 90), ScoreEntry::new("A", 50)]
    );

    for (name, score) in [("C", 10), ("D", 70), ("E", 30), ("F", 60)] {
        board.save_score(name, score).expect("save should succeed");
    }

    let names: Vec<String> = board
        .load_top_scores()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["B", "D", "F", "A", "E"]);
}
