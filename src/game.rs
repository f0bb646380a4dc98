use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{CollisionPolicy, ConfigError, GameConfig};
use crate::food::{FoodSpawner, SpawnError};
use crate::grid::{Cell, Grid, GridError, Position};
use crate::input::Direction;
use crate::snake::{Snake, TurnRequest};

/// Direction every fresh snake starts moving in.
pub const START_DIRECTION: Direction = Direction::Right;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    /// The head ran into the body. A loss.
    SelfCollision,
    /// The body fills every cell and no food can be placed. A win.
    BoardFull,
}

impl EndReason {
    #[must_use]
    pub fn is_win(self) -> bool {
        matches!(self, Self::BoardFull)
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is over; nothing happened.
    Idle,
    /// The snake moved one cell without growing.
    Moved,
    /// The snake ate and grew; new food sits at `food`.
    Ate { food: Position },
    /// This tick ended the game.
    Ended(EndReason),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("cell ({}, {}) is already occupied", .0.x, .0.y)]
    CellOccupied(Position),
    #[error("snake body must be non-empty, on the board and free of repeated cells")]
    InvalidSnake,
}

/// Read-only view of the engine, sufficient for rendering.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameSnapshot {
    pub board_size: u16,
    /// Row-major cell states, `board_size * board_size` long.
    pub cells: Vec<Cell>,
    pub score: u32,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub snake_length: usize,
    pub head: Position,
    pub direction: Direction,
    pub tick_count: u64,
}

impl GameSnapshot {
    /// Returns the cell at `position`, or `None` off the board.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        if !position.is_within_bounds(self.board_size) {
            return None;
        }
        let side = usize::from(self.board_size);
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.cells.get(y * side + x).copied()
    }
}

/// Sole owner of the board, the snake, the food and the score.
///
/// Has no timer of its own: an external scheduler calls [`GameEngine::tick`] at a fixed
/// interval and forwards direction requests in between.
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    status: GameStatus,
    end_reason: Option<EndReason>,
    tick_count: u64,
    spawner: FoodSpawner<R>,
}

impl GameEngine<StdRng> {
    /// Creates an engine whose food placement is seeded from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_spawner(config, FoodSpawner::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible sessions.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_spawner(config, FoodSpawner::seeded(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Creates a running game with a fresh centred snake and one food cell.
    pub fn with_spawner(
        config: GameConfig,
        mut spawner: FoodSpawner<R>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let (grid, snake, food) = initial_board(&config, &mut spawner)?;

        info!(
            board_size = config.board_size,
            initial_length = config.initial_length,
            "game started"
        );

        Ok(Self {
            config,
            grid,
            snake,
            food: Some(food),
            score: 0,
            status: GameStatus::Running,
            end_reason: None,
            tick_count: 0,
            spawner,
        })
    }

    /// Advances the simulation by one step.
    ///
    /// Self-collision and a full board end the game through the returned outcome; an `Err`
    /// only signals a broken internal grid invariant.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.status != GameStatus::Running {
            return Ok(TickOutcome::Idle);
        }

        self.tick_count += 1;
        let next = self.snake.advance(self.config.board_size);

        if self.collides(next)? {
            return Ok(self.finish(EndReason::SelfCollision));
        }

        if self.food == Some(next) {
            return self.eat(next);
        }

        if let Some(vacated) = self.snake.move_to(next) {
            self.grid.set(vacated, Cell::Empty)?;
        }
        self.grid.set(next, Cell::SnakeBody)?;

        debug!(tick = self.tick_count, x = next.x, y = next.y, "snake moved");
        Ok(TickOutcome::Moved)
    }

    /// Queues a turn for the next tick. Ignored once the game is over.
    pub fn set_direction(&mut self, requested: Direction) -> Option<TurnRequest> {
        if self.status != GameStatus::Running {
            return None;
        }

        let request = self.snake.request_direction(requested);
        debug!(?requested, ?request, "direction requested");
        Some(request)
    }

    /// Rebuilds board, snake and food from initial conditions and resets the score.
    ///
    /// Valid from any state. The food spawner keeps its random stream.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let (grid, snake, food) = initial_board(&self.config, &mut self.spawner)?;

        self.grid = grid;
        self.snake = snake;
        self.food = Some(food);
        self.score = 0;
        self.status = GameStatus::Running;
        self.end_reason = None;
        self.tick_count = 0;

        info!("game restarted");
        Ok(())
    }

    /// Captures everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board_size: self.config.board_size,
            cells: self.grid.cells().to_vec(),
            score: self.score,
            status: self.status,
            end_reason: self.end_reason,
            snake_length: self.snake.len(),
            head: self.snake.head(),
            direction: self.snake.direction(),
            tick_count: self.tick_count,
        }
    }

    /// Moves the active food to `position`.
    ///
    /// Used to script deterministic situations; `position` must be empty or already food.
    pub fn place_food(&mut self, position: Position) -> Result<(), GameError> {
        if self.food != Some(position) && !self.grid.is_free(position) {
            self.grid.get(position)?;
            return Err(GameError::CellOccupied(position));
        }

        if let Some(previous) = self.food.take() {
            self.grid.set(previous, Cell::Empty)?;
        }
        self.grid.set(position, Cell::Food)?;
        self.food = Some(position);
        Ok(())
    }

    /// Replaces the snake and rebuilds occupancy around it.
    ///
    /// Food under the new body is moved to a fresh free cell.
    pub fn set_snake(&mut self, snake: Snake) -> Result<(), GameError> {
        let mut seen = HashSet::with_capacity(snake.len());
        let valid = !snake.is_empty()
            && snake.segments().all(|segment| {
                segment.is_within_bounds(self.config.board_size) && seen.insert(*segment)
            });
        if !valid {
            return Err(GameError::InvalidSnake);
        }

        self.grid.clear();
        for segment in snake.segments() {
            self.grid.set(*segment, Cell::SnakeBody)?;
        }
        self.snake = snake;

        self.food = match self.food {
            Some(food) if self.grid.is_free(food) => {
                self.grid.set(food, Cell::Food)?;
                Some(food)
            }
            _ => Some(self.spawner.spawn(&mut self.grid)?),
        };
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Position of the active food; `None` only after the board filled up.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    fn collides(&self, next: Position) -> Result<bool, GameError> {
        let occupied = self.grid.get(next)? == Cell::SnakeBody;
        Ok(match self.config.collision_policy {
            CollisionPolicy::PreTickOccupancy => occupied,
            CollisionPolicy::VacatingTailIsFree => occupied && self.snake.tail() != Some(next),
        })
    }

    fn eat(&mut self, next: Position) -> Result<TickOutcome, GameError> {
        self.snake.grow(next);
        self.grid.set(next, Cell::SnakeBody)?;
        self.score = self.score.saturating_add(self.config.food_reward);
        self.food = None;

        match self.spawner.spawn(&mut self.grid) {
            Ok(food) => {
                self.food = Some(food);
                info!(
                    score = self.score,
                    length = self.snake.len(),
                    food_x = food.x,
                    food_y = food.y,
                    "food eaten"
                );
                Ok(TickOutcome::Ate { food })
            }
            Err(SpawnError::BoardFull) => Ok(self.finish(EndReason::BoardFull)),
            Err(error) => Err(error.into()),
        }
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.end_reason = Some(reason);
        info!(
            ?reason,
            score = self.score,
            length = self.snake.len(),
            ticks = self.tick_count,
            "game over"
        );
        TickOutcome::Ended(reason)
    }
}

fn initial_board<R: Rng>(
    config: &GameConfig,
    spawner: &mut FoodSpawner<R>,
) -> Result<(Grid, Snake, Position), GameError> {
    let mut grid = Grid::new(config.board_size);
    let snake = Snake::centered(config.board_size, config.initial_length, START_DIRECTION);
    for segment in snake.segments() {
        grid.set(*segment, Cell::SnakeBody)?;
    }
    let food = spawner.spawn(&mut grid)?;
    Ok((grid, snake, food))
}
