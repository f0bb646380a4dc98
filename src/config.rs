use thiserror::Error;

/// Default side length of the square board.
pub const DEFAULT_BOARD_SIZE: u16 = 20;

/// Default number of body segments at game start.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Default score granted per food eaten.
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Default scheduler period in milliseconds. Owned by the front-end, not the engine.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Number of entries the leaderboard retains.
pub const LEADERBOARD_CAPACITY: usize = 5;

/// How the engine treats the cell the tail is about to vacate on a non-growing move.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum CollisionPolicy {
    /// Check the candidate head against occupancy that still contains the tail.
    /// Moving into the tail's cell is a self-collision.
    #[default]
    PreTickOccupancy,
    /// Treat the tail cell as free unless the snake grows this tick.
    VacatingTailIsFree,
}

/// Rejected engine configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 2, got {0}")]
    BoardTooSmall(u16),
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("initial snake length {length} must be shorter than the board size {board_size}")]
    SnakeTooLong { length: usize, board_size: u16 },
}

/// Construction parameters for a game engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub board_size: u16,
    pub initial_length: usize,
    pub food_reward: u32,
    pub collision_policy: CollisionPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_reward: DEFAULT_FOOD_REWARD,
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration on a board of `board_size`.
    #[must_use]
    pub fn with_board_size(board_size: u16) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Checks that a straight starting snake fits on one row with at least one cell to spare.
    ///
    /// A snake spanning a whole row would run into its own tail on the first tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.initial_length >= usize::from(self.board_size) {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                board_size: self.board_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CollisionPolicy, ConfigError, GameConfig};

    #[test]
    fn default_config_matches_classic_game() {
        let config = GameConfig::default();

        assert_eq!(config.board_size, 20);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.collision_policy, CollisionPolicy::PreTickOccupancy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_degenerate_boards() {
        assert_eq!(
            GameConfig::with_board_size(1).validate(),
            Err(ConfigError::BoardTooSmall(1))
        );

        let empty = GameConfig {
            initial_length: 0,
            ..GameConfig::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::EmptySnake));

        let too_long = GameConfig {
            board_size: 4,
            initial_length: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            too_long.validate(),
            Err(ConfigError::SnakeTooLong {
                length: 5,
                board_size: 4
            })
        );
    }

    #[test]
    fn snake_must_leave_a_gap_in_its_row() {
        let fits = GameConfig {
            board_size: 4,
            initial_length: 3,
            ..GameConfig::default()
        };
        let spans_row = GameConfig {
            initial_length: 4,
            ..fits
        };

        assert!(fits.validate().is_ok());
        assert!(spans_row.validate().is_err());
    }
}
