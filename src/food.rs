use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::grid::{Cell, Grid, GridError, Position};

/// Lower bound on random probes before falling back to a free-cell scan.
const MIN_REJECTION_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    /// Every cell is occupied; there is nowhere left to put food.
    #[error("no free cell left for food")]
    BoardFull,
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Places food on a uniformly random free cell.
///
/// Probes random cells first, which is cheap while the board is mostly empty. After
/// `max(64, 4 * cells)` misses it collects the remaining free cells and picks one of those,
/// so spawning terminates however crowded the board gets.
#[derive(Debug, Clone)]
pub struct FoodSpawner<R = StdRng> {
    rng: R,
}

impl FoodSpawner<StdRng> {
    /// Spawner seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic spawner for tests and reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FoodSpawner<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Picks a free cell, marks it as food and returns it.
    pub fn spawn(&mut self, grid: &mut Grid) -> Result<Position, SpawnError> {
        let position = self.pick_free(grid)?;
        grid.set(position, Cell::Food)?;
        Ok(position)
    }

    fn pick_free(&mut self, grid: &Grid) -> Result<Position, SpawnError> {
        let total = grid.total_cells();
        let attempts = if total == 0 {
            0
        } else {
            MIN_REJECTION_ATTEMPTS.max(total.saturating_mul(4))
        };

        for _ in 0..attempts {
            let candidate = grid.position_of(self.rng.gen_range(0..total));
            if grid.is_free(candidate) {
                return Ok(candidate);
            }
        }

        let free: Vec<Position> = grid.free_positions().collect();
        if free.is_empty() {
            return Err(SpawnError::BoardFull);
        }

        Ok(free[self.rng.gen_range(0..free.len())])
    }
}
