use thiserror::Error;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies on a square board of side `size`.
    #[must_use]
    pub fn is_within_bounds(self, size: u16) -> bool {
        let size = i32::from(size);
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }

    /// Returns this position wrapped onto a square board of side `size` on both axes.
    #[must_use]
    pub fn wrapped(self, size: u16) -> Self {
        let size = i32::from(size);
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    SnakeBody,
    Food,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("position ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfRange { x: i32, y: i32, size: u16 },
}

/// Fixed-size square occupancy map, stored row-major.
///
/// The grid never wraps coordinates itself; callers resolve wrap-around first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid of side `size`.
    #[must_use]
    pub fn new(size: u16) -> Self {
        let side = usize::from(size);
        Self {
            size,
            cells: vec![Cell::Empty; side * side],
        }
    }

    #[must_use]
    pub fn size(&self) -> u16 {
        self.size
    }

    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, position: Position) -> Result<Cell, GridError> {
        self.index_of(position).map(|index| self.cells[index])
    }

    pub fn set(&mut self, position: Position, cell: Cell) -> Result<(), GridError> {
        let index = self.index_of(position)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Returns true when `position` is on the grid and empty.
    #[must_use]
    pub fn is_free(&self, position: Position) -> bool {
        matches!(self.get(position), Ok(Cell::Empty))
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells currently holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|candidate| **candidate == cell).count()
    }

    /// Iterates over every empty cell in row-major order.
    pub fn free_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| self.position_of(index))
    }

    /// Converts a row-major index back into a position.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Position {
        let side = usize::from(self.size);
        // Both coordinates are below `size`, which fits in i32.
        Position {
            x: (index % side) as i32,
            y: (index / side) as i32,
        }
    }

    fn index_of(&self, position: Position) -> Result<usize, GridError> {
        if !position.is_within_bounds(self.size) {
            return Err(GridError::OutOfRange {
                x: position.x,
                y: position.y,
                size: self.size,
            });
        }

        let side = usize::from(self.size);
        // Non-negative after the bounds check.
        Ok(position.y as usize * side + position.x as usize)
    }
}
