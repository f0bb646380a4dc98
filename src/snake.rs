use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::{Direction, direction_change_is_valid};

/// Result of a direction request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TurnRequest {
    /// Stored; takes effect on the next advance unless a later request replaces it.
    Queued,
    /// Same as the committed direction; nothing changes.
    Unchanged,
    /// Exact reverse of the committed direction; ignored.
    Rejected,
}

/// Ordered snake body with its committed and pending direction.
///
/// Segments are stored tail first, head last.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Creates a straight snake of `length` segments whose head sits on the board centre,
    /// with the body trailing behind it opposite to `direction`.
    #[must_use]
    pub fn centered(board_size: u16, length: usize, direction: Direction) -> Self {
        let centre = i32::from(board_size / 2);
        let (dx, dy) = direction.delta();

        let body = (0..length)
            .rev()
            .map(|offset| {
                let offset = i32::try_from(offset).unwrap_or(i32::MAX);
                Position::new(centre - dx * offset, centre - dy * offset).wrapped(board_size)
            })
            .collect();

        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    /// Creates a snake from explicit body segments, tail first and head last.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
        }
    }

    /// Records a turn for the next tick. The latest queued request wins.
    ///
    /// Reversals and repeats of the committed direction leave any queued turn in place.
    pub fn request_direction(&mut self, requested: Direction) -> TurnRequest {
        if !direction_change_is_valid(self.direction, requested) {
            return TurnRequest::Rejected;
        }

        if requested == self.direction {
            return TurnRequest::Unchanged;
        }

        self.pending_direction = Some(requested);
        TurnRequest::Queued
    }

    /// Commits any pending turn and returns the wrapped cell in front of the head.
    ///
    /// The body itself is not moved; follow up with [`Snake::move_to`] or [`Snake::grow`].
    pub fn advance(&mut self, board_size: u16) -> Position {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }

        let (dx, dy) = self.direction.delta();
        let head = self.head();
        Position::new(head.x + dx, head.y + dy).wrapped(board_size)
    }

    /// Appends `position` as the new head and keeps the tail.
    pub fn grow(&mut self, position: Position) {
        self.body.push_back(position);
    }

    /// Appends `position` as the new head and drops the tail, returning the vacated cell.
    pub fn move_to(&mut self, position: Position) -> Option<Position> {
        let vacated = self.body.pop_front();
        self.body.push_back(position);
        vacated
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the segment that moves out next.
    #[must_use]
    pub fn tail(&self) -> Option<Position> {
        self.body.front().copied()
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the turn queued for the next advance, if any.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
