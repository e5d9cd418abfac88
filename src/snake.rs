use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighboring position one cell along `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Mutable snake state with a single pending heading.
///
/// Heading changes are buffered in `pending` and only become the movement
/// direction when [`Snake::commit_pending`] runs at the start of a tick,
/// decoupling input cadence from tick cadence.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: Direction,
}

impl Snake {
    /// Seeds the starting snake: three horizontal cells centered on the
    /// board, head on the right, heading right.
    #[must_use]
    pub fn spawn_centered(bounds: GridSize) -> Self {
        let head = Position {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        };
        let body = VecDeque::from([
            head,
            Position {
                x: head.x - 1,
                y: head.y,
            },
            Position {
                x: head.x - 2,
                y: head.y,
            },
        ]);

        Self {
            body,
            direction: Direction::Right,
            pending: Direction::Right,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending: direction,
        }
    }

    /// Buffers `direction` as the pending heading unless it would reverse
    /// the current heading. Last writer wins within a tick.
    pub fn request_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending = direction;
        }
    }

    /// Promotes the pending heading to the movement direction.
    pub fn commit_pending(&mut self) {
        self.direction = self.pending;
    }

    /// Returns the head position for the next movement step.
    #[must_use]
    pub fn next_head(&self) -> Position {
        self.head().stepped(self.direction)
    }

    /// Moves the head to `new_head` and drops the tail cell.
    pub fn step_to(&mut self, new_head: Position) {
        self.push_head(new_head);
        let _ = self.body.pop_back();
    }

    /// Moves the head to `new_head` keeping the tail: length grows by one.
    pub fn grow_to(&mut self, new_head: Position) {
        self.push_head(new_head);
    }

    fn push_head(&mut self, new_head: Position) {
        let head = self.head();
        debug_assert!(
            (new_head.x - head.x).abs() + (new_head.y - head.y).abs() == 1,
            "new head must be one rectilinear step from the old head"
        );
        self.body.push_front(new_head);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
