use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid cell in logical coordinates: column `x`, row `y`, both 0-indexed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Returns the neighbouring cell one step in `direction`, without bounds checks.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this cell wrapped into bounds, each axis independently.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }
}

/// Snake body plus its current and requested heading.
///
/// The body is never empty. Self-overlap is not prevented structurally; the
/// engine rejects a move into an occupied cell before mutating the body.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Option<Direction>,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Creates a motionless one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Cell) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction: None,
            pending_direction: None,
        }
    }

    /// Creates a snake from explicit body segments (front is head) already
    /// moving in `direction`.
    ///
    /// Returns `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            direction: Some(direction),
            pending_direction: Some(direction),
        })
    }

    /// Stores the latest requested direction. Reversals are stored too and
    /// only rejected when the next tick resolves the heading.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Adopts the pending direction unless it reverses the current motion.
    ///
    /// Returns the direction the snake will move in this tick, if any.
    pub fn resolve_direction(&mut self) -> Option<Direction> {
        if let Some(pending) = self.pending_direction {
            if direction_change_is_valid(self.direction, pending) {
                self.direction = Some(pending);
            }
        }

        self.direction
    }

    /// Inserts a new head segment.
    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Removes and returns the tail segment.
    ///
    /// Only valid right after `push_head`, while the body holds at least two
    /// segments.
    pub fn pop_tail(&mut self) -> Cell {
        debug_assert!(self.body.len() > 1, "popping the tail would empty the snake");
        if self.body.len() > 1 {
            if let Some(tail) = self.body.pop_back() {
                return tail;
            }
        }
        self.head()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment, tail included, occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction, `None` before the first move.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Returns the most recently requested direction.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Cell, Snake};

    #[test]
    fn cell_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        let wrapped_left = Cell { x: -1, y: 3 }.wrapped(bounds);
        let wrapped_bottom = Cell { x: 4, y: 8 }.wrapped(bounds);

        assert_eq!(wrapped_left, Cell { x: 9, y: 3 });
        assert_eq!(wrapped_bottom, Cell { x: 4, y: 0 });
    }

    #[test]
    fn step_moves_one_cell() {
        let origin = Cell { x: 3, y: 3 };
        assert_eq!(origin.step(Direction::Up), Cell { x: 3, y: 2 });
        assert_eq!(origin.step(Direction::Left), Cell { x: 2, y: 3 });
    }

    #[test]
    fn new_snake_is_motionless_until_a_direction_arrives() {
        let mut snake = Snake::new(Cell { x: 2, y: 2 });
        assert_eq!(snake.resolve_direction(), None);

        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.resolve_direction(), Some(Direction::Left));
    }

    #[test]
    fn reversal_is_stored_but_not_adopted() {
        let mut snake = Snake::from_segments(
            vec![Cell { x: 2, y: 2 }, Cell { x: 1, y: 2 }],
            Direction::Right,
        )
        .expect("non-empty body");

        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Some(Direction::Left));
        assert_eq!(snake.resolve_direction(), Some(Direction::Right));
    }

    #[test]
    fn latest_pending_direction_wins() {
        let mut snake = Snake::from_segments(vec![Cell { x: 2, y: 2 }], Direction::Right)
            .expect("non-empty body");

        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        assert_eq!(snake.resolve_direction(), Some(Direction::Down));
    }

    #[test]
    fn push_then_pop_moves_the_body_one_cell() {
        let mut snake = Snake::new(Cell { x: 0, y: 0 });

        snake.push_head(Cell { x: 1, y: 0 });
        assert_eq!(snake.pop_tail(), Cell { x: 0, y: 0 });
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell { x: 1, y: 0 });
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "popping the tail would empty the snake")]
    fn popping_the_only_segment_is_rejected() {
        let mut snake = Snake::new(Cell { x: 0, y: 0 });
        let _ = snake.pop_tail();
    }

    #[test]
    fn segments_iterate_both_ways_with_known_length() {
        let snake = Snake::from_segments(
            vec![Cell { x: 2, y: 0 }, Cell { x: 1, y: 0 }, Cell { x: 0, y: 0 }],
            Direction::Right,
        )
        .expect("non-empty body");

        assert_eq!(snake.segments().len(), 3);
        assert_eq!(snake.segments().next_back(), Some(&Cell { x: 0, y: 0 }));
        let reversed: Vec<usize> = snake.segments().enumerate().rev().map(|(i, _)| i).collect();
        assert_eq!(reversed, vec![2, 1, 0]);
    }

    #[test]
    fn from_segments_rejects_empty_body() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());
    }
}
