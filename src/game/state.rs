use std::collections::VecDeque;

use super::direction::Direction;

/// A cell on the game grid. Coordinates always lie in `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in `direction`, wrapped onto the torus.
    ///
    /// `rem_euclid` handles both overflow past the far edge and underflow past
    /// zero with the same formula, so there is no branch per edge.
    pub fn stepped(self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx).rem_euclid(width as i32),
            y: (self.y + dy).rem_euclid(height as i32),
        }
    }
}

/// The snake: an ordered body of cells, head first, never empty.
///
/// The body and direction can only be mutated from inside the crate; drivers
/// and renderers get read access through [`Snake::head`], [`Snake::cells`] and
/// friends. The simulation engine is the single writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Builds a straight snake of `length` cells with the head at `head`, the
    /// rest of the body trailing in the direction opposite to `direction`.
    /// Trailing cells wrap around the torus like any other movement.
    pub(crate) fn new(
        head: Cell,
        direction: Direction,
        length: usize,
        width: usize,
        height: usize,
    ) -> Self {
        let mut body = VecDeque::with_capacity(length);
        body.push_back(head);
        let back = direction.opposite();
        for _ in 1..length {
            let tail = *body.back().expect("body starts non-empty");
            body.push_back(tail.stepped(back, width, height));
        }
        Self { body, direction }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "snake body must be non-empty");
        Self { body, direction }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body cells in order, head first.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether the head cell also appears somewhere in the rest of the body.
    /// Checked after each advance; a duplicate head is a self-collision.
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Pushes `new_head` at the front; pops the tail unless growing.
    pub(crate) fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

/// The apple. Invariant: never on a cell occupied by the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    position: Cell,
}

impl Apple {
    pub(crate) fn new(position: Cell) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub(crate) fn relocate(&mut self, position: Cell) {
        self.position = position;
    }
}

/// Lifecycle of the current life. `Collided` is terminal until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Collided,
}

/// Complete simulation state. Read-only outside the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    pub snake: Snake,
    pub apple: Apple,
    pub status: Status,
    /// Apples eaten this life.
    pub score: u32,
    /// Ticks advanced this life.
    pub steps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_snake_trails_behind_head() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, 10, 10);
        let body: Vec<Cell> = snake.cells().collect();
        assert_eq!(body, vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
    }

    #[test]
    fn test_snake_creation_wraps_trailing_cells() {
        // Head at the left edge facing right: the tail wraps to the far column.
        let snake = Snake::new(Cell::new(0, 2), Direction::Right, 3, 5, 5);
        let body: Vec<Cell> = snake.cells().collect();
        assert_eq!(body, vec![Cell::new(0, 2), Cell::new(4, 2), Cell::new(3, 2)]);
    }

    #[test]
    fn test_stepped_wraps_on_both_axes() {
        assert_eq!(
            Cell::new(9, 3).stepped(Direction::Right, 10, 10),
            Cell::new(0, 3)
        );
        assert_eq!(
            Cell::new(0, 3).stepped(Direction::Left, 10, 10),
            Cell::new(9, 3)
        );
        assert_eq!(
            Cell::new(4, 0).stepped(Direction::Up, 10, 10),
            Cell::new(4, 9)
        );
        assert_eq!(
            Cell::new(4, 9).stepped(Direction::Down, 10, 10),
            Cell::new(4, 0)
        );
    }

    #[test]
    fn test_advance_with_and_without_growth() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, 10, 10);

        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert!(!snake.contains(Cell::new(3, 5)));

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
    }

    #[test]
    fn test_head_overlap_detection() {
        let folded = Snake::from_cells(
            [
                Cell::new(4, 5),
                Cell::new(4, 6),
                Cell::new(5, 6),
                Cell::new(5, 5),
                Cell::new(4, 5),
            ],
            Direction::Up,
        );
        assert!(folded.head_overlaps_body());

        let straight = Snake::new(Cell::new(5, 5), Direction::Right, 4, 10, 10);
        assert!(!straight.head_overlaps_body());
    }
}
