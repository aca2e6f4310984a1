//! Board geometry for the knight's tour.
//!
//! The board is fixed at 8×8. Squares are addressed by 0-indexed `(x, y)`
//! coordinates and the knight always starts from the origin `(0, 0)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board
pub const BOARD_SIZE: i32 = 8;
/// Number of squares a complete tour visits
pub const SQUARES: usize = (BOARD_SIZE * BOARD_SIZE) as usize;
/// One gene per transition between consecutive squares
pub const GENOME_LENGTH: usize = SQUARES - 1;
/// Number of distinct knight moves
pub const MOVE_COUNT: u8 = 8;

/// A move code in `0..MOVE_COUNT`, selecting an entry of [`KNIGHT_MOVES`]
pub type MoveCode = u8;

/// Knight displacements `(dx, dy)` indexed by move code.
pub const KNIGHT_MOVES: [(i32, i32); MOVE_COUNT as usize] = [
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
];

/// A square on the board. Off-board values are representable so that
/// candidate moves can be computed before they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Starting square of every tour
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Square reached by playing `code` from here.
    ///
    /// # Panics
    ///
    /// Panics if `code >= MOVE_COUNT`.
    pub fn jump(&self, code: MoveCode) -> Position {
        let (dx, dy) = KNIGHT_MOVES[code as usize];
        Position::new(self.x + dx, self.y + dy)
    }

    /// Row-major square index, or `None` when off the board
    pub fn index(&self) -> Option<usize> {
        if self.is_on_board() {
            Some((self.y * BOARD_SIZE + self.x) as usize)
        } else {
            None
        }
    }

    pub fn is_knight_move_to(&self, other: &Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Set of visited squares packed into one bit per square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visited(u64);

impl Visited {
    pub fn new() -> Self {
        Visited(0)
    }

    /// A set containing only `start`
    pub fn starting_at(start: Position) -> Self {
        let mut visited = Visited::new();
        visited.insert(start);
        visited
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.index().map_or(false, |i| self.0 & (1u64 << i) != 0)
    }

    /// Mark `pos` as visited. Returns `false` if it was already present
    /// or lies off the board.
    pub fn insert(&mut self, pos: Position) -> bool {
        match pos.index() {
            Some(i) if self.0 & (1u64 << i) == 0 => {
                self.0 |= 1u64 << i;
                true
            }
            _ => false,
        }
    }

    /// On the board and not yet visited
    pub fn is_free(&self, pos: Position) -> bool {
        pos.is_on_board() && !self.contains(pos)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_table_is_knight_moves() {
        for code in 0..MOVE_COUNT {
            let from = Position::new(3, 3);
            assert!(from.is_knight_move_to(&from.jump(code)));
        }
        assert_eq!(Position::ORIGIN.jump(0), Position::new(-1, -2));
        assert_eq!(Position::ORIGIN.jump(4), Position::new(1, 2));
    }

    #[test]
    fn test_board_bounds() {
        assert!(Position::new(0, 0).is_on_board());
        assert!(Position::new(7, 7).is_on_board());
        assert!(!Position::new(8, 0).is_on_board());
        assert!(!Position::new(0, -1).is_on_board());
        assert_eq!(Position::new(7, 7).index(), Some(63));
        assert_eq!(Position::new(-1, 2).index(), None);
    }

    #[test]
    fn test_visited_set() {
        let mut visited = Visited::starting_at(Position::ORIGIN);
        assert_eq!(visited.len(), 1);
        assert!(visited.contains(Position::ORIGIN));
        assert!(!visited.is_free(Position::ORIGIN));
        assert!(visited.is_free(Position::new(1, 2)));
        assert!(!visited.is_free(Position::new(-1, -2)));

        assert!(visited.insert(Position::new(1, 2)));
        assert!(!visited.insert(Position::new(1, 2)));
        assert!(!visited.insert(Position::new(9, 9)));
        assert_eq!(visited.len(), 2);
    }
}
