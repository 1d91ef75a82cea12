//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A square address as players type it: `x` is the column and `y` the row,
/// both counted from 1. Row 1 is the bottom of the rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
#[display("({x}, {y})")]
pub struct Coord {
    /// Column, 1-based.
    pub x: u8,
    /// Row, 1-based.
    pub y: u8,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Steps `distance` squares in `direction`, or `None` when that would
    /// leave the positive quadrant.
    pub fn step(self, direction: Direction, distance: i16) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let x = i16::from(self.x) + dx * distance;
        let y = i16::from(self.y) + dy * distance;
        if x < 1 || y < 1 || x > i16::from(u8::MAX) || y > i16::from(u8::MAX) {
            return None;
        }
        Some(Coord::new(x as u8, y as u8))
    }
}

/// One of the eight compass steps on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Direction {
    /// +y
    Up,
    /// -y
    Down,
    /// -x
    Left,
    /// +x
    Right,
    /// +x +y
    UpRight,
    /// -x +y
    UpLeft,
    /// +x -y
    DownRight,
    /// -x -y
    DownLeft,
}

impl Direction {
    /// The four orthogonal directions.
    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    /// One direction per line axis: row, column and both diagonals.
    pub const AXES: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::UpRight,
        Direction::UpLeft,
    ];

    /// Unit step `(dx, dy)`.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpRight => (1, 1),
            Direction::UpLeft => (-1, 1),
            Direction::DownRight => (1, -1),
            Direction::DownLeft => (-1, -1),
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpRight => Direction::DownLeft,
            Direction::UpLeft => Direction::DownRight,
            Direction::DownRight => Direction::UpLeft,
            Direction::DownLeft => Direction::UpRight,
        }
    }
}
