//! Square arena shared by every board.
//!
//! Squares live in one row-major `Vec` and are addressed by integer index.
//! Rows, columns, diagonals and neighbours are computed from indices on
//! demand, so no square ever holds a reference to another.

use std::fmt;

use crate::{Coord, Direction, Marker, Seat};

/// Fixed-size rectangular arena of markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Marker>,
}

impl Grid {
    /// Creates an all-empty grid.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![Marker::Empty; usize::from(width) * usize::from(height)],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of squares.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; grids have at least one square.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when `at` lies on the grid.
    pub fn contains(&self, at: Coord) -> bool {
        at.x >= 1 && at.y >= 1 && at.x <= self.width && at.y <= self.height
    }

    /// Arena index of `at`.
    pub fn index(&self, at: Coord) -> Option<usize> {
        self.contains(at)
            .then(|| usize::from(at.y - 1) * usize::from(self.width) + usize::from(at.x - 1))
    }

    /// Coordinate of an arena index.
    pub fn coord(&self, index: usize) -> Coord {
        let w = usize::from(self.width);
        Coord::new((index % w + 1) as u8, (index / w + 1) as u8)
    }

    /// Marker at `at`, `None` when off the grid.
    pub fn get(&self, at: Coord) -> Option<Marker> {
        self.index(at).map(|i| self.cells[i])
    }

    /// Writes `marker` at `at`. Returns false (and writes nothing) when `at`
    /// is off the grid.
    pub fn set(&mut self, at: Coord, marker: Marker) -> bool {
        match self.index(at) {
            Some(i) => {
                self.cells[i] = marker;
                true
            }
            None => false,
        }
    }

    /// Marker by arena index.
    pub fn at_index(&self, index: usize) -> Marker {
        self.cells[index]
    }

    /// Writes a marker by arena index.
    pub fn set_index(&mut self, index: usize, marker: Marker) {
        self.cells[index] = marker;
    }

    /// Every square in row-major order, bottom row first.
    pub fn squares(&self) -> impl Iterator<Item = (Coord, Marker)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, m)| (self.coord(i), *m))
    }

    /// How many squares hold `marker`.
    pub fn count(&self, marker: Marker) -> usize {
        self.cells.iter().filter(|m| **m == marker).count()
    }

    /// Orthogonal neighbours of an arena index that lie on the grid.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let at = self.coord(index);
        Direction::ORTHOGONAL
            .into_iter()
            .filter_map(move |d| at.step(d, 1))
            .filter_map(|c| self.index(c))
    }

    /// The squares of one column, bottom to top.
    pub fn column(&self, x: u8) -> impl Iterator<Item = Coord> {
        (1..=self.height).map(move |y| Coord::new(x, y))
    }

    /// Finds the first run of `length` identical stones along a row, column
    /// or diagonal. Start squares are scanned in row-major order and, for
    /// each, the row, column and both diagonal axes in that order.
    pub fn find_run(&self, length: usize) -> Option<(Seat, Vec<Coord>)> {
        for (start, marker) in self.squares() {
            let Some(seat) = marker.stone() else {
                continue;
            };
            for axis in Direction::AXES {
                let run: Vec<Coord> = (0..length as i16)
                    .map_while(|n| start.step(axis, n))
                    .take_while(|c| self.get(*c) == Some(marker))
                    .collect();
                if run.len() == length {
                    return Some((seat, run));
                }
            }
        }
        None
    }

    /// Writes the grid top row first, each row prefixed with its number and
    /// followed by an x axis line. `glyph` maps each square to one character.
    pub fn render_with(
        &self,
        f: &mut fmt::Formatter<'_>,
        glyph: impl Fn(Coord, Marker) -> char,
        x_label: impl Fn(u8) -> String,
    ) -> fmt::Result {
        for y in (1..=self.height).rev() {
            write!(f, "{y:>2} ")?;
            for x in 1..=self.width {
                let at = Coord::new(x, y);
                let marker = self.get(at).unwrap_or_default();
                write!(f, "{:>2}", glyph(at, marker))?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 1..=self.width {
            write!(f, "{:>2}", x_label(x))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_corners() {
        let grid = Grid::new(7, 6);
        assert_eq!(grid.index(Coord::new(1, 1)), Some(0));
        assert_eq!(grid.index(Coord::new(7, 6)), Some(41));
        assert_eq!(grid.coord(41), Coord::new(7, 6));
        assert_eq!(grid.index(Coord::new(8, 1)), None);
        assert_eq!(grid.index(Coord::new(0, 1)), None);
    }

    #[test]
    fn test_corner_has_two_neighbors() {
        let grid = Grid::new(19, 19);
        assert_eq!(grid.neighbors(0).count(), 2);
        let center = grid.index(Coord::new(10, 10)).unwrap();
        assert_eq!(grid.neighbors(center).count(), 4);
    }

    #[test]
    fn test_find_run_requires_full_length() {
        let mut grid = Grid::new(4, 4);
        grid.set(Coord::new(1, 1), Marker::Stone(Seat::One));
        grid.set(Coord::new(2, 2), Marker::Stone(Seat::One));
        grid.set(Coord::new(3, 3), Marker::Stone(Seat::One));
        assert_eq!(grid.find_run(4), None);
        grid.set(Coord::new(4, 4), Marker::Stone(Seat::One));
        let (seat, cells) = grid.find_run(4).unwrap();
        assert_eq!(seat, Seat::One);
        assert_eq!(cells.first(), Some(&Coord::new(1, 1)));
        assert_eq!(cells.last(), Some(&Coord::new(4, 4)));
    }

    #[test]
    fn test_find_run_ignores_mixed_line() {
        let mut grid = Grid::new(3, 3);
        grid.set(Coord::new(1, 2), Marker::Stone(Seat::One));
        grid.set(Coord::new(2, 2), Marker::Stone(Seat::Two));
        grid.set(Coord::new(3, 2), Marker::Stone(Seat::One));
        assert_eq!(grid.find_run(3), None);
    }
}
