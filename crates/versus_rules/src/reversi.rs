//! Reversi: 8x8 flanking captures.
//!
//! Legality and mutation are separate steps: [`ReversiBoard::find_capture_lines`]
//! is a pure query and [`ReversiBoard::commit_captures`] applies its result.

use std::fmt;

use strum::IntoEnumIterator;
use tracing::{debug, instrument};

use crate::{Board, Coord, Direction, GameKind, Grid, Marker, MoveEffect, Score, Seat, WinResult};

/// Side length of the board.
pub const SIZE: u8 = 8;

/// A run of opposing discs that a placement would turn over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureLine {
    /// Direction walked from the placed disc.
    pub direction: Direction,
    /// Discs between the placed disc and the anchor, nearest first.
    pub discs: Vec<Coord>,
}

/// Reversi board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversiBoard {
    grid: Grid,
}

impl ReversiBoard {
    /// Creates the standard opening: seat one on (4,4) and (5,5), seat two on
    /// (4,5) and (5,4).
    #[instrument]
    pub fn new() -> Self {
        let mut grid = Grid::new(SIZE, SIZE);
        grid.set(Coord::new(4, 4), Marker::Stone(Seat::One));
        grid.set(Coord::new(5, 5), Marker::Stone(Seat::One));
        grid.set(Coord::new(4, 5), Marker::Stone(Seat::Two));
        grid.set(Coord::new(5, 4), Marker::Stone(Seat::Two));
        Self { grid }
    }

    /// Creates an empty board, for setting up positions.
    pub fn empty() -> Self {
        Self {
            grid: Grid::new(SIZE, SIZE),
        }
    }

    /// Writes a marker directly. Used to seed positions.
    pub fn seed(&mut self, at: Coord, marker: Marker) {
        self.grid.set(at, marker);
    }

    /// Every line `seat` would capture by placing at `at`, in direction order.
    ///
    /// A line qualifies only when it is an unbroken run of the opposing
    /// colour terminated by a disc of `seat`. Does not look at whether `at`
    /// itself is empty.
    pub fn find_capture_lines(&self, at: Coord, seat: Seat) -> Vec<CaptureLine> {
        let mine = Marker::Stone(seat);
        let theirs = Marker::Stone(seat.other());
        let mut lines = Vec::new();
        for direction in Direction::iter() {
            let mut discs = Vec::new();
            let mut distance = 1;
            let anchored = loop {
                let Some(next) = at.step(direction, distance) else {
                    break false;
                };
                match self.grid.get(next) {
                    Some(m) if m == theirs => discs.push(next),
                    Some(m) if m == mine => break true,
                    _ => break false,
                }
                distance += 1;
            };
            if anchored && !discs.is_empty() {
                lines.push(CaptureLine { direction, discs });
            }
        }
        lines
    }

    /// Turns every disc of `lines` over to `seat`. Returns the flipped squares.
    pub fn commit_captures(&mut self, lines: &[CaptureLine], seat: Seat) -> Vec<Coord> {
        let flipped: Vec<Coord> = lines.iter().flat_map(|l| l.discs.iter().copied()).collect();
        for at in &flipped {
            self.grid.set(*at, Marker::Stone(seat));
        }
        flipped
    }

    /// True when `seat` has at least one legal placement.
    #[instrument(skip(self))]
    pub fn has_legal_move(&self, seat: Seat) -> bool {
        self.grid
            .squares()
            .any(|(at, _)| self.is_valid_square(at, seat))
    }

    /// Disc count per seat.
    pub fn score(&self) -> Score {
        Score {
            one: self.grid.count(Marker::Stone(Seat::One)),
            two: self.grid.count(Marker::Stone(Seat::Two)),
        }
    }
}

impl Default for ReversiBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for ReversiBoard {
    fn kind(&self) -> GameKind {
        GameKind::Reversi
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn is_valid_square(&self, at: Coord, seat: Seat) -> bool {
        self.grid.get(at) == Some(Marker::Empty) && !self.find_capture_lines(at, seat).is_empty()
    }

    #[instrument(skip(self))]
    fn set_square(&mut self, at: Coord, seat: Seat) -> MoveEffect {
        let lines = self.find_capture_lines(at, seat);
        self.grid.set(at, Marker::Stone(seat));
        let flipped = self.commit_captures(&lines, seat);
        debug!(lines = lines.len(), flipped = flipped.len(), "Discs flipped");
        MoveEffect::Flipped { at, flipped }
    }

    fn check_win(&self) -> WinResult {
        WinResult::Score(self.score())
    }
}

impl fmt::Display for ReversiBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.render_with(
            f,
            |_, m| match m {
                Marker::Stone(Seat::One) => 'B',
                Marker::Stone(Seat::Two) => 'W',
                _ => '.',
            },
            |x| x.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_has_four_legal_moves() {
        let board = ReversiBoard::new();
        let legal = board
            .grid()
            .squares()
            .filter(|(at, _)| board.is_valid_square(*at, Seat::One))
            .count();
        assert_eq!(legal, 4);
    }

    #[test]
    fn test_placement_without_capture_rejected() {
        let board = ReversiBoard::new();
        assert!(!board.is_valid_square(Coord::new(1, 1), Seat::One));
        assert!(board.find_capture_lines(Coord::new(1, 1), Seat::One).is_empty());
    }

    #[test]
    fn test_unanchored_run_not_captured() {
        let mut board = ReversiBoard::empty();
        board.seed(Coord::new(2, 1), Marker::Stone(Seat::Two));
        board.seed(Coord::new(3, 1), Marker::Stone(Seat::Two));
        assert!(board.find_capture_lines(Coord::new(1, 1), Seat::One).is_empty());
    }

    #[test]
    fn test_capture_in_two_directions() {
        let mut board = ReversiBoard::empty();
        board.seed(Coord::new(2, 1), Marker::Stone(Seat::Two));
        board.seed(Coord::new(3, 1), Marker::Stone(Seat::One));
        board.seed(Coord::new(1, 2), Marker::Stone(Seat::Two));
        board.seed(Coord::new(1, 3), Marker::Stone(Seat::One));
        let effect = board.set_square(Coord::new(1, 1), Seat::One);
        match effect {
            MoveEffect::Flipped { flipped, .. } => {
                assert_eq!(flipped.len(), 2);
                assert!(flipped.contains(&Coord::new(2, 1)));
                assert!(flipped.contains(&Coord::new(1, 2)));
            }
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(board.score(), Score { one: 5, two: 0 });
    }
}
