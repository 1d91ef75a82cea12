//! The contract every game board implements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Coord, GameKind, Grid, Marker, Seat, ShotResult};

/// Per-seat point totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display)]
#[display("{one}:{two}")]
pub struct Score {
    /// Points of seat one.
    pub one: usize,
    /// Points of seat two.
    pub two: usize,
}

impl Score {
    /// Points of `seat`.
    pub fn of(&self, seat: Seat) -> usize {
        match seat {
            Seat::One => self.one,
            Seat::Two => self.two,
        }
    }

    /// The seat with more points, `None` on equal points.
    pub fn leader(&self) -> Option<Seat> {
        match self.one.cmp(&self.two) {
            std::cmp::Ordering::Greater => Some(Seat::One),
            std::cmp::Ordering::Less => Some(Seat::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// What [`Board::check_win`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinResult {
    /// Nothing decided by the board alone.
    Undecided,
    /// A completed line of stones.
    Line {
        /// Owner of the line.
        seat: Seat,
        /// Squares of the line in scan order.
        cells: Vec<Coord>,
    },
    /// Territory totals; the caller picks the higher.
    Score(Score),
    /// Unsunk ship cells per side; zero means that side has lost.
    Remaining(Score),
}

/// What a call to [`Board::set_square`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveEffect {
    /// A stone was written where requested.
    Placed {
        /// Where it went.
        at: Coord,
    },
    /// A piece fell to the lowest free row of a column.
    Dropped {
        /// Where it landed.
        at: Coord,
    },
    /// A disc was placed and opposing discs turned over.
    Flipped {
        /// Where the disc went.
        at: Coord,
        /// Every disc turned over.
        flipped: Vec<Coord>,
    },
    /// A stone was placed and stones without liberty were removed.
    Captured {
        /// Where the stone went.
        at: Coord,
        /// Every removed stone.
        captured: Vec<Coord>,
    },
    /// A shot was fired at the opponent's ocean.
    Shot {
        /// Target square.
        at: Coord,
        /// Miss, hit or sink.
        result: ShotResult,
    },
}

impl MoveEffect {
    /// Square the move landed on.
    pub fn at(&self) -> Coord {
        match self {
            MoveEffect::Placed { at }
            | MoveEffect::Dropped { at }
            | MoveEffect::Flipped { at, .. }
            | MoveEffect::Captured { at, .. }
            | MoveEffect::Shot { at, .. } => *at,
        }
    }
}

/// Common board contract.
///
/// Every operation takes 1-based coordinates. Implementations never panic on
/// off-board coordinates: `is_valid_square` answers false and `set_square`
/// is only called after validation.
pub trait Board: fmt::Display + fmt::Debug + Send + Sync {
    /// Which game this board belongs to.
    fn kind(&self) -> GameKind;

    /// The squares of the board.
    fn grid(&self) -> &Grid;

    /// True iff `seat` may currently move at `at`. Never mutates.
    fn is_valid_square(&self, at: Coord, seat: Seat) -> bool;

    /// Applies a move for `seat` at `at`. Callers validate first.
    fn set_square(&mut self, at: Coord, seat: Seat) -> MoveEffect;

    /// Reads the current result. Never mutates.
    fn check_win(&self) -> WinResult;

    /// True when `marker` belongs to this game's marker alphabet.
    fn admits(&self, marker: Marker) -> bool {
        matches!(marker, Marker::Empty | Marker::Stone(_))
    }
}
