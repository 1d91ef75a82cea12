//! Seats and square markers.

use serde::{Deserialize, Serialize};

/// Which of the two players of a session.
///
/// Seat one always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Seat {
    /// Player 1 (moves first).
    #[display("1")]
    One,
    /// Player 2.
    #[display("2")]
    Two,
}

impl Seat {
    /// Both seats in turn order.
    pub const BOTH: [Seat; 2] = [Seat::One, Seat::Two];

    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Index into two-element per-seat arrays.
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

/// Occupier of a single square.
///
/// The alphabet is closed: every board admits a subset of these values
/// (see [`crate::Board::admits`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Marker {
    /// Nothing here.
    #[default]
    Empty,
    /// A piece belonging to a seat.
    Stone(Seat),
    /// An intact ship cell (battleship).
    Ship,
    /// A ship cell that has been shot (battleship).
    Hit,
    /// A shot that found open water (battleship).
    Miss,
    /// A cell of a ship whose every cell has been hit (battleship).
    Sunk,
}

impl Marker {
    /// Returns true for [`Marker::Empty`].
    pub fn is_empty(self) -> bool {
        matches!(self, Marker::Empty)
    }

    /// Returns the owning seat of a stone.
    pub fn stone(self) -> Option<Seat> {
        match self {
            Marker::Stone(seat) => Some(seat),
            _ => None,
        }
    }

    /// Single-character plain-text glyph.
    pub fn glyph(self) -> char {
        match self {
            Marker::Empty => '.',
            Marker::Stone(Seat::One) => '1',
            Marker::Stone(Seat::Two) => '2',
            Marker::Ship => '#',
            Marker::Hit => 'x',
            Marker::Miss => 'o',
            Marker::Sunk => '*',
        }
    }
}
