//! Connect-four: 7 columns, 6 rows, gravity, four in a row.

use std::fmt;

use tracing::instrument;

use crate::{Board, Coord, GameKind, Grid, Marker, MoveEffect, Seat, WinResult};

/// Number of columns.
pub const COLUMNS: u8 = 7;
/// Number of rows.
pub const ROWS: u8 = 6;

/// Connect-four board. Moves name a column; `y` is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectFourBoard {
    grid: Grid,
}

impl ConnectFourBoard {
    /// Creates an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            grid: Grid::new(COLUMNS, ROWS),
        }
    }

    /// Lowest empty square of column `x`, `None` when the column is full or
    /// does not exist.
    pub fn landing_square(&self, x: u8) -> Option<Coord> {
        if x < 1 || x > COLUMNS {
            return None;
        }
        self.grid
            .column(x)
            .find(|c| self.grid.get(*c) == Some(Marker::Empty))
    }

    /// Writes a marker directly, bypassing gravity. Used to seed positions.
    pub fn seed(&mut self, at: Coord, marker: Marker) {
        self.grid.set(at, marker);
    }
}

impl Default for ConnectFourBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for ConnectFourBoard {
    fn kind(&self) -> GameKind {
        GameKind::ConnectFour
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn is_valid_square(&self, at: Coord, _seat: Seat) -> bool {
        self.landing_square(at.x).is_some()
    }

    #[instrument(skip(self))]
    fn set_square(&mut self, at: Coord, seat: Seat) -> MoveEffect {
        let landed = self.landing_square(at.x).unwrap_or(at);
        self.grid.set(landed, Marker::Stone(seat));
        MoveEffect::Dropped { at: landed }
    }

    fn check_win(&self) -> WinResult {
        match self.grid.find_run(4) {
            Some((seat, cells)) => WinResult::Line { seat, cells },
            None => WinResult::Undecided,
        }
    }
}

impl fmt::Display for ConnectFourBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.render_with(
            f,
            |_, m| match m {
                Marker::Stone(Seat::One) => 'Y',
                Marker::Stone(Seat::Two) => 'R',
                _ => '.',
            },
            |x| x.to_string(),
        )
    }
}
