//! The shared firing board built from two finished oceans.

use std::fmt;

use tracing::{info, instrument};

use super::Ocean;
use crate::{Board, Coord, GameKind, Grid, Marker, MoveEffect, Score, Seat, WinResult};

/// Routes each seat's shots to the opponent's ocean.
///
/// Seat one (red) owns `oceans[0]`, seat two (blue) `oceans[1]`. The board
/// shows the ocean currently being fired at, selected with
/// [`BattleshipBoard::set_viewer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleshipBoard {
    oceans: [Ocean; 2],
    viewer: Seat,
}

impl BattleshipBoard {
    /// Builds the board from seat one's and seat two's oceans.
    #[instrument(skip_all)]
    pub fn new(one: Ocean, two: Ocean) -> Self {
        Self {
            oceans: [one, two],
            viewer: Seat::One,
        }
    }

    /// Ocean owned by `seat`.
    pub fn ocean(&self, seat: Seat) -> &Ocean {
        &self.oceans[seat.index()]
    }

    /// Selects whose turn it is; the rendering then shows the target ocean.
    pub fn set_viewer(&mut self, seat: Seat) {
        self.viewer = seat;
    }

    /// Seat whose turn the rendering is prepared for.
    pub fn viewer(&self) -> Seat {
        self.viewer
    }

    /// Ocean that `seat` fires at.
    fn target(&self, seat: Seat) -> &Ocean {
        self.ocean(seat.other())
    }

    /// Unsunk ship cells of seat one and seat two.
    pub fn remaining(&self) -> Score {
        Score {
            one: self.oceans[0].remaining(),
            two: self.oceans[1].remaining(),
        }
    }

    /// Reveals both fleets.
    #[instrument(skip(self))]
    pub fn reveal(&mut self) {
        info!("Revealing both fleets");
        for ocean in &mut self.oceans {
            ocean.reveal();
        }
    }

    /// Both oceans, red first, each under its owner's colour.
    pub fn render_both(&self) -> String {
        format!(
            "Red's Ocean\n{}\n\nBlue's Ocean\n{}",
            self.oceans[0], self.oceans[1]
        )
    }
}

impl Board for BattleshipBoard {
    fn kind(&self) -> GameKind {
        GameKind::Battleship
    }

    fn grid(&self) -> &Grid {
        self.target(self.viewer).grid()
    }

    fn is_valid_square(&self, at: Coord, seat: Seat) -> bool {
        self.target(seat).is_untouched(at)
    }

    #[instrument(skip(self))]
    fn set_square(&mut self, at: Coord, seat: Seat) -> MoveEffect {
        let result = self.oceans[seat.other().index()].fire(at);
        MoveEffect::Shot { at, result }
    }

    fn check_win(&self) -> WinResult {
        WinResult::Remaining(self.remaining())
    }

    fn admits(&self, marker: Marker) -> bool {
        !matches!(marker, Marker::Stone(_))
    }
}

impl fmt::Display for BattleshipBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.viewer.other() {
            Seat::One => writeln!(f, "Red's Ocean")?,
            Seat::Two => writeln!(f, "Blue's Ocean")?,
        }
        write!(f, "{}", self.target(self.viewer))
    }
}
