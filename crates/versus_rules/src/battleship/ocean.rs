//! One player's private 10x10 ocean.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{PlacementError, Ship, ShipClass};
use crate::{Coord, Grid, Marker};

/// Side length of an ocean.
pub const OCEAN_SIZE: u8 = 10;

/// Outcome of one shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum ShotResult {
    /// Open water.
    #[display("Miss!")]
    Miss,
    /// A ship cell, ship still afloat.
    #[display("Hit!")]
    Hit,
    /// The last intact cell of a ship.
    #[display("Hit! {_0} sunk!")]
    Sunk(ShipClass),
}

/// A fleet on its own grid.
///
/// Grid markers: `Ship` for intact hull, `Hit` and `Sunk` for shot hull,
/// `Miss` for shot water.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ocean {
    grid: Grid,
    ships: Vec<Ship>,
    revealed: bool,
}

impl Ocean {
    /// Creates an empty ocean.
    pub fn new() -> Self {
        Self {
            grid: Grid::new(OCEAN_SIZE, OCEAN_SIZE),
            ships: Vec::new(),
            revealed: false,
        }
    }

    /// The squares.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Ships placed so far.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// True once all five ships are placed.
    pub fn is_complete(&self) -> bool {
        self.ships.len() == ShipClass::FLEET.len()
    }

    /// True when a placed ship covers `at`.
    pub fn is_occupied(&self, at: Coord) -> bool {
        self.ships.iter().any(|s| s.occupies(at))
    }

    /// Places a ship of `class` over `cells`.
    ///
    /// Cells must be on the grid, match the class length and not cover an
    /// already placed ship.
    #[instrument(skip(self, cells))]
    pub fn place(&mut self, class: ShipClass, cells: Vec<Coord>) -> Result<(), PlacementError> {
        if self.is_complete() {
            return Err(PlacementError::FleetComplete);
        }
        if cells.len() != usize::from(class.length()) {
            return Err(PlacementError::WrongLength {
                class,
                cells: cells.len(),
            });
        }
        if cells.iter().any(|c| !self.grid.contains(*c)) {
            return Err(PlacementError::OutOfBounds);
        }
        if cells.iter().any(|c| self.is_occupied(*c)) {
            return Err(PlacementError::Overlap);
        }
        for at in &cells {
            self.grid.set(*at, Marker::Ship);
        }
        debug!(%class, "Ship placed");
        self.ships.push(Ship::new(class, cells));
        Ok(())
    }

    /// True when `at` is on the grid and has not been shot.
    pub fn is_untouched(&self, at: Coord) -> bool {
        matches!(self.grid.get(at), Some(Marker::Empty | Marker::Ship))
    }

    /// Fires at `at`. Callers check [`Ocean::is_untouched`] first.
    #[instrument(skip(self))]
    pub fn fire(&mut self, at: Coord) -> ShotResult {
        let Some(ship) = self.ships.iter_mut().find(|s| s.occupies(at)) else {
            self.grid.set(at, Marker::Miss);
            return ShotResult::Miss;
        };
        ship.register_hit(at);
        if ship.is_sunk() {
            let class = ship.class();
            for cell in ship.cells() {
                self.grid.set(*cell, Marker::Sunk);
            }
            ShotResult::Sunk(class)
        } else {
            self.grid.set(at, Marker::Hit);
            ShotResult::Hit
        }
    }

    /// Total length of ships not yet sunk.
    pub fn remaining(&self) -> usize {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .map(|s| usize::from(s.class().length()))
            .sum()
    }

    /// Shows intact hull in the rendering from now on.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// True once revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Glyph for one square, hiding intact hull unless revealed.
    pub fn glyph(&self, marker: Marker) -> char {
        match marker {
            Marker::Ship if !self.revealed => '~',
            Marker::Empty => '~',
            other => other.glyph(),
        }
    }
}

impl Default for Ocean {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Ocean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid
            .render_with(f, |_, m| self.glyph(m), |x| x.to_string())
    }
}
