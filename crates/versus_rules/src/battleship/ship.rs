//! Ship classes and hull state.

use serde::{Deserialize, Serialize};

use crate::Coord;

/// The five ship classes of a fleet, in placement order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum ShipClass {
    /// Five cells.
    Carrier,
    /// Four cells.
    Battleship,
    /// Three cells.
    Cruiser,
    /// Three cells.
    Submarine,
    /// Two cells.
    Destroyer,
}

impl ShipClass {
    /// Placement order of a full fleet.
    pub const FLEET: [ShipClass; 5] = [
        ShipClass::Carrier,
        ShipClass::Battleship,
        ShipClass::Cruiser,
        ShipClass::Submarine,
        ShipClass::Destroyer,
    ];

    /// Number of cells.
    pub fn length(self) -> u8 {
        match self {
            ShipClass::Carrier => 5,
            ShipClass::Battleship => 4,
            ShipClass::Cruiser | ShipClass::Submarine => 3,
            ShipClass::Destroyer => 2,
        }
    }

    /// Vertical span in column 5 where the placement cursor starts.
    pub fn default_span(self) -> Vec<Coord> {
        let first = match self {
            ShipClass::Carrier => 3,
            ShipClass::Battleship | ShipClass::Cruiser | ShipClass::Submarine => 4,
            ShipClass::Destroyer => 5,
        };
        (first..first + self.length())
            .map(|y| Coord::new(5, y))
            .collect()
    }

    /// Cells of a full fleet.
    pub fn fleet_cells() -> usize {
        Self::FLEET.iter().map(|c| usize::from(c.length())).sum()
    }
}

/// A placed ship: its class, the cells it covers and which of them are hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    class: ShipClass,
    cells: Vec<Coord>,
    hits: Vec<bool>,
}

impl Ship {
    /// Creates an unhit ship over `cells`. Length and bounds are checked by
    /// the ocean that accepts it.
    pub fn new(class: ShipClass, cells: Vec<Coord>) -> Self {
        let hits = vec![false; cells.len()];
        Self { class, cells, hits }
    }

    /// Ship class.
    pub fn class(&self) -> ShipClass {
        self.class
    }

    /// Covered cells.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// True when the ship covers `at`.
    pub fn occupies(&self, at: Coord) -> bool {
        self.cells.contains(&at)
    }

    /// Marks `at` as hit. Returns false when the ship does not cover `at`.
    pub fn register_hit(&mut self, at: Coord) -> bool {
        match self.cells.iter().position(|c| *c == at) {
            Some(i) => {
                self.hits[i] = true;
                true
            }
            None => false,
        }
    }

    /// True once every cell is hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.iter().all(|h| *h)
    }
}
