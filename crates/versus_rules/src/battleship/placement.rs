//! Fleet layout cursor used before a battleship match.
//!
//! A player steers one ship at a time over their private ocean with
//! `up`/`down`/`left`/`right`/`rotate` and fixes it with `ok`. Moves that
//! would leave the ocean are refused; `ok` is refused while the cursor covers
//! an already placed ship.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};
use tracing::{debug, instrument};

use super::{Ocean, ShipClass};
use crate::{Coord, Direction, Marker};

/// Why a placement step was refused.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PlacementError {
    /// Some cell would leave the ocean.
    #[display("Ship would leave the ocean")]
    OutOfBounds,
    /// Some cell covers an already placed ship.
    #[display("Ship overlaps another ship")]
    Overlap,
    /// Cell count does not match the class.
    #[display("{class} needs {} cells, got {cells}", class.length())]
    WrongLength {
        /// Class being placed.
        class: ShipClass,
        /// Cells supplied.
        cells: usize,
    },
    /// All five ships are already placed.
    #[display("Fleet already complete")]
    FleetComplete,
    /// Text that is not a placement command.
    #[display("Unknown command: {input}")]
    UnknownCommand {
        /// What was typed.
        input: String,
    },
}

/// One step of the layout cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementCommand {
    /// Shift the ship one square.
    Move(Direction),
    /// Turn the ship 90 degrees about its middle cell.
    Rotate,
    /// Fix the ship where it is.
    Confirm,
}

impl FromStr for PlacementCommand {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Move(Direction::Up)),
            "down" => Ok(Self::Move(Direction::Down)),
            "left" => Ok(Self::Move(Direction::Left)),
            "right" => Ok(Self::Move(Direction::Right)),
            "rotate" => Ok(Self::Rotate),
            "ok" => Ok(Self::Confirm),
            other => Err(PlacementError::UnknownCommand {
                input: other.to_string(),
            }),
        }
    }
}

/// Where the layout stands after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStatus {
    /// Still steering this ship.
    Placing(ShipClass),
    /// All five ships placed.
    Complete,
}

/// Layout cursor over a private ocean.
#[derive(Debug, Clone)]
pub struct ShipPlacement {
    ocean: Ocean,
    next: usize,
    cursor: Vec<Coord>,
}

impl ShipPlacement {
    /// Starts with the carrier at its default span.
    pub fn new() -> Self {
        Self {
            ocean: Ocean::new(),
            next: 0,
            cursor: ShipClass::FLEET[0].default_span(),
        }
    }

    /// Current status.
    pub fn status(&self) -> PlacementStatus {
        match ShipClass::FLEET.get(self.next) {
            Some(class) => PlacementStatus::Placing(*class),
            None => PlacementStatus::Complete,
        }
    }

    /// Cells of the ship being steered.
    pub fn cursor(&self) -> &[Coord] {
        &self.cursor
    }

    /// The ocean with every confirmed ship.
    pub fn ocean(&self) -> &Ocean {
        &self.ocean
    }

    /// Applies one command. A refused command leaves the layout unchanged.
    #[instrument(skip(self))]
    pub fn apply(&mut self, command: PlacementCommand) -> Result<PlacementStatus, PlacementError> {
        let PlacementStatus::Placing(class) = self.status() else {
            return Err(PlacementError::FleetComplete);
        };
        match command {
            PlacementCommand::Move(direction) => {
                let moved = self
                    .cursor
                    .iter()
                    .map(|c| c.step(direction, 1))
                    .collect::<Option<Vec<_>>>();
                self.cursor = self.checked(moved)?;
            }
            PlacementCommand::Rotate => {
                let turned = self.rotated();
                self.cursor = self.checked(turned)?;
            }
            PlacementCommand::Confirm => {
                self.ocean.place(class, self.cursor.clone())?;
                self.next += 1;
                if let PlacementStatus::Placing(upcoming) = self.status() {
                    self.cursor = upcoming.default_span();
                }
                debug!(%class, placed = self.next, "Ship confirmed");
            }
        }
        Ok(self.status())
    }

    /// Parses `text` as a command and applies it.
    pub fn apply_text(&mut self, text: &str) -> Result<PlacementStatus, PlacementError> {
        let command = text.parse::<PlacementCommand>()?;
        self.apply(command)
    }

    /// Hands over the finished ocean.
    pub fn into_ocean(self) -> Ocean {
        self.ocean
    }

    fn checked(&self, cells: Option<Vec<Coord>>) -> Result<Vec<Coord>, PlacementError> {
        match cells {
            Some(cells) if cells.iter().all(|c| self.ocean.grid().contains(*c)) => Ok(cells),
            _ => Err(PlacementError::OutOfBounds),
        }
    }

    /// Cursor turned counter-clockwise about its middle cell.
    fn rotated(&self) -> Option<Vec<Coord>> {
        let pivot = self.cursor[self.cursor.len() / 2];
        let (px, py) = (i16::from(pivot.x), i16::from(pivot.y));
        self.cursor
            .iter()
            .map(|c| {
                let (dx, dy) = (i16::from(c.x) - px, i16::from(c.y) - py);
                let (x, y) = (px - dy, py + dx);
                (x >= 1 && y >= 1).then(|| Coord::new(x as u8, y as u8))
            })
            .collect()
    }
}

impl Default for ShipPlacement {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShipPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            PlacementStatus::Placing(class) => writeln!(f, "Placing: {class}")?,
            PlacementStatus::Complete => writeln!(f, "All ships placed")?,
        }
        self.ocean.grid().render_with(
            f,
            |at, m| {
                let under_cursor = self.status() != PlacementStatus::Complete && self.cursor.contains(&at);
                match (under_cursor, m) {
                    (true, Marker::Ship) => '!',
                    (true, _) => '@',
                    (false, Marker::Ship) => '#',
                    _ => '~',
                }
            },
            |x| x.to_string(),
        )
    }
}
