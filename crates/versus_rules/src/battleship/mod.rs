//! Battleship: private oceans, fleet layout and the shared firing board.

mod ocean;
mod placement;
mod shared;
mod ship;

pub use ocean::{OCEAN_SIZE, Ocean, ShotResult};
pub use placement::{PlacementCommand, PlacementError, PlacementStatus, ShipPlacement};
pub use shared::BattleshipBoard;
pub use ship::{Ship, ShipClass};
