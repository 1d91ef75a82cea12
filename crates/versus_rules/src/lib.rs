//! Versus rules - pure board logic for five two-player games.
//!
//! Every board shares one [`Grid`] arena of [`Marker`]s and implements the
//! [`Board`] contract: square validity, move application and win detection.
//! Nothing here performs I/O or waits on anything; the session engine in the
//! `versus` crate drives these types.
//!
//! # Example
//!
//! ```
//! use versus_rules::{Board, Coord, Seat, TicTacToeBoard, WinResult};
//!
//! let mut board = TicTacToeBoard::new();
//! for n in 1..=3 {
//!     board.set_square(Coord::new(n, n), Seat::One);
//! }
//! assert!(matches!(board.check_win(), WinResult::Line { seat: Seat::One, .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod battleship;
mod board;
mod connect_four;
mod coord;
mod grid;
mod kind;
mod reversi;
mod seat;
mod tictactoe;
mod weiqi;

pub use battleship::{
    BattleshipBoard, OCEAN_SIZE, Ocean, PlacementCommand, PlacementError, PlacementStatus, Ship,
    ShipClass, ShipPlacement, ShotResult,
};
pub use board::{Board, MoveEffect, Score, WinResult};
pub use connect_four::{COLUMNS, ConnectFourBoard, ROWS};
pub use coord::{Coord, Direction};
pub use grid::Grid;
pub use kind::{GameKind, GameRules};
pub use reversi::{CaptureLine, ReversiBoard};
pub use seat::{Marker, Seat};
pub use tictactoe::TicTacToeBoard;
pub use weiqi::{Group, WeiqiBoard};
