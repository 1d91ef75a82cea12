//! Tic-tac-toe: 3x3, three in a row.

use std::fmt;

use tracing::instrument;

use crate::{Board, Coord, GameKind, Grid, Marker, MoveEffect, Seat, WinResult};

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeBoard {
    grid: Grid,
}

impl TicTacToeBoard {
    /// Creates an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self { grid: Grid::new(3, 3) }
    }

    /// True when no square is empty.
    pub fn is_full(&self) -> bool {
        self.grid.count(Marker::Empty) == 0
    }
}

impl Default for TicTacToeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for TicTacToeBoard {
    fn kind(&self) -> GameKind {
        GameKind::TicTacToe
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn is_valid_square(&self, at: Coord, _seat: Seat) -> bool {
        self.grid.get(at) == Some(Marker::Empty)
    }

    #[instrument(skip(self))]
    fn set_square(&mut self, at: Coord, seat: Seat) -> MoveEffect {
        self.grid.set(at, Marker::Stone(seat));
        MoveEffect::Placed { at }
    }

    fn check_win(&self) -> WinResult {
        match self.grid.find_run(3) {
            Some((seat, cells)) => WinResult::Line { seat, cells },
            None => WinResult::Undecided,
        }
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.render_with(
            f,
            |_, m| match m {
                Marker::Stone(Seat::One) => 'X',
                Marker::Stone(Seat::Two) => 'O',
                _ => '?',
            },
            |x| x.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(TicTacToeBoard::new().check_win(), WinResult::Undecided);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = TicTacToeBoard::new();
        for x in 1..=3 {
            board.set_square(Coord::new(x, 3), Seat::Two);
        }
        assert!(matches!(board.check_win(), WinResult::Line { seat: Seat::Two, .. }));
    }

    #[test]
    fn test_anti_diagonal() {
        let mut board = TicTacToeBoard::new();
        board.set_square(Coord::new(3, 1), Seat::One);
        board.set_square(Coord::new(2, 2), Seat::One);
        board.set_square(Coord::new(1, 3), Seat::One);
        assert!(matches!(board.check_win(), WinResult::Line { seat: Seat::One, .. }));
    }

    #[test]
    fn test_occupied_square_is_invalid() {
        let mut board = TicTacToeBoard::new();
        board.set_square(Coord::new(2, 2), Seat::One);
        assert!(!board.is_valid_square(Coord::new(2, 2), Seat::Two));
        assert!(!board.is_valid_square(Coord::new(4, 1), Seat::Two));
        assert!(board.is_valid_square(Coord::new(1, 1), Seat::Two));
    }
}
