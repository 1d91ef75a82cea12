//! Tic-tac-toe runs on the default hooks.

use versus_rules::{Board, TicTacToeBoard};

use crate::session::GameVariant;

/// Tic-tac-toe session variant.
#[derive(Debug, Default)]
pub struct TicTacToe {
    board: TicTacToeBoard,
}

impl GameVariant for TicTacToe {
    fn board(&self) -> &dyn Board {
        &self.board
    }

    fn board_mut(&mut self) -> &mut dyn Board {
        &mut self.board
    }
}
