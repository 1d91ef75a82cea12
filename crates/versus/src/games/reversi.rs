//! Reversi: timed, passes when a player cannot flank anything.

use async_trait::async_trait;
use tracing::{info, instrument};
use versus_rules::{Board, Marker, ReversiBoard};

use crate::error::SessionError;
use crate::session::{EndReason, Flow, GameVariant, Setup, Table};

/// Reversi session variant.
#[derive(Debug, Default)]
pub struct Reversi {
    board: ReversiBoard,
}

impl Reversi {
    /// Plays on from `board` instead of the standard opening.
    pub fn from_board(board: ReversiBoard) -> Self {
        Self { board }
    }
}

#[async_trait]
impl GameVariant for Reversi {
    fn board(&self) -> &dyn Board {
        &self.board
    }

    fn board_mut(&mut self) -> &mut dyn Board {
        &mut self.board
    }

    async fn loop_begin(&mut self, table: &mut Table<'_>) -> Result<Setup, SessionError> {
        table.announce_time_limit().await?;
        table.show_board(self.board.to_string()).await?;
        Ok(Setup::Ready)
    }

    #[instrument(skip_all, fields(seat = %table.turn()))]
    async fn iter_begin(&mut self, table: &mut Table<'_>) -> Result<Flow, SessionError> {
        if table.is_out_of_time() {
            self.check_board_win(table, Some(EndReason::TimeLimit)).await?;
            return Ok(Flow::Stop);
        }
        let seat = table.turn();
        if !self.board.has_legal_move(seat) {
            if !self.board.has_legal_move(seat.other()) {
                info!("Neither player can move");
                self.check_board_win(table, Some(EndReason::NoMoves)).await?;
                return Ok(Flow::Stop);
            }
            let text = format!("{} has no legal move and passes.", table.current());
            table.notice(&text).await?;
            return Ok(Flow::Skip);
        }
        table.turn_prompt().await?;
        Ok(Flow::Continue)
    }

    async fn loop_end(&mut self, table: &mut Table<'_>) -> Result<(), SessionError> {
        self.check_board_win(table, Some(EndReason::Score)).await?;
        Ok(())
    }

    /// Scores once the board is full; otherwise only when forced.
    async fn check_board_win(
        &mut self,
        table: &mut Table<'_>,
        forced: Option<EndReason>,
    ) -> Result<bool, SessionError> {
        let full = self.board.grid().count(Marker::Empty) == 0;
        let forced = forced.or(full.then_some(EndReason::Score));
        table.settle(self.board.check_win(), forced).await
    }
}
