//! Weiqi (go): timed, scored by stones, territory and prisoners.

use async_trait::async_trait;
use versus_rules::{Board, WeiqiBoard};

use crate::error::SessionError;
use crate::session::{EndReason, Flow, GameVariant, Setup, Table};

/// Weiqi session variant. Scored at the time limit, on agreement, or when
/// the turn bound runs out.
#[derive(Debug, Default)]
pub struct Weiqi {
    board: WeiqiBoard,
}

#[async_trait]
impl GameVariant for Weiqi {
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

    async fn iter_begin(&mut self, table: &mut Table<'_>) -> Result<Flow, SessionError> {
        if table.is_out_of_time() {
            self.check_board_win(table, Some(EndReason::TimeLimit)).await?;
            return Ok(Flow::Stop);
        }
        table.turn_prompt().await?;
        Ok(Flow::Continue)
    }

    async fn loop_end(&mut self, table: &mut Table<'_>) -> Result<(), SessionError> {
        self.check_board_win(table, Some(EndReason::Score)).await?;
        Ok(())
    }
}
