//! Per-game hooks around the shared turn loop.

use async_trait::async_trait;
use tracing::debug;
use versus_rules::{Board, Coord, MoveEffect};

use crate::error::SessionError;
use crate::grammar::Command;
use crate::messenger::Reply;
use crate::session::table::{INVALID, MALFORMED, OCCUPIED};
use crate::session::{EndReason, Table};

/// Result of the setup hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setup {
    /// Start the turn loop.
    Ready,
    /// Stop without an outcome.
    Aborted {
        /// Human-readable cause.
        reason: String,
    },
}

/// What the loop does after a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Carry on with this turn.
    Continue,
    /// Skip to the next player.
    Skip,
    /// Leave the loop.
    Stop,
}

/// What the player to move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// A legal square.
    Move(Coord),
    /// Two input windows passed without a move.
    TimedOut,
    /// Both players agreed to end now.
    EndAgreed,
}

/// One game's behaviour in a session.
///
/// Every hook has a default suitable for a plain typed-coordinate game;
/// games override what differs.
#[async_trait]
pub trait GameVariant: Send {
    /// The board being played.
    fn board(&self) -> &dyn Board;

    /// The board being played, mutably.
    fn board_mut(&mut self) -> &mut dyn Board;

    /// Before the first turn: seats notice and the first board rendering.
    async fn loop_begin(&mut self, table: &mut Table<'_>) -> Result<Setup, SessionError> {
        table.announce_seats().await?;
        table.show_board(self.board().to_string()).await?;
        Ok(Setup::Ready)
    }

    /// Start of a turn.
    async fn iter_begin(&mut self, table: &mut Table<'_>) -> Result<Flow, SessionError> {
        table.turn_prompt().await?;
        Ok(Flow::Continue)
    }

    /// Waits for a legal typed square, handling `flush`, `end` and timeouts.
    async fn get_coord(&mut self, table: &mut Table<'_>) -> Result<Turn, SessionError> {
        let mut nudged = false;
        loop {
            let text = match table.await_input().await? {
                Reply::TimedOut if nudged => return Ok(Turn::TimedOut),
                Reply::TimedOut => {
                    table.nudge().await?;
                    nudged = true;
                    continue;
                }
                Reply::Message(text) => text,
            };
            nudged = false;
            match table.grammar().parse(&text) {
                Command::Flush => table.flush().await?,
                Command::EndRequested => {
                    if table.request_end().await? {
                        return Ok(Turn::EndAgreed);
                    }
                }
                Command::Malformed => table.prompt(MALFORMED).await?,
                Command::Coordinate(at) => {
                    let board = self.board();
                    if board.is_valid_square(at, table.turn()) {
                        return Ok(Turn::Move(at));
                    }
                    let taken = board.grid().get(at).is_some_and(|m| !m.is_empty());
                    debug!(%at, taken, "Square refused");
                    table.prompt(if taken { OCCUPIED } else { INVALID }).await?;
                }
            }
        }
    }

    /// After a move was applied: refresh the board and look for a result.
    async fn iter_end(&mut self, table: &mut Table<'_>, effect: &MoveEffect) -> Result<Flow, SessionError> {
        debug!(at = %effect.at(), "Move applied");
        table.show_board(self.board().to_string()).await?;
        if self.check_board_win(table, None).await? {
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    /// The player to move stalled twice.
    async fn on_timeout(&mut self, table: &mut Table<'_>) -> Result<(), SessionError> {
        table.conclude_timeout().await
    }

    /// Both players agreed to stop.
    async fn on_end(&mut self, table: &mut Table<'_>) -> Result<(), SessionError> {
        self.check_board_win(table, Some(EndReason::Agreement)).await?;
        Ok(())
    }

    /// The turn bound was reached with no outcome.
    async fn loop_end(&mut self, table: &mut Table<'_>) -> Result<(), SessionError> {
        let seat = table.turn();
        table.conclude(seat, true, EndReason::TurnsExhausted, None).await
    }

    /// Reads the board and writes an outcome when it is decided, or when
    /// `forced` says the game must be settled now.
    async fn check_board_win(
        &mut self,
        table: &mut Table<'_>,
        forced: Option<EndReason>,
    ) -> Result<bool, SessionError> {
        let result = self.board().check_win();
        table.settle(result, forced).await
    }
}
