//! Connect-four is played with reactions on the board message.

use async_trait::async_trait;
use tracing::{debug, instrument};
use versus_rules::{Board, ConnectFourBoard, Coord, COLUMNS};

use crate::error::SessionError;
use crate::messenger::ReactionReply;
use crate::session::{GameVariant, Setup, Table, Turn};

/// One glyph per column, left to right.
const COLUMN_GLYPHS: [&str; COLUMNS as usize] = ["1", "2", "3", "4", "5", "6", "7"];

const COLUMN_FULL: &str = "that column is full. pick another column";

/// Connect-four session variant. Typed input, `end` and `flush` are not
/// offered.
#[derive(Debug, Default)]
pub struct ConnectFour {
    board: ConnectFourBoard,
}

#[async_trait]
impl GameVariant for ConnectFour {
    fn board(&self) -> &dyn Board {
        &self.board
    }

    fn board_mut(&mut self) -> &mut dyn Board {
        &mut self.board
    }

    #[instrument(skip_all)]
    async fn loop_begin(&mut self, table: &mut Table<'_>) -> Result<Setup, SessionError> {
        table.announce_seats().await?;
        table.show_board(self.board.to_string()).await?;
        if let Some(handle) = table.board_message() {
            table.messenger().add_reactions(handle, &COLUMN_GLYPHS).await?;
        }
        Ok(Setup::Ready)
    }

    async fn get_coord(&mut self, table: &mut Table<'_>) -> Result<Turn, SessionError> {
        let Some(handle) = table.board_message() else {
            return Err(SessionError::MissingBoard);
        };
        let wait = table.settings().input_wait();
        let mut nudged = false;
        loop {
            let reply = table
                .messenger()
                .await_reaction(table.current().member(), handle, &COLUMN_GLYPHS, wait)
                .await?;
            let index = match reply {
                ReactionReply::TimedOut if nudged => return Ok(Turn::TimedOut),
                ReactionReply::TimedOut => {
                    table.nudge().await?;
                    nudged = true;
                    continue;
                }
                ReactionReply::Picked(index) => index,
            };
            nudged = false;
            let column = Coord::new(index as u8 + 1, 1);
            if self.board.is_valid_square(column, table.turn()) {
                return Ok(Turn::Move(column));
            }
            debug!(column = column.x, "Column refused");
            table.prompt(COLUMN_FULL).await?;
        }
    }
}
