//! The turn loop shared by every game.
//!
//! A session runs `loop_begin`, then for up to the game's turn bound hands
//! the turn to the other seat (seat one first), runs `iter_begin`, waits for
//! a move with `get_coord`, applies it to the board and runs `iter_end`.
//! Timeouts and agreed ends leave the loop through their own hooks, and
//! `loop_end` settles a game that ran out of turns. Games customise the hooks
//! through [`GameVariant`].

mod outcome;
mod table;
mod variant;

use tracing::{debug, info, instrument, warn};
use versus_rules::GameKind;

use crate::config::VersusConfig;
use crate::error::SessionError;
use crate::games;
use crate::messenger::Messenger;
use crate::Player;

pub use outcome::{EndReason, Outcome, SessionResult};
pub use table::Table;
pub use variant::{Flow, GameVariant, Setup, Turn};

/// One match between two seated players.
pub struct GameSession<'m> {
    table: Table<'m>,
    variant: Box<dyn GameVariant>,
}

impl std::fmt::Debug for GameSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("table", &self.table)
            .field("board", &self.variant.board())
            .finish()
    }
}

impl<'m> GameSession<'m> {
    /// Prepares a `kind` match; `players[0]` sits in seat one and moves first.
    pub fn new(
        kind: GameKind,
        players: [Player; 2],
        messenger: &'m dyn Messenger,
        config: &VersusConfig,
    ) -> Self {
        Self::with_variant(games::variant_for(kind), players, messenger, config)
    }

    /// Prepares a match around an existing variant, e.g. one holding a
    /// position set up in advance. The game is the one its board plays.
    #[instrument(skip_all, fields(one = %players[0], two = %players[1]))]
    pub fn with_variant(
        variant: Box<dyn GameVariant>,
        players: [Player; 2],
        messenger: &'m dyn Messenger,
        config: &VersusConfig,
    ) -> Self {
        let kind = variant.board().kind();
        info!(game = %kind, "Creating game session");
        Self {
            table: Table::new(kind, players, messenger, config),
            variant,
        }
    }

    /// Plays the match to its end.
    #[instrument(skip(self), fields(game = %self.table.kind()))]
    pub async fn start(mut self) -> Result<SessionResult, SessionError> {
        let table = &mut self.table;
        let variant = self.variant.as_mut();

        if let Setup::Aborted { reason } = variant.loop_begin(table).await? {
            warn!(%reason, "Session aborted during setup");
            return Ok(SessionResult::Aborted { reason });
        }

        let max_turns = *table.settings().max_turns();
        for turn in 1..=max_turns {
            let seat = table.advance();
            debug!(turn, %seat, "Turn begins");
            match variant.iter_begin(table).await? {
                Flow::Continue => {}
                Flow::Skip => continue,
                Flow::Stop => break,
            }
            match variant.get_coord(table).await? {
                Turn::Move(at) => {
                    let effect = variant.board_mut().set_square(at, seat);
                    if variant.iter_end(table, &effect).await? == Flow::Stop {
                        break;
                    }
                }
                Turn::TimedOut => {
                    variant.on_timeout(table).await?;
                    break;
                }
                Turn::EndAgreed => {
                    variant.on_end(table).await?;
                    break;
                }
            }
        }

        if !table.is_finished() {
            variant.loop_end(table).await?;
        }
        let outcome = table.take_outcome().ok_or(SessionError::NoOutcome)?;
        info!(%outcome, "Session complete");
        Ok(SessionResult::Completed(outcome))
    }
}
