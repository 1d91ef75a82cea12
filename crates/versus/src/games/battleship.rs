//! Battleship: private fleet layout, then alternating shots.
//!
//! Both players lay out their fleets at the same time through private
//! messages. If either stalls past the placement timeout the match is
//! called off and nothing is recorded. The shared board then shows each
//! shooter the opponent's ocean, and both fleets are revealed once the game
//! is over.

use std::time::Duration;

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{info, instrument, warn};
use versus_rules::{
    BattleshipBoard, Board, MoveEffect, Ocean, PlacementError, PlacementStatus, Seat,
    ShipPlacement,
};

use crate::error::SessionError;
use crate::messenger::{Messenger, MessengerError, Reply};
use crate::session::{EndReason, Flow, GameVariant, Setup, Table};
use crate::Player;

const LAYOUT_HELP: &str = "(up/down/left/right/rotate, ok to place)";
const LAYOUT_DONE: &str = "All done! Now just wait for your opponent.";

/// Why a fleet layout did not finish.
#[derive(Debug, Display, Error)]
enum FleetError {
    /// The player in this seat let the placement timeout pass.
    #[display("Seat {_0} stalled during fleet layout")]
    Stalled(#[error(not(source))] Seat),
    /// The transport failed.
    #[display("{_0}")]
    Messenger(MessengerError),
}

impl From<MessengerError> for FleetError {
    fn from(err: MessengerError) -> Self {
        FleetError::Messenger(err)
    }
}

/// Battleship session variant.
#[derive(Debug)]
pub struct Battleship {
    board: BattleshipBoard,
}

impl Default for Battleship {
    fn default() -> Self {
        Self {
            board: BattleshipBoard::new(Ocean::new(), Ocean::new()),
        }
    }
}

fn layout_text(layout: &ShipPlacement, refused: Option<&PlacementError>) -> String {
    let heading = match layout.status() {
        PlacementStatus::Placing(class) => format!("Lay out your ships! - {class}"),
        PlacementStatus::Complete => "Fleet ready.".to_string(),
    };
    let mut text = format!("{heading}\n{layout}\n{LAYOUT_HELP}");
    if let Some(err) = refused {
        text.push_str(&format!("\n{err}"));
    }
    text
}

/// Runs one player's layout cursor until all five ships are placed.
#[instrument(skip(messenger, player), fields(player_id = %player.id()))]
async fn place_fleet(
    messenger: &dyn Messenger,
    player: &Player,
    timeout: Duration,
) -> Result<Ocean, FleetError> {
    let member = player.member();
    let mut layout = ShipPlacement::new();
    let handle = messenger.send_private(member, &layout_text(&layout, None)).await?;
    while let PlacementStatus::Placing(class) = layout.status() {
        let text = match messenger.await_input(member, timeout).await? {
            Reply::Message(text) => text,
            Reply::TimedOut => {
                warn!(%class, "Fleet layout stalled");
                return Err(FleetError::Stalled(*player.seat()));
            }
        };
        let refused = layout.apply_text(&text).err();
        messenger
            .update_private(member, handle, &layout_text(&layout, refused.as_ref()))
            .await?;
    }
    messenger.send_private(member, LAYOUT_DONE).await?;
    info!("Fleet laid out");
    Ok(layout.into_ocean())
}

#[async_trait]
impl GameVariant for Battleship {
    fn board(&self) -> &dyn Board {
        &self.board
    }

    fn board_mut(&mut self) -> &mut dyn Board {
        &mut self.board
    }

    #[instrument(skip_all)]
    async fn loop_begin(&mut self, table: &mut Table<'_>) -> Result<Setup, SessionError> {
        table.announce_seats().await?;
        let messenger = table.messenger();
        let timeout = table.placement_timeout();
        let placed = tokio::try_join!(
            place_fleet(messenger, table.player(Seat::One), timeout),
            place_fleet(messenger, table.player(Seat::Two), timeout),
        );
        let (one, two) = match placed {
            Ok(oceans) => oceans,
            Err(FleetError::Messenger(err)) => return Err(err.into()),
            Err(FleetError::Stalled(seat)) => {
                let stalled = table.player(seat).member();
                let waiting = table.player(seat.other()).member();
                messenger.send_private(stalled, "You timed out.").await?;
                messenger.send_private(waiting, "Your opponent timed out.").await?;
                table.notice(&format!("{stalled} timed out.")).await?;
                return Ok(Setup::Aborted {
                    reason: format!("{stalled} timed out during fleet layout"),
                });
            }
        };
        self.board = BattleshipBoard::new(one, two);
        table.show_board(self.board.to_string()).await?;
        Ok(Setup::Ready)
    }

    async fn iter_begin(&mut self, table: &mut Table<'_>) -> Result<Flow, SessionError> {
        self.board.set_viewer(table.turn());
        table.show_board(self.board.to_string()).await?;
        table.turn_prompt().await?;
        Ok(Flow::Continue)
    }

    async fn iter_end(&mut self, table: &mut Table<'_>, effect: &MoveEffect) -> Result<Flow, SessionError> {
        if let MoveEffect::Shot { at, result } = effect {
            table.notice(&format!("{} fires at {at}: {result}", table.current())).await?;
        }
        table.show_board(self.board.to_string()).await?;
        if self.check_board_win(table, None).await? {
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    async fn on_timeout(&mut self, table: &mut Table<'_>) -> Result<(), SessionError> {
        table.conclude_timeout().await?;
        self.board.reveal();
        table.notice(&self.board.render_both()).await?;
        Ok(())
    }

    /// Sunk fleets decide; when forced, more afloat wins. Reveals both
    /// fleets once decided.
    async fn check_board_win(
        &mut self,
        table: &mut Table<'_>,
        forced: Option<EndReason>,
    ) -> Result<bool, SessionError> {
        let decided = table.settle(self.board.check_win(), forced).await?;
        if decided {
            self.board.reveal();
            table.notice(&self.board.render_both()).await?;
        }
        Ok(decided)
    }
}
