//! Shared per-session state the game hooks act on.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};
use versus_rules::{GameKind, Score, Seat, ShipClass, WinResult};

use crate::config::{GameSettings, VersusConfig};
use crate::error::SessionError;
use crate::grammar::InputGrammar;
use crate::messenger::{MessageHandle, Messenger, Reply};
use crate::session::{EndReason, Outcome};
use crate::Player;

pub(crate) const OCCUPIED: &str = "that spot is already occupied. pick another spot";
pub(crate) const INVALID: &str = "invalid spot. try another place";
pub(crate) const MALFORMED: &str = "off board range or incorrect format. try again";
const END_REQUEST: &str = "your opponent wants to end the game now. respond with \"yes\" if you agree, or say no to continue";
const CONTINUE: &str = "your opponent wants to continue! (send coordinates)";

/// Players, messages, clock and outcome of one running session.
pub struct Table<'m> {
    kind: GameKind,
    settings: GameSettings,
    end_confirm_timeout: Duration,
    placement_timeout: Duration,
    players: [Player; 2],
    messenger: &'m dyn Messenger,
    grammar: InputGrammar,
    board_msg: Option<MessageHandle>,
    prompt_msg: Option<MessageHandle>,
    outcome: Option<Outcome>,
    started: Instant,
    turn: Seat,
}

impl std::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("kind", &self.kind)
            .field("players", &self.players)
            .field("turn", &self.turn)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl<'m> Table<'m> {
    /// Seats `players` for a `kind` match. The first advance hands the turn
    /// to seat one.
    pub(crate) fn new(
        kind: GameKind,
        players: [Player; 2],
        messenger: &'m dyn Messenger,
        config: &VersusConfig,
    ) -> Self {
        Self {
            kind,
            settings: config.settings(kind),
            end_confirm_timeout: config.end_confirm_timeout(),
            placement_timeout: config.placement_timeout(),
            players,
            messenger,
            grammar: InputGrammar::for_game(kind),
            board_msg: None,
            prompt_msg: None,
            outcome: None,
            started: Instant::now(),
            turn: Seat::Two,
        }
    }

    /// Which game is played.
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Timing and turn bound.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Fleet layout inactivity window.
    pub fn placement_timeout(&self) -> Duration {
        self.placement_timeout
    }

    /// The chat transport.
    pub fn messenger(&self) -> &'m dyn Messenger {
        self.messenger
    }

    /// Move grammar of this game.
    pub fn grammar(&self) -> &InputGrammar {
        &self.grammar
    }

    /// Player in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Seat to move.
    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// Player to move.
    pub fn current(&self) -> &Player {
        self.player(self.turn)
    }

    /// Player waiting.
    pub fn opponent(&self) -> &Player {
        self.player(self.turn.other())
    }

    /// Hands the turn to the other seat.
    pub(crate) fn advance(&mut self) -> Seat {
        self.turn = self.turn.other();
        self.turn
    }

    /// Wall-clock time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True once the wall-clock limit of a timed game has run out.
    pub fn is_out_of_time(&self) -> bool {
        self.settings
            .time_limit()
            .is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Handle of the board message, once sent.
    pub fn board_message(&self) -> Option<MessageHandle> {
        self.board_msg
    }

    /// True once an outcome has been written.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The outcome written so far.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub(crate) fn take_outcome(&mut self) -> Option<Outcome> {
        self.outcome.take()
    }

    /// Posts a one-off public line.
    pub async fn notice(&self, text: &str) -> Result<MessageHandle, SessionError> {
        Ok(self.messenger.send_notice(text).await?)
    }

    /// Posts who plays which colour.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub async fn announce_seats(&self) -> Result<(), SessionError> {
        self.notice(&self.seats_text()).await?;
        Ok(())
    }

    /// Posts the game's time limit above the seats notice. Falls back to the
    /// plain seats notice for untimed games.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub async fn announce_time_limit(&self) -> Result<(), SessionError> {
        let Some(limit) = self.settings.time_limit() else {
            return self.announce_seats().await;
        };
        let secs = limit.as_secs();
        let span = if secs % 60 == 0 {
            format!("{} minutes", secs / 60)
        } else {
            format!("{secs} seconds")
        };
        let text = format!("Time limit: {span}!\n{}", self.seats_text());
        self.notice(&text).await?;
        Ok(())
    }

    fn seats_text(&self) -> String {
        let [one, two] = &self.players;
        format!("{}: {}, {}: {}", one.symbol(), one, two.symbol(), two)
    }

    /// Sends the board message the first time, edits it afterwards.
    pub async fn show_board(&mut self, rendering: String) -> Result<(), SessionError> {
        match self.board_msg {
            Some(handle) => self.messenger.update_board(handle, &rendering).await?,
            None => self.board_msg = Some(self.messenger.send_board(&rendering).await?),
        }
        Ok(())
    }

    /// Sends the prompt message the first time, edits it afterwards.
    pub async fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        match self.prompt_msg {
            Some(handle) => self.messenger.update_prompt(handle, text).await?,
            None => self.prompt_msg = Some(self.messenger.send_prompt(text).await?),
        }
        Ok(())
    }

    /// Tells the player to move what to do.
    pub async fn turn_prompt(&mut self) -> Result<(), SessionError> {
        let hint = match self.kind {
            GameKind::ConnectFour => "(pick a column)",
            _ => "(send coordinates)",
        };
        let text = format!("{} {}'s turn! {}", self.current(), self.current().symbol(), hint);
        self.prompt(&text).await
    }

    /// Waits one input window for the player to move.
    #[instrument(skip(self), fields(game = %self.kind, player_id = %self.current().id()))]
    pub async fn await_input(&self) -> Result<Reply, SessionError> {
        let reply = self
            .messenger
            .await_input(self.current().member(), self.settings.input_wait())
            .await?;
        Ok(reply)
    }

    /// The one-time reminder after the first timeout.
    pub async fn nudge(&self) -> Result<(), SessionError> {
        debug!(player_id = %self.current().id(), "Input window passed, nudging");
        self.notice(&format!("{} hurry up!", self.current())).await?;
        Ok(())
    }

    /// Clears chat clutter posted after the prompt.
    pub async fn flush(&self) -> Result<(), SessionError> {
        if let Some(handle) = self.prompt_msg {
            self.messenger.flush(handle).await?;
        }
        Ok(())
    }

    /// Asks the opponent to agree to ending now. On refusal play resumes and
    /// the mover is told so.
    #[instrument(skip(self), fields(game = %self.kind, player_id = %self.current().id()))]
    pub async fn request_end(&mut self) -> Result<bool, SessionError> {
        let answer = self
            .messenger
            .confirm(self.opponent().member(), END_REQUEST, self.end_confirm_timeout)
            .await?;
        info!(status = %answer, "End request answered");
        if answer.is_accepted() {
            return Ok(true);
        }
        self.prompt(CONTINUE).await?;
        Ok(false)
    }

    /// Writes the outcome and announces it. Later calls are ignored.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub async fn conclude(
        &mut self,
        winner: Seat,
        tie: bool,
        reason: EndReason,
        score: Option<Score>,
    ) -> Result<(), SessionError> {
        if self.outcome.is_some() {
            warn!("Outcome already written, ignoring");
            return Ok(());
        }
        let ratio = score
            .map(|s| format!(" {}:{}", s.of(winner), s.of(winner.other())))
            .unwrap_or_default();
        let prefix = if reason == EndReason::TimeLimit { "Time's up - " } else { "" };
        let text = if tie {
            format!("{prefix}Draw!{ratio}")
        } else {
            let player = self.player(winner);
            format!("{prefix}Winner is {}, {}.{ratio}", player.symbol(), player)
        };
        self.outcome = Some(Outcome::new(
            self.player(winner).member().clone(),
            self.player(winner.other()).member().clone(),
            tie,
            reason,
            score,
        ));
        info!(winner = %self.player(winner), tie, %reason, "Session concluded");
        self.prompt(&text).await
    }

    /// Ends the session with the player to move as the loser for stalling.
    pub async fn conclude_timeout(&mut self) -> Result<(), SessionError> {
        let loser = self.turn;
        self.conclude(loser.other(), false, EndReason::Timeout, None).await?;
        let text = format!(
            "game ended. {} is winner, because {} took too long.",
            self.player(loser.other()),
            self.player(loser)
        );
        self.notice(&text).await?;
        Ok(())
    }

    /// Turns a board result into an outcome.
    ///
    /// Lines and sunk fleets always decide. Points and partly sunk fleets
    /// decide only when `forced` names why the game is being settled; a
    /// forced undecided board is a draw. Returns whether an outcome was
    /// written.
    #[instrument(skip(self), fields(game = %self.kind))]
    pub async fn settle(
        &mut self,
        result: WinResult,
        forced: Option<EndReason>,
    ) -> Result<bool, SessionError> {
        match (result, forced) {
            (WinResult::Line { seat, .. }, _) => {
                self.conclude(seat, false, EndReason::Line, None).await?;
            }
            (WinResult::Remaining(left), forced) => {
                let fleet = ShipClass::fleet_cells();
                let damage = Score {
                    one: fleet - left.two,
                    two: fleet - left.one,
                };
                let reason = forced.unwrap_or(EndReason::FleetSunk);
                if left.two == 0 {
                    self.conclude(Seat::One, false, EndReason::FleetSunk, Some(damage)).await?;
                } else if left.one == 0 {
                    self.conclude(Seat::Two, false, EndReason::FleetSunk, Some(damage)).await?;
                } else if forced.is_some() {
                    self.conclude_points(damage, reason).await?;
                } else {
                    return Ok(false);
                }
            }
            (WinResult::Score(score), Some(reason)) => {
                self.conclude_points(score, reason).await?;
            }
            (WinResult::Undecided, Some(reason)) => {
                self.conclude(self.turn, true, reason, None).await?;
            }
            (WinResult::Score(_) | WinResult::Undecided, None) => return Ok(false),
        }
        Ok(true)
    }

    /// More points wins; equal points is a tie credited to the mover.
    async fn conclude_points(&mut self, score: Score, reason: EndReason) -> Result<(), SessionError> {
        match score.leader() {
            Some(seat) => self.conclude(seat, false, reason, Some(score)).await,
            None => self.conclude(self.turn, true, reason, Some(score)).await,
        }
    }
}
