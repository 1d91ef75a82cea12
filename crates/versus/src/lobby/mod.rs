//! Challenges: who may play whom, seat assignment and recording results.

mod error;

use std::sync::Arc;

use derive_getters::Getters;
use rand::Rng;
use tracing::{info, instrument, warn};
use versus_rules::GameKind;

use crate::config::VersusConfig;
use crate::db::{GameStore, Tally};
use crate::messenger::{Confirmation, Messenger};
use crate::registry::SessionRegistry;
use crate::session::{GameSession, SessionResult};
use crate::{Member, Player};

pub use error::{ChallengeRefusal, LobbyError};

/// What became of a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// Turned down without starting a session.
    Refused(ChallengeRefusal),
    /// The opponent declined or did not answer.
    Declined(Confirmation),
    /// A session ran.
    Played(SessionResult),
}

/// Entry point for starting games between chat members.
#[derive(Getters)]
pub struct Lobby {
    config: VersusConfig,
    registry: SessionRegistry,
    store: Arc<dyn GameStore>,
    messenger: Arc<dyn Messenger>,
}

impl std::fmt::Debug for Lobby {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lobby")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Lobby {
    /// Creates a lobby over a shared registry, store and transport.
    #[instrument(skip_all)]
    pub fn new(
        config: VersusConfig,
        registry: SessionRegistry,
        store: Arc<dyn GameStore>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        info!(bot_id = %config.bot_id(), "Creating lobby");
        Self {
            config,
            registry,
            store,
            messenger,
        }
    }

    fn refusal(&self, challenger: &Member, opponent: &Member) -> Option<ChallengeRefusal> {
        if opponent.id() == challenger.id() {
            Some(ChallengeRefusal::SelfChallenge)
        } else if opponent.id() == self.config.bot_id() {
            Some(ChallengeRefusal::BotChallenge)
        } else if self.registry.is_in_game(challenger.id()) {
            Some(ChallengeRefusal::ChallengerBusy)
        } else if self.registry.is_in_game(opponent.id()) {
            Some(ChallengeRefusal::OpponentBusy)
        } else {
            None
        }
    }

    /// Runs one challenge from request to recorded outcome.
    ///
    /// The opponent must accept within the challenge timeout. Seats are
    /// drawn at random, both members stay reserved while the session runs,
    /// and a completed session is recorded exactly once.
    #[instrument(skip(self), fields(game = %kind, challenger = %challenger.id(), opponent = %opponent.id()))]
    pub async fn challenge(
        &self,
        kind: GameKind,
        challenger: &Member,
        opponent: &Member,
    ) -> Result<ChallengeOutcome, LobbyError> {
        if let Some(refusal) = self.refusal(challenger, opponent) {
            return self.refuse(challenger, refusal).await;
        }

        let question = format!(
            "{opponent}, {challenger} challenges you to {}! respond with \"yes\" to accept",
            kind.title()
        );
        let answer = self
            .messenger
            .confirm(opponent, &question, self.config.challenge_timeout())
            .await?;
        info!(status = %answer, "Challenge answered");
        if !answer.is_accepted() {
            self.messenger
                .send_notice(&format!("{challenger}, {opponent} {answer} your challenge."))
                .await?;
            return Ok(ChallengeOutcome::Declined(answer));
        }

        // Either member may have joined another game while the question was open.
        let _reservation = match self
            .registry
            .reserve(&[challenger.id().as_str(), opponent.id().as_str()])
        {
            Ok(reservation) => reservation,
            Err(busy) => {
                let refusal = if &busy == challenger.id() {
                    ChallengeRefusal::ChallengerBusy
                } else {
                    ChallengeRefusal::OpponentBusy
                };
                return self.refuse(challenger, refusal).await;
            }
        };
        let challenger_first = rand::rng().random_bool(0.5);
        let (first, second) = if challenger_first {
            (challenger, opponent)
        } else {
            (opponent, challenger)
        };
        let players = Player::pair(kind, first.clone(), second.clone());

        let result = GameSession::new(kind, players, self.messenger.as_ref(), &self.config)
            .start()
            .await?;
        if let Some(outcome) = result.outcome() {
            self.store.record_outcome(
                kind,
                outcome.winner().id(),
                outcome.loser().id(),
                *outcome.tie(),
            )?;
            info!(%outcome, "Outcome recorded");
        }
        Ok(ChallengeOutcome::Played(result))
    }

    async fn refuse(
        &self,
        challenger: &Member,
        refusal: ChallengeRefusal,
    ) -> Result<ChallengeOutcome, LobbyError> {
        warn!(%refusal, "Challenge refused");
        self.messenger
            .send_notice(&format!("{challenger}, {refusal}"))
            .await?;
        Ok(ChallengeOutcome::Refused(refusal))
    }

    /// Record of one member in one game.
    #[instrument(skip(self))]
    pub fn tally(&self, user_id: &str, kind: GameKind) -> Result<Tally, LobbyError> {
        Ok(self.store.tally(user_id, kind)?)
    }
}
