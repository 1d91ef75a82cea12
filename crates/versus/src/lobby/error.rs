//! Challenge refusals and lobby failures.

use derive_more::{Display, Error};

use crate::db::DbError;
use crate::error::SessionError;
use crate::messenger::MessengerError;

/// Why a challenge was turned down before asking the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChallengeRefusal {
    /// The challenger is already playing.
    #[display("you are already in a game")]
    ChallengerBusy,
    /// The opponent is already playing.
    #[display("your opponent is already in a game")]
    OpponentBusy,
    /// Challenger and opponent are the same member.
    #[display("you can't play against yourself")]
    SelfChallenge,
    /// The opponent is the bot.
    #[display("I don't play games, sorry")]
    BotChallenge,
}

/// Failure while running a challenge.
#[derive(Debug, Display, Error)]
pub enum LobbyError {
    /// The chat transport failed.
    #[display("{_0}")]
    Messenger(MessengerError),
    /// The session failed.
    #[display("{_0}")]
    Session(SessionError),
    /// The outcome could not be recorded.
    #[display("{_0}")]
    Store(DbError),
}

impl From<MessengerError> for LobbyError {
    fn from(err: MessengerError) -> Self {
        LobbyError::Messenger(err)
    }
}

impl From<SessionError> for LobbyError {
    fn from(err: SessionError) -> Self {
        LobbyError::Session(err)
    }
}

impl From<DbError> for LobbyError {
    fn from(err: DbError) -> Self {
        LobbyError::Store(err)
    }
}
