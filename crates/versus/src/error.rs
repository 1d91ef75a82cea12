//! Errors raised while running a session.

use derive_more::{Display, Error};

use crate::messenger::MessengerError;

/// Failure that ends one session.
#[derive(Debug, Clone, Display, Error)]
pub enum SessionError {
    /// The chat transport failed.
    #[display("{_0}")]
    Messenger(MessengerError),
    /// The turn loop stopped without writing an outcome.
    #[display("Session ended without an outcome")]
    NoOutcome,
    /// A reaction was awaited before the board message was sent.
    #[display("Board message was never sent")]
    MissingBoard,
}

impl From<MessengerError> for SessionError {
    fn from(err: MessengerError) -> Self {
        SessionError::Messenger(err)
    }
}
