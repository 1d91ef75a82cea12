//! The chat transport as the session engine sees it.
//!
//! A session talks to players only through [`Messenger`]: a public notice
//! line, one board message and one prompt message that are edited in place,
//! private messages for battleship fleet layout, and waits for the next
//! message or reaction from one member. Dropping a wait future cancels it.

mod console;

use std::time::Duration;

use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::instrument;

use crate::Member;

pub use console::ConsoleMessenger;

/// Opaque reference to a sent message, used to edit it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("message #{_0}")]
pub struct MessageHandle(pub u64);

/// Result of waiting for a typed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The member sent this text.
    Message(String),
    /// Nothing arrived in time.
    TimedOut,
}

/// Result of waiting for a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionReply {
    /// Index into the offered glyphs.
    Picked(usize),
    /// Nothing arrived in time.
    TimedOut,
}

/// Answer to a yes/no question put to one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Confirmation {
    /// Agreed.
    #[display("accepted")]
    Accepted,
    /// Answered with anything but agreement.
    #[display("rejected")]
    Declined,
    /// No answer in time.
    #[display("ignored")]
    TimedOut,
}

impl Confirmation {
    /// True only for [`Confirmation::Accepted`].
    pub fn is_accepted(self) -> bool {
        matches!(self, Confirmation::Accepted)
    }
}

/// Transport failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Messenger error: {} at {}:{}", message, file, line)]
pub struct MessengerError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MessengerError {
    /// Creates a new messenger error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for MessengerError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Everything a session needs from the chat platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Posts a one-off public line.
    async fn send_notice(&self, text: &str) -> Result<MessageHandle, MessengerError>;

    /// Posts the board rendering.
    async fn send_board(&self, rendering: &str) -> Result<MessageHandle, MessengerError>;

    /// Replaces the board rendering.
    async fn update_board(&self, handle: MessageHandle, rendering: &str) -> Result<(), MessengerError>;

    /// Posts the turn prompt.
    async fn send_prompt(&self, text: &str) -> Result<MessageHandle, MessengerError>;

    /// Replaces the turn prompt.
    async fn update_prompt(&self, handle: MessageHandle, text: &str) -> Result<(), MessengerError>;

    /// Waits up to `timeout` for the next message from `from`.
    async fn await_input(&self, from: &Member, timeout: Duration) -> Result<Reply, MessengerError>;

    /// Offers reaction glyphs on a message.
    async fn add_reactions(&self, handle: MessageHandle, glyphs: &[&str]) -> Result<(), MessengerError>;

    /// Waits up to `timeout` for `from` to pick one of `glyphs` on `on`.
    async fn await_reaction(
        &self,
        from: &Member,
        on: MessageHandle,
        glyphs: &[&str],
        timeout: Duration,
    ) -> Result<ReactionReply, MessengerError>;

    /// Asks `with` a yes/no question and waits up to `timeout`.
    async fn confirm(
        &self,
        with: &Member,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Confirmation, MessengerError>;

    /// Clears chat clutter posted after `since`.
    async fn flush(&self, since: MessageHandle) -> Result<(), MessengerError>;

    /// Sends a message only `to` can see.
    async fn send_private(&self, to: &Member, text: &str) -> Result<MessageHandle, MessengerError>;

    /// Replaces a private message.
    async fn update_private(
        &self,
        to: &Member,
        handle: MessageHandle,
        text: &str,
    ) -> Result<(), MessengerError>;
}
