//! Versus - turn-based two-player game sessions for chat bots
//!
//! Runs tic-tac-toe, connect-four, reversi, weiqi and battleship matches
//! between two chat members, talking to them only through a [`Messenger`],
//! and records wins, losses and ties in a [`GameStore`].
//!
//! # Architecture
//!
//! - **Lobby**: challenge refusals, acceptance, random seats, recording
//! - **Session**: the shared turn loop with per-game hooks
//! - **Messenger**: the chat transport contract, plus a terminal transport
//! - **Store**: SQLite records through diesel, or an in-memory store
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use versus::{ConsoleMessenger, Lobby, Member, MemoryStore, SessionRegistry, VersusConfig};
//! use versus_rules::GameKind;
//!
//! # async fn example() -> Result<(), versus::LobbyError> {
//! let ann = Member::named("ann");
//! let bo = Member::named("bo");
//! let messenger = Arc::new(ConsoleMessenger::stdio(&[ann.clone(), bo.clone()]));
//! let lobby = Lobby::new(
//!     VersusConfig::default(),
//!     SessionRegistry::new(),
//!     Arc::new(MemoryStore::new()),
//!     messenger,
//! );
//! lobby.challenge(GameKind::TicTacToe, &ann, &bo).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod error;
mod games;
mod grammar;
mod lobby;
mod messenger;
mod player;
mod registry;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, DB_ENV_VAR, GameSettings, VersusConfig};

// Crate-level exports - Persistence
pub use db::{DbError, GameRepository, GameStore, MemoryStore, NewWinLoss, Tally, WinLossRecord};

// Crate-level exports - Errors
pub use error::SessionError;

// Crate-level exports - Game variants
pub use games::{Battleship, ConnectFour, Reversi, TicTacToe, Weiqi, variant_for};

// Crate-level exports - Input parsing
pub use grammar::{Command, InputGrammar, is_affirmative};

// Crate-level exports - Lobby
pub use lobby::{ChallengeOutcome, ChallengeRefusal, Lobby, LobbyError};

// Crate-level exports - Messenger
pub use messenger::{
    Confirmation, ConsoleMessenger, MessageHandle, Messenger, MessengerError, ReactionReply, Reply,
};

// Crate-level exports - Players
pub use player::{Member, Player, PlayerId};

// Crate-level exports - Registry
pub use registry::{Reservation, SessionRegistry};

// Crate-level exports - Sessions
pub use session::{
    EndReason, Flow, GameSession, GameVariant, Outcome, SessionResult, Setup, Table, Turn,
};
