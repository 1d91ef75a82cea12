//! How a session ended.

use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use versus_rules::Score;

use crate::Member;

/// Why the turn loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum EndReason {
    /// A completed line of stones.
    #[display("line")]
    Line,
    /// Final points compared.
    #[display("score")]
    Score,
    /// Every ship of one side sunk.
    #[display("fleet sunk")]
    FleetSunk,
    /// The wall-clock limit ran out; points compared.
    #[display("time limit")]
    TimeLimit,
    /// A player let the input wait run out twice.
    #[display("timeout")]
    Timeout,
    /// Both players agreed to end early.
    #[display("agreement")]
    Agreement,
    /// Neither player had a legal move.
    #[display("no moves")]
    NoMoves,
    /// The turn bound was reached.
    #[display("turns exhausted")]
    TurnsExhausted,
}

/// Terminal result of a completed session, written exactly once.
///
/// On a tie `winner` and `loser` are both players in no meaningful order.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Display)]
#[display("{winner} beat {loser} ({reason})")]
pub struct Outcome {
    winner: Member,
    loser: Member,
    tie: bool,
    reason: EndReason,
    score: Option<Score>,
}

impl Outcome {
    pub(crate) fn new(
        winner: Member,
        loser: Member,
        tie: bool,
        reason: EndReason,
        score: Option<Score>,
    ) -> Self {
        Self {
            winner,
            loser,
            tie,
            reason,
            score,
        }
    }
}

/// What [`crate::GameSession::start`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResult {
    /// The game was played to an outcome that should be recorded.
    Completed(Outcome),
    /// Setup failed; nothing to record.
    Aborted {
        /// Human-readable cause.
        reason: String,
    },
}

impl SessionResult {
    /// The outcome of a completed session.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            SessionResult::Completed(outcome) => Some(outcome),
            SessionResult::Aborted { .. } => None,
        }
    }
}
