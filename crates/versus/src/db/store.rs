//! The seam between finished sessions and persistence.

use versus_rules::GameKind;

use crate::db::{DbError, Tally};

/// Receives one outcome per completed session and answers record queries.
pub trait GameStore: Send + Sync {
    /// Adds a result for both players. On a tie both get a tie and the
    /// winner/loser order is meaningless.
    fn record_outcome(
        &self,
        game: GameKind,
        winner_id: &str,
        loser_id: &str,
        tie: bool,
    ) -> Result<(), DbError>;

    /// Record of one user in one game; all zeros when never played.
    fn tally(&self, user_id: &str, game: GameKind) -> Result<Tally, DbError>;
}
