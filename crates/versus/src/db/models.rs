//! Win/loss rows and the store-neutral tally.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::schema;

/// One user's record in one game.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::win_loss)]
pub struct WinLossRecord {
    user_id: String,
    game: String,
    wins: i32,
    losses: i32,
    ties: i32,
    updated_at: NaiveDateTime,
}

impl WinLossRecord {
    /// The counts without the row metadata.
    #[instrument(skip(self), fields(user_id = %self.user_id, game = %self.game))]
    pub fn tally(&self) -> Tally {
        Tally::new(self.wins, self.losses, self.ties)
    }
}

/// Insertable first row for a user in a game.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::win_loss)]
pub struct NewWinLoss {
    user_id: String,
    game: String,
    wins: i32,
    losses: i32,
    ties: i32,
}

/// Wins, losses and ties of one user in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters, new)]
pub struct Tally {
    wins: i32,
    losses: i32,
    ties: i32,
}

impl Tally {
    /// Games played.
    #[instrument]
    pub fn played(&self) -> i32 {
        self.wins + self.losses + self.ties
    }

    /// Win rate as a percentage (0.0 to 100.0).
    #[instrument]
    pub fn win_rate(&self) -> f64 {
        if self.played() == 0 {
            0.0
        } else {
            (self.wins as f64 / self.played() as f64) * 100.0
        }
    }

    /// Adds one result. A tie counts for neither side's wins or losses.
    pub fn record(&mut self, won: bool, tie: bool) {
        match (tie, won) {
            (true, _) => self.ties += 1,
            (false, true) => self.wins += 1,
            (false, false) => self.losses += 1,
        }
    }
}
