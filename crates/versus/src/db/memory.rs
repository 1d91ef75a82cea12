//! In-process store for console play without a database and for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};
use versus_rules::GameKind;

use crate::db::{DbError, GameStore, Tally};

/// Tallies kept in a shared map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tallies: Arc<Mutex<HashMap<(String, GameKind), Tally>>>,
    outcomes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many outcomes were recorded.
    pub fn outcome_count(&self) -> usize {
        *self.outcomes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self))]
    fn record_outcome(
        &self,
        game: GameKind,
        winner_id: &str,
        loser_id: &str,
        tie: bool,
    ) -> Result<(), DbError> {
        let mut tallies = self.tallies.lock().unwrap_or_else(|e| e.into_inner());
        tallies
            .entry((winner_id.to_string(), game))
            .or_default()
            .record(true, tie);
        tallies
            .entry((loser_id.to_string(), game))
            .or_default()
            .record(false, tie);
        *self.outcomes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        debug!("Outcome stored in memory");
        Ok(())
    }

    fn tally(&self, user_id: &str, game: GameKind) -> Result<Tally, DbError> {
        let tallies = self.tallies.lock().unwrap_or_else(|e| e.into_inner());
        Ok(tallies
            .get(&(user_id.to_string(), game))
            .copied()
            .unwrap_or_default())
    }
}
