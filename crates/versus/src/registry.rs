//! Tracks which members are currently in a game.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};

use crate::PlayerId;

/// Shared "in a game" set. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    ingame: Arc<Mutex<HashSet<PlayerId>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<PlayerId>> {
        self.ingame.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True while `id` holds a reservation.
    #[instrument(skip(self))]
    pub fn is_in_game(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    /// Reserves every id at once, or none when any is already in a game,
    /// in which case the first busy id is returned.
    /// The reservation is released when the guard drops.
    #[instrument(skip(self))]
    pub fn reserve(&self, ids: &[&str]) -> Result<Reservation, PlayerId> {
        let mut ingame = self.lock();
        if let Some(busy) = ids.iter().find(|id| ingame.contains(**id)) {
            warn!(player_id = %busy, "Already in a game");
            return Err((*busy).to_string());
        }
        for id in ids {
            ingame.insert((*id).to_string());
        }
        debug!(count = ingame.len(), "Players reserved");
        Ok(Reservation {
            registry: self.clone(),
            ids: ids.iter().map(|id| (*id).to_string()).collect(),
        })
    }

    /// Ids currently in a game, sorted.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<PlayerId> {
        let mut ids: Vec<_> = self.lock().iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Drops every reservation, e.g. after a restart.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        let mut ingame = self.lock();
        info!(count = ingame.len(), "Clearing registry");
        ingame.clear();
    }
}

/// Holds members in the registry until dropped.
#[derive(Debug)]
pub struct Reservation {
    registry: SessionRegistry,
    ids: Vec<PlayerId>,
}

impl Reservation {
    /// Ids held by this reservation.
    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        let mut ingame = self.registry.lock();
        for id in &self.ids {
            ingame.remove(id);
        }
        debug!(ids = ?self.ids, "Reservation released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_is_released_on_drop() {
        let registry = SessionRegistry::new();
        let guard = registry.reserve(&["ann", "bo"]).unwrap();
        assert!(registry.is_in_game("ann"));
        assert_eq!(registry.reserve(&["cy", "bo"]).unwrap_err(), "bo");
        assert!(!registry.is_in_game("cy"));
        drop(guard);
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_clear() {
        let registry = SessionRegistry::new();
        let guard = registry.reserve(&["ann"]).unwrap();
        registry.clear();
        assert!(!registry.is_in_game("ann"));
        drop(guard);
    }
}
