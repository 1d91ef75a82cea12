//! SQLite repository for win/loss records.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};
use versus_rules::GameKind;

use crate::db::{DbError, GameStore, NewWinLoss, Tally, WinLossRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Win/loss records in a SQLite file. Opens a connection per call.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// Use `":memory:"` only for single-call checks; every call opens a fresh
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies pending schema migrations. Returns how many ran.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let applied = conn.run_pending_migrations(MIGRATIONS)?;
        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Adds one result for one user, creating the row on first play.
    fn bump(
        conn: &mut SqliteConnection,
        user: &str,
        game: &str,
        won: bool,
        tie: bool,
    ) -> Result<(), DbError> {
        use schema::win_loss::dsl;

        let existing = dsl::win_loss
            .find((user, game))
            .select(WinLossRecord::as_select())
            .first(conn)
            .optional()?;

        let mut tally = existing.as_ref().map(WinLossRecord::tally).unwrap_or_default();
        tally.record(won, tie);

        match existing {
            Some(_) => {
                diesel::update(dsl::win_loss.find((user, game)))
                    .set((
                        dsl::wins.eq(*tally.wins()),
                        dsl::losses.eq(*tally.losses()),
                        dsl::ties.eq(*tally.ties()),
                        dsl::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
            }
            None => {
                let row = NewWinLoss::new(
                    user.to_string(),
                    game.to_string(),
                    *tally.wins(),
                    *tally.losses(),
                    *tally.ties(),
                );
                diesel::insert_into(dsl::win_loss).values(&row).execute(conn)?;
            }
        }
        debug!(user, game, ?tally, "Record updated");
        Ok(())
    }

    /// Records a finished game for both players in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record_outcome(
        &self,
        game: GameKind,
        winner_id: &str,
        loser_id: &str,
        tie: bool,
    ) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let game = game.to_string();
        conn.transaction::<_, DbError, _>(|conn| {
            Self::bump(conn, winner_id, &game, true, tie)?;
            Self::bump(conn, loser_id, &game, false, tie)?;
            Ok(())
        })?;
        info!(winner = winner_id, loser = loser_id, tie, "Outcome recorded");
        Ok(())
    }

    /// Gets a user's record in one game. Returns `None` if never played.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_record(&self, user_id: &str, game: GameKind) -> Result<Option<WinLossRecord>, DbError> {
        use schema::win_loss::dsl;

        let mut conn = self.connection()?;
        let record = dsl::win_loss
            .find((user_id, game.to_string()))
            .select(WinLossRecord::as_select())
            .first(&mut conn)
            .optional()?;
        debug!(found = record.is_some(), "Record lookup");
        Ok(record)
    }

    /// Every game a user has a record in, alphabetically by game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn records_for_user(&self, user_id: &str) -> Result<Vec<WinLossRecord>, DbError> {
        use schema::win_loss::dsl;

        let mut conn = self.connection()?;
        let records = dsl::win_loss
            .filter(dsl::user_id.eq(user_id))
            .order(dsl::game.asc())
            .select(WinLossRecord::as_select())
            .load(&mut conn)?;
        info!(count = records.len(), "User records loaded");
        Ok(records)
    }

    /// Top records of one game: most wins first, then fewest losses.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, game: GameKind, limit: i64) -> Result<Vec<WinLossRecord>, DbError> {
        use schema::win_loss::dsl;

        let mut conn = self.connection()?;
        let records = dsl::win_loss
            .filter(dsl::game.eq(game.to_string()))
            .order((dsl::wins.desc(), dsl::losses.asc(), dsl::user_id.asc()))
            .limit(limit)
            .select(WinLossRecord::as_select())
            .load(&mut conn)?;
        info!(count = records.len(), "Leaderboard loaded");
        Ok(records)
    }
}

impl GameStore for GameRepository {
    fn record_outcome(
        &self,
        game: GameKind,
        winner_id: &str,
        loser_id: &str,
        tie: bool,
    ) -> Result<(), DbError> {
        GameRepository::record_outcome(self, game, winner_id, loser_id, tie)
    }

    fn tally(&self, user_id: &str, game: GameKind) -> Result<Tally, DbError> {
        Ok(self
            .get_record(user_id, game)?
            .map(|r| r.tally())
            .unwrap_or_default())
    }
}
