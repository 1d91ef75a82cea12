//! Runtime configuration loaded from TOML.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use versus_rules::GameKind;

/// Environment variable overriding the database path.
pub const DB_ENV_VAR: &str = "VERSUS_DB";

/// Per-game timing and turn bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct GameSettings {
    /// Seconds to wait for each input.
    input_wait_secs: u64,
    /// Wall-clock limit of the whole match, for timed games.
    #[serde(default)]
    time_limit_secs: Option<u64>,
    /// Upper bound of turn loop iterations.
    max_turns: u32,
}

impl GameSettings {
    /// Defaults for one game: 30 s waits for the quick games, 45 s otherwise;
    /// 10 minutes for reversi and 20 for weiqi.
    #[instrument]
    pub fn for_game(kind: GameKind) -> Self {
        let rules = kind.rules();
        let (input_wait_secs, time_limit_secs) = match kind {
            GameKind::TicTacToe | GameKind::ConnectFour => (30, None),
            GameKind::Reversi => (45, Some(10 * 60)),
            GameKind::Weiqi => (45, Some(20 * 60)),
            GameKind::Battleship => (45, None),
        };
        Self {
            input_wait_secs,
            time_limit_secs,
            max_turns: rules.max_turns,
        }
    }

    /// Input wait as a duration.
    pub fn input_wait(&self) -> Duration {
        Duration::from_secs(self.input_wait_secs)
    }

    /// Match time limit as a duration.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct VersusConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// Identity of the bot account; nobody may challenge it.
    #[serde(default = "default_bot_id")]
    bot_id: String,

    /// Seconds an opponent has to accept a challenge.
    #[serde(default = "default_challenge_timeout")]
    challenge_timeout_secs: u64,

    /// Seconds an opponent has to agree to end a game early.
    #[serde(default = "default_end_confirm_timeout")]
    end_confirm_timeout_secs: u64,

    /// Seconds of inactivity allowed during battleship fleet layout.
    #[serde(default = "default_placement_timeout")]
    placement_timeout_secs: u64,

    /// Per-game overrides, keyed by game name.
    #[serde(default)]
    games: HashMap<GameKind, GameSettings>,
}

#[instrument]
fn default_database_path() -> String {
    "versus.db".to_string()
}

#[instrument]
fn default_bot_id() -> String {
    "versus-bot".to_string()
}

#[instrument]
fn default_challenge_timeout() -> u64 {
    30
}

#[instrument]
fn default_end_confirm_timeout() -> u64 {
    80
}

#[instrument]
fn default_placement_timeout() -> u64 {
    20
}

impl Default for VersusConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            bot_id: default_bot_id(),
            challenge_timeout_secs: default_challenge_timeout(),
            end_confirm_timeout_secs: default_end_confirm_timeout(),
            placement_timeout_secs: default_placement_timeout(),
            games: HashMap::new(),
        }
    }
}

impl VersusConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        debug!(games = config.games.len(), "Config parsed");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(database = %config.database_path, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise starts from defaults. Applies
    /// the `VERSUS_DB` override afterwards.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            warn!("Config file not found, using defaults");
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Applies environment overrides.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(DB_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                info!(%path, "Database path overridden from environment");
                self.with_database_path(path)
            }
            _ => self,
        }
    }

    /// Settings for one game: the configured override or the game's defaults.
    #[instrument(skip(self))]
    pub fn settings(&self, kind: GameKind) -> GameSettings {
        self.games
            .get(&kind)
            .copied()
            .unwrap_or_else(|| GameSettings::for_game(kind))
    }

    /// Replaces the settings of one game.
    pub fn with_game(mut self, kind: GameKind, settings: GameSettings) -> Self {
        self.games.insert(kind, settings);
        self
    }

    /// Challenge acceptance window.
    pub fn challenge_timeout(&self) -> Duration {
        Duration::from_secs(self.challenge_timeout_secs)
    }

    /// End agreement window.
    pub fn end_confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.end_confirm_timeout_secs)
    }

    /// Fleet layout inactivity window.
    pub fn placement_timeout(&self) -> Duration {
        Duration::from_secs(self.placement_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
