//! Command-line interface for versus.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use versus_rules::GameKind;

/// Versus - turn-based two-player games for chat
#[derive(Parser, Debug)]
#[command(name = "versus")]
#[command(about = "Turn-based two-player board games with win/loss records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "versus.toml")]
    pub config: PathBuf,

    /// Override the database path from the config
    #[arg(long)]
    pub db: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat game in this terminal (type `name: text` per line)
    Play {
        /// tictactoe, connectfour, reversi, weiqi or battleship
        game: GameKind,

        /// Name of the challenger
        challenger: String,

        /// Name of the opponent, who must accept
        opponent: String,

        /// Keep results in memory instead of the database
        #[arg(long)]
        memory: bool,
    },

    /// Show a player's wins, losses and ties
    Stats {
        /// Player id
        user: String,

        /// Only this game
        #[arg(short, long)]
        game: Option<GameKind>,
    },

    /// Show the best players of one game
    Leaderboard {
        /// Game to rank
        game: GameKind,

        /// Number of rows
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Create the database and apply migrations
    InitDb,
}
