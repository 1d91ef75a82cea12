//! Versus - unified CLI
//!
//! Hot-seat play in the terminal plus win/loss queries.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use versus::{
    ChallengeOutcome, ConsoleMessenger, GameRepository, GameStore, Lobby, Member, MemoryStore,
    SessionRegistry, SessionResult, VersusConfig,
};
use versus_rules::GameKind;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout is the game table; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,versus=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = VersusConfig::load(&cli.config)?;
    if let Some(db) = cli.db {
        config = config.with_database_path(db);
    }

    match cli.command {
        Command::Play {
            game,
            challenger,
            opponent,
            memory,
        } => play(config, game, challenger, opponent, memory).await,
        Command::Stats { user, game } => stats(&config, &user, game),
        Command::Leaderboard { game, limit } => leaderboard(&config, game, limit),
        Command::InitDb => init_db(&config),
    }
}

/// Opens the configured database and applies migrations.
fn open_repository(config: &VersusConfig) -> Result<GameRepository> {
    let repository = GameRepository::new(config.database_path().clone())?;
    repository.run_migrations()?;
    Ok(repository)
}

/// Runs one challenge at this terminal.
#[instrument(skip(config))]
async fn play(
    config: VersusConfig,
    game: GameKind,
    challenger: String,
    opponent: String,
    memory: bool,
) -> Result<()> {
    let store: Arc<dyn GameStore> = if memory {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(open_repository(&config)?)
    };
    let challenger = Member::named(challenger);
    let opponent = Member::named(opponent);
    let messenger = Arc::new(ConsoleMessenger::stdio(&[
        challenger.clone(),
        opponent.clone(),
    ]));
    let lobby = Lobby::new(config, SessionRegistry::new(), store, messenger);

    info!("Starting hot-seat game");
    match lobby.challenge(game, &challenger, &opponent).await? {
        ChallengeOutcome::Refused(refusal) => println!("Challenge refused: {refusal}"),
        ChallengeOutcome::Declined(answer) => println!("Challenge {answer}"),
        ChallengeOutcome::Played(SessionResult::Aborted { reason }) => {
            println!("Game called off: {reason}")
        }
        ChallengeOutcome::Played(SessionResult::Completed(outcome)) => {
            for member in [outcome.winner(), outcome.loser()] {
                let tally = lobby.tally(member.id(), game)?;
                println!(
                    "{member}: {} wins, {} losses, {} ties",
                    tally.wins(),
                    tally.losses(),
                    tally.ties()
                );
            }
        }
    }
    Ok(())
}

/// Prints one player's records.
#[instrument(skip(config))]
fn stats(config: &VersusConfig, user: &str, game: Option<GameKind>) -> Result<()> {
    let repository = open_repository(config)?;
    let records = match game {
        Some(game) => repository.get_record(user, game)?.into_iter().collect(),
        None => repository.records_for_user(user)?,
    };
    if records.is_empty() {
        println!("{user} has not played yet");
    }
    for record in records {
        let tally = record.tally();
        println!(
            "{:<12} {:>4} W {:>4} L {:>4} T  {:5.1}%",
            record.game(),
            tally.wins(),
            tally.losses(),
            tally.ties(),
            tally.win_rate()
        );
    }
    Ok(())
}

/// Prints the top players of one game.
#[instrument(skip(config))]
fn leaderboard(config: &VersusConfig, game: GameKind, limit: i64) -> Result<()> {
    let repository = open_repository(config)?;
    println!("{} leaderboard", game.title());
    for (rank, record) in repository.leaderboard(game, limit)?.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>4} W {:>4} L {:>4} T",
            rank + 1,
            record.user_id(),
            record.wins(),
            record.losses(),
            record.ties()
        );
    }
    Ok(())
}

/// Creates the database file and schema.
#[instrument(skip(config))]
fn init_db(config: &VersusConfig) -> Result<()> {
    let repository = GameRepository::new(config.database_path().clone())?;
    let applied = repository.run_migrations()?;
    println!("{}: {applied} migrations applied", repository.db_path());
    Ok(())
}
