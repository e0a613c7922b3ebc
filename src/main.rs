//! Space Dodgers headless driver
//!
//! Runs the session engine without a window: a bot plays through the fixed
//! tick loop, and the leaderboard can be inspected or compacted.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use space_dodgers::consts::LEADERBOARD_ROWS;
use space_dodgers::sim::{GameEvent, GamePhase, GameSession, autopilot_input};
use space_dodgers::{Difficulty, FileStore, LeaderboardStore, Settings};

#[derive(Parser, Debug)]
#[command(name = "space-dodgers")]
#[command(about = "Dodge falling stars; survival time is your score")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, default_value = "settings.json")]
    config: PathBuf,
    /// Leaderboard file, overriding the settings
    #[arg(long)]
    leaderboard: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Let the bot play one run and record its score
    Simulate {
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many ticks even if still alive
        #[arg(long, default_value_t = 60 * 60 * 10)]
        max_ticks: u64,
    },
    /// Print the ranked leaderboard
    Leaderboard {
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long, default_value_t = LEADERBOARD_ROWS)]
        top: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rewrite the leaderboard file sorted by score
    Compact,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.config);
    if let Some(path) = cli.leaderboard {
        settings.leaderboard_path = path;
    }
    let board = LeaderboardStore::new(FileStore::new(&settings.leaderboard_path));

    match cli.command {
        Commands::Simulate {
            difficulty,
            name,
            seed,
            max_ticks,
        } => {
            if let Some(name) = name {
                settings.player_name = name;
            }
            if seed.is_some() {
                settings.seed = seed;
            }
            let difficulty = difficulty.unwrap_or_else(|| settings.difficulty.to_string());
            simulate(&settings, board, &difficulty, max_ticks)
        }
        Commands::Leaderboard {
            difficulty,
            top,
            json,
        } => {
            let filter = difficulty
                .map(|d| d.parse::<Difficulty>())
                .transpose()
                .context("invalid --difficulty")?;
            let rows = board.top_n(filter, top);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No scores yet");
            } else {
                for (i, row) in rows.iter().enumerate() {
                    println!(
                        "{}. {}: {} ({})",
                        i + 1,
                        row.player_name,
                        row.score,
                        row.difficulty
                    );
                }
            }
            Ok(())
        }
        Commands::Compact => {
            let mut board = board;
            let records = board
                .records()
                .context("leaderboard has malformed records; not rewriting")?;
            let count = records.len();
            board.save(records)?;
            println!("Rewrote {count} records");
            Ok(())
        }
    }
}

fn simulate(
    settings: &Settings,
    board: LeaderboardStore<FileStore>,
    difficulty: &str,
    max_ticks: u64,
) -> Result<()> {
    let mut session = GameSession::new(settings.session_config(), board);
    session
        .start(difficulty)
        .with_context(|| format!("cannot start on {difficulty:?}"))?;
    log::info!(
        "Simulating {} on {} ({}ms ticks)",
        session.player_name(),
        difficulty,
        settings.tick_ms
    );

    for _ in 0..max_ticks {
        let input = autopilot_input(&session);
        for event in session.tick(&input, settings.tick_ms) {
            match event {
                GameEvent::Escalated { velocity_delta } => {
                    log::debug!("Obstacles sped up by {velocity_delta}")
                }
                GameEvent::GameOver { record } => {
                    println!("YOU LOST! Final Score: {}", record.score);
                    return Ok(());
                }
                _ => {}
            }
        }
        if session.phase() != GamePhase::Playing {
            bail!("session left play unexpectedly ({:?})", session.phase());
        }
    }

    println!(
        "Survived {} ticks ({}s) without a hit; score not recorded",
        max_ticks,
        session.score()
    );
    Ok(())
}
