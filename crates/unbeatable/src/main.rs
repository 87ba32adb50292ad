//! Unbeatable - tic-tac-toe against a minimax opponent.

#![warn(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use unbeatable::{
    Cli, Command, Settings, analyze, init_file_logging, init_stderr_logging, run_tui,
};
use unbeatable_tictactoe::{Board, TurnController, audit_all_strategies};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            delay_ms,
            log_file,
        } => run_play(config, delay_ms, log_file).await,
        Command::Analyze { board, json } => run_analyze(&board, json),
        Command::Audit => run_audit(),
    }
}

/// Run the interactive terminal game
async fn run_play(
    config: PathBuf,
    delay_ms: Option<u64>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let settings = Settings::load(&config)?.with_overrides(delay_ms, log_file);

    // Log to file so the alternate screen stays clean
    init_file_logging(settings.log_file())?;
    info!(config = %config.display(), ?settings, "Starting Unbeatable TUI");

    run_tui(settings).await
}

/// Evaluate a board string and print the computer's choice
#[instrument]
fn run_analyze(board: &str, json: bool) -> Result<()> {
    init_stderr_logging();

    let board: Board = board
        .parse()
        .with_context(|| format!("Invalid board {:?}", board))?;
    let analysis = analyze(&board);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", analysis);
    }
    Ok(())
}

/// Play out every human strategy against the search
#[instrument]
fn run_audit() -> Result<()> {
    init_stderr_logging();

    let report = audit_all_strategies(&TurnController::new());
    println!("{}", report);

    if !report.computer_never_loses() {
        warn!(human_wins = *report.human_wins(), "Search lost at least one game");
        bail!("The computer lost {} games", report.human_wins());
    }
    info!("Computer never loses");
    Ok(())
}
