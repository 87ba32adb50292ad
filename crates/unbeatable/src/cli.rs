//! Command-line interface for unbeatable.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Unbeatable - tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Tic-tac-toe against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal as X
    Play {
        /// Path to the TOML settings file (defaults apply if it is missing)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Delay before the computer answers, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// File the game log is written to
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Evaluate a board and show the computer's move
    Analyze {
        /// Nine cells such as "XO./.X./..O" (X, O, and . for empty)
        board: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play out every human strategy and report the results
    Audit,
}
