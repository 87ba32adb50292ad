//! Terminal front end for the unbeatable tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **CLI**: `play`, `analyze` and `audit` subcommands
//! - **Config**: [`Settings`] loaded from TOML with defaults
//! - **TUI**: ratatui board view; the computer's reply is deferred on a
//!   tokio task and discarded if the game was reset in the meantime
//! - **Analysis**: one-shot evaluation of a board string
//!
//! # Example
//!
//! ```
//! use unbeatable::analyze;
//! use unbeatable_tictactoe::{Board, Position};
//!
//! let board: Board = "XX./OO./X..".parse().unwrap();
//! let analysis = analyze(&board);
//! let reply = analysis.computer_move().as_ref().unwrap();
//! assert_eq!(*reply.position(), Position::MiddleRight);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analyze;
mod cli;
mod config;
mod logging;
mod tui;

pub use analyze::{Analysis, analyze};
pub use cli::{Cli, Command};
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, Settings};
pub use logging::{DEFAULT_FILTER, init_file_logging, init_stderr_logging};
pub use tui::{Action, App, action_for, defer_computer_move, move_cursor, run_tui};
