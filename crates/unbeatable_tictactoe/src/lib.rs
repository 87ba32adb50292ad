//! Unbeatable tic-tac-toe engine.
//!
//! A human (X) plays against a computer (O) that picks every move by
//! exhaustive minimax search, so it never loses.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Cell`], [`Position`]
//! - **Outcome evaluator**: [`evaluate`], [`Outcome`], [`WinPattern`]
//! - **Minimax search**: [`Minimax`]
//! - **Turn controller**: [`TurnController`] over a [`GameSession`]
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{Outcome, TurnController, TurnState};
//!
//! let mut game = TurnController::new();
//! assert_eq!(game.apply_human_move(4), Ok(Outcome::InProgress));
//! assert_eq!(game.state(), TurnState::ComputerThinking);
//!
//! let reply = game.request_computer_move().unwrap();
//! assert_eq!(game.state(), TurnState::WaitingForHuman);
//! assert!(!reply.outcome().is_terminal());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod audit;
mod contracts;
mod controller;
mod error;
mod invariants;
mod outcome;
mod position;
mod rules;
mod search;
mod session;
mod types;

pub use action::Move;
pub use audit::{AuditReport, audit_all_strategies};
pub use contracts::{CellIsEmpty, Contract, MoveContract, PlayersTurn, SessionLive};
pub use controller::{COMPUTER, ComputerMove, HUMAN, MoveTicket, TurnController, TurnState};
pub use error::{BoardParseError, MoveError};
pub use invariants::{
    AlternatingMarksInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, SessionInvariants, TerminalConsistentInvariant,
};
pub use outcome::{DRAW, O_WINS, Outcome, Score, X_WINS};
pub use position::Position;
pub use rules::{LineGeometry, Orientation, WinPattern, check_winner, evaluate, is_full};
pub use search::{Minimax, SearchResult};
pub use session::GameSession;
pub use types::{Board, Cell, Player};
