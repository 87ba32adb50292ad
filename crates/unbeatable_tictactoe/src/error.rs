//! Error types for the engine.
//!
//! Every error here is recoverable: the engine reports the rejection and
//! leaves all state unchanged.

use crate::controller::TurnState;
use crate::position::Position;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum MoveError {
    /// The requested cell index is outside 0-8.
    #[display("Cell index {index} is outside the board (0-8)")]
    InvalidIndex {
        /// The rejected index.
        index: usize,
    },

    /// The cell at the position is already occupied.
    #[display("Cell {position} is already occupied")]
    IllegalMove {
        /// The occupied position.
        position: Position,
    },

    /// A move was submitted while it is not the mover's turn, or after the game ended.
    #[display("Move rejected: {state}")]
    OutOfTurn {
        /// State of the turn controller when the move arrived.
        state: TurnState,
    },

    /// A mark was placed for the player who is not next on the board.
    #[display("It's not {player}'s turn to mark the board")]
    WrongMark {
        /// The player whose mark was rejected.
        player: Player,
    },

    /// A deferred computer move was superseded by a reset or a later ply.
    #[display(
        "Deferred move for generation {ticket_generation} ply {ticket_ply} no longer applies \
         (current generation {current_generation} ply {current_ply})"
    )]
    StaleTicket {
        /// Generation the ticket was issued for.
        ticket_generation: u64,
        /// Ply the ticket was issued for.
        ticket_ply: usize,
        /// Live session generation.
        current_generation: u64,
        /// Live session ply.
        current_ply: usize,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Error parsing a board from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// The text did not describe exactly nine cells.
    #[display("Expected 9 cells, found {found}")]
    WrongLength {
        /// Number of cells found.
        found: usize,
    },

    /// A character that is neither a mark, an empty marker nor a separator.
    #[display("Unknown mark {mark:?}")]
    UnknownMark {
        /// The offending character.
        mark: char,
    },

    /// The marks cannot come from alternating play with X first.
    #[display("Marks do not alternate: {x} X and {o} O")]
    Unbalanced {
        /// Number of X marks.
        x: usize,
        /// Number of O marks.
        o: usize,
    },
}

impl std::error::Error for BoardParseError {}
