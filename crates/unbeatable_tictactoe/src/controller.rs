//! Turn controller: alternates the human and the computer.
//!
//! The controller is a small state machine over a [`GameSession`]:
//!
//! ```text
//! WaitingForHuman --human move--> ComputerThinking --computer move--> WaitingForHuman
//!        \                               \
//!         +--------- terminal -----------+--------> GameOver
//! ```
//!
//! `reset` returns to `WaitingForHuman` from any state with a fresh session
//! and a new generation. Rejected requests never change state.

use crate::action::Move;
use crate::contracts::{Contract, MoveContract};
use crate::error::MoveError;
use crate::outcome::Outcome;
use crate::position::Position;
use crate::search::Minimax;
use crate::session::GameSession;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// The human always plays X and moves first.
pub const HUMAN: Player = Player::X;
/// The computer always plays O.
pub const COMPUTER: Player = Player::O;

/// Phase of the turn controller.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum TurnState {
    /// The human (X) may place a mark.
    #[default]
    #[display("waiting for the human")]
    WaitingForHuman,
    /// The computer (O) owes a move.
    #[display("the computer is thinking")]
    ComputerThinking,
    /// The game has been won or drawn.
    #[display("the game is over")]
    GameOver,
}

/// Token for a deferred computer move.
///
/// Binds the move to the session generation and ply it was issued for, so a
/// move that fires after a reset is discarded instead of landing on the new
/// board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct MoveTicket {
    generation: u64,
    ply: usize,
}

/// A move the computer made.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new, derive_getters::Getters,
)]
pub struct ComputerMove {
    /// Cell the computer marked.
    position: Position,
    /// Outcome after the move.
    outcome: Outcome,
}

/// Orchestrates alternating moves between the human and the computer.
#[derive(Debug, Clone, Default)]
pub struct TurnController {
    session: GameSession,
    state: TurnState,
    search: Minimax,
}

impl TurnController {
    /// Creates a controller waiting for the human on an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes play from an existing session.
    ///
    /// The phase follows from the session: over if terminal, otherwise
    /// whoever is next to move.
    #[instrument(skip(session), fields(board = %session.board().to_compact()))]
    pub fn resume(session: GameSession) -> Self {
        let state = if session.is_terminal() {
            TurnState::GameOver
        } else if session.to_move() == HUMAN {
            TurnState::WaitingForHuman
        } else {
            TurnState::ComputerThinking
        };
        Self {
            session,
            state,
            search: Minimax::new(),
        }
    }

    /// Returns the controller phase.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Returns the session (read-only).
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.session.board()
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        self.session.history()
    }

    /// Returns the current reset generation.
    pub fn generation(&self) -> u64 {
        self.session.generation()
    }

    /// Snapshot of the current outcome.
    pub fn outcome(&self) -> Outcome {
        self.session.outcome()
    }

    /// Places the human's mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// - [`MoveError::InvalidIndex`] if `index` is outside 0-8
    /// - [`MoveError::OutOfTurn`] unless the controller is waiting for the human
    /// - [`MoveError::IllegalMove`] if the cell is occupied
    ///
    /// State is unchanged on error.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        let position = Position::from_index(index).ok_or(MoveError::InvalidIndex { index })?;
        self.expect_state(TurnState::WaitingForHuman)?;

        let outcome = self.commit(Move::new(HUMAN, position))?;
        self.state = if outcome.is_terminal() {
            TurnState::GameOver
        } else {
            TurnState::ComputerThinking
        };

        info!(?position, %outcome, state = ?self.state, "Human move accepted");
        Ok(outcome)
    }

    /// Runs the search and places the computer's mark.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfTurn`] unless the computer owes a move.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn request_computer_move(&mut self) -> Result<ComputerMove, MoveError> {
        self.expect_state(TurnState::ComputerThinking)?;

        let result = self.search.best_move(self.session.board()).ok_or_else(|| {
            MoveError::InvariantViolation("Search found no move for the computer".to_string())
        })?;
        let position = *result.position();
        let outcome = self.commit(Move::new(COMPUTER, position))?;
        self.state = if outcome.is_terminal() {
            TurnState::GameOver
        } else {
            TurnState::WaitingForHuman
        };

        info!(?position, score = *result.score(), %outcome, "Computer move applied");
        Ok(ComputerMove::new(position, outcome))
    }

    /// Issues a ticket for the computer move currently owed.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfTurn`] unless the computer owes a move.
    pub fn schedule_computer_move(&self) -> Result<MoveTicket, MoveError> {
        self.expect_state(TurnState::ComputerThinking)?;
        let ticket = MoveTicket {
            generation: self.session.generation(),
            ply: self.session.ply(),
        };
        debug!(?ticket, "Computer move scheduled");
        Ok(ticket)
    }

    /// Plays a deferred computer move if its ticket still matches the session.
    ///
    /// # Errors
    ///
    /// [`MoveError::StaleTicket`] if the game was reset or moved on since the
    /// ticket was issued; otherwise as [`TurnController::request_computer_move`].
    #[instrument(skip(self))]
    pub fn resolve_ticket(&mut self, ticket: MoveTicket) -> Result<ComputerMove, MoveError> {
        if ticket.generation != self.session.generation() || ticket.ply != self.session.ply() {
            warn!(
                current_generation = self.session.generation(),
                current_ply = self.session.ply(),
                "Discarding stale deferred move"
            );
            return Err(MoveError::StaleTicket {
                ticket_generation: ticket.generation,
                ticket_ply: ticket.ply,
                current_generation: self.session.generation(),
                current_ply: self.session.ply(),
            });
        }
        self.request_computer_move()
    }

    /// Starts a new game from any state.
    #[instrument(skip(self), fields(previous_generation = self.session.generation()))]
    pub fn reset(&mut self) {
        let generation = self.session.generation() + 1;
        self.session = GameSession::with_generation(generation);
        self.state = TurnState::WaitingForHuman;
        info!(generation, "Game reset");
    }

    fn expect_state(&self, expected: TurnState) -> Result<(), MoveError> {
        if self.state == expected {
            Ok(())
        } else {
            debug!(state = ?self.state, ?expected, "Move requested out of turn");
            Err(MoveError::OutOfTurn { state: self.state })
        }
    }

    /// Applies a move under the move contract.
    ///
    /// Preconditions are always checked; postconditions in debug builds only.
    fn commit(&mut self, action: Move) -> Result<Outcome, MoveError> {
        MoveContract::pre(&self.session, &action)?;

        #[cfg(debug_assertions)]
        let before = self.session.clone();

        let outcome = self.session.apply(action)?;

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &self.session)?;

        Ok(outcome)
    }
}
