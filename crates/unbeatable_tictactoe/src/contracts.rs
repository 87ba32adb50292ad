//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`.

use crate::action::Move;
use crate::controller::TurnState;
use crate::error::MoveError;
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::session::GameSession;
use crate::types::Cell;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the session has not ended.
pub struct SessionLive;

impl SessionLive {
    /// Rejects moves on a terminal session.
    pub fn check(session: &GameSession) -> Result<(), MoveError> {
        if session.is_terminal() {
            Err(MoveError::OutOfTurn {
                state: TurnState::GameOver,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the cell at the move's position must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects moves onto an occupied cell.
    pub fn check(action: &Move, session: &GameSession) -> Result<(), MoveError> {
        if session.board().is_empty(action.position) {
            Ok(())
        } else {
            Err(MoveError::IllegalMove {
                position: action.position,
            })
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves by the player who is not next.
    pub fn check(action: &Move, session: &GameSession) -> Result<(), MoveError> {
        if action.player == session.to_move() {
            Ok(())
        } else {
            Err(MoveError::WrongMark {
                player: action.player,
            })
        }
    }
}

/// Contract for move actions.
///
/// Preconditions:
/// - Session not over
/// - Cell must be empty
/// - Must be player's turn
///
/// Postconditions:
/// - Exactly one move was added and earlier marks are untouched
/// - Every session invariant holds
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    #[instrument(level = "debug", skip(session))]
    fn pre(session: &GameSession, action: &Move) -> Result<(), MoveError> {
        SessionLive::check(session)?;
        CellIsEmpty::check(action, session)?;
        PlayersTurn::check(action, session)?;
        Ok(())
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        let kept_marks = before
            .board()
            .cells()
            .iter()
            .zip(after.board().cells())
            .all(|(old, new)| *old == Cell::Empty || old == new);
        if !kept_marks || after.ply() != before.ply() + 1 {
            warn!(before = %before.board().to_compact(), after = %after.board().to_compact(), "Move was not a single placement");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: move must add exactly one mark".to_string(),
            ));
        }

        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Session invariants violated");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
