//! History consistency invariant: the board is exactly the replayed history.

use super::Invariant;
use crate::session::GameSession;
use crate::types::Board;

/// Invariant: replaying the move history reproduces the board.
///
/// Every move lands on an empty cell, so no mark was ever overwritten, and
/// no mark exists that the history does not account for.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let mut reconstructed = Board::new();

        for action in session.history() {
            if reconstructed.place(action.position, action.player).is_err() {
                return false;
            }
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board matches replayed move history (cells never overwritten)"
    }
}
