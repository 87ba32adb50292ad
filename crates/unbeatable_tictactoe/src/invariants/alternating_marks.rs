//! Alternating marks invariant: X and O take turns, X first.

use super::Invariant;
use crate::session::GameSession;
use crate::types::Player;

/// Invariant: mark counts match strict alternation.
///
/// X has placed as many marks as O or exactly one more, and the session's
/// player to move agrees with the board.
pub struct AlternatingMarksInvariant;

impl Invariant<GameSession> for AlternatingMarksInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        let x = board.count(Player::X);
        let o = board.count(Player::O);

        (x == o || x == o + 1) && session.to_move() == board.next_player()
    }

    fn description() -> &'static str {
        "Marks alternate (X first, X count - O count in {0, 1})"
    }
}
