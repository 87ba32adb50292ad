//! Terminal flag invariant: the flag mirrors the evaluated outcome.

use super::Invariant;
use crate::session::GameSession;

/// Invariant: a session is terminal exactly when its board is won or drawn.
pub struct TerminalConsistentInvariant;

impl Invariant<GameSession> for TerminalConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        session.is_terminal() == session.outcome().is_terminal()
    }

    fn description() -> &'static str {
        "Terminal flag matches the board outcome"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::position::Position;
    use crate::types::Player;

    #[test]
    fn test_finished_session_holds() {
        let moves = [
            Move::new(Player::X, Position::TopLeft),
            Move::new(Player::O, Position::Center),
            Move::new(Player::X, Position::TopCenter),
            Move::new(Player::O, Position::BottomCenter),
            Move::new(Player::X, Position::TopRight),
        ];
        let session = GameSession::replay(&moves).unwrap();
        assert!(TerminalConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_stale_flag_violates() {
        let mut session = GameSession::new();
        session.terminal = true;
        assert!(!TerminalConsistentInvariant::holds(&session));
    }
}
