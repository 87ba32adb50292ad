//! The authoritative game state owned by the turn controller.

use crate::action::Move;
use crate::error::MoveError;
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::outcome::Outcome;
use crate::rules::evaluate;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Board, player to move, terminal flag and move history of one game.
///
/// A session is created fresh at start and on every reset; each reset bumps
/// the generation so work scheduled against an older session can be told
/// apart. Once terminal, a session accepts no further moves. A deserialized
/// session must satisfy every session invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct GameSession {
    pub(crate) board: Board,
    pub(crate) to_move: Player,
    pub(crate) terminal: bool,
    pub(crate) history: Vec<Move>,
    pub(crate) generation: u64,
}

impl GameSession {
    /// Creates an empty session, X to move, generation 0.
    pub fn new() -> Self {
        Self::with_generation(0)
    }

    /// Creates an empty session tagged with `generation`.
    pub fn with_generation(generation: u64) -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            terminal: false,
            history: Vec::new(),
            generation,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose mark goes next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns true once the game has been won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of moves played so far.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Reset counter this session was created under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Evaluates the board.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    /// Applies a move and updates the terminal flag.
    ///
    /// The board rejects occupied cells and marks out of alternation, in which
    /// case nothing changes.
    pub(crate) fn apply(&mut self, action: Move) -> Result<Outcome, MoveError> {
        self.board.place(action.position, action.player)?;
        self.history.push(action);
        self.to_move = action.player.opponent();

        let outcome = evaluate(&self.board);
        self.terminal = outcome.is_terminal();
        Ok(outcome)
    }

    /// Replays moves onto a fresh session.
    ///
    /// # Errors
    ///
    /// Fails on the first move the board rejects, or on any move after the
    /// game has already ended.
    #[instrument]
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut session = Self::new();
        for action in moves {
            if session.terminal {
                return Err(MoveError::OutOfTurn {
                    state: crate::controller::TurnState::GameOver,
                });
            }
            session.apply(*action)?;
        }
        Ok(session)
    }
}

/// Unchecked wire form of a [`GameSession`].
#[derive(Debug, Deserialize)]
pub struct SessionRecord {
    board: Board,
    to_move: Player,
    terminal: bool,
    history: Vec<Move>,
    generation: u64,
}

impl TryFrom<SessionRecord> for GameSession {
    type Error = MoveError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let session = GameSession {
            board: record.board,
            to_move: record.to_move,
            terminal: record.terminal,
            history: record.history,
            generation: record.generation,
        };
        SessionInvariants::check_all(&session).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(descriptions)
        })?;
        Ok(session)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::rules::WinPattern;

    #[test]
    fn test_apply_alternates_and_records_history() {
        let mut session = GameSession::new();
        session
            .apply(Move::new(Player::X, Position::Center))
            .unwrap();
        assert_eq!(session.to_move(), Player::O);
        assert_eq!(session.ply(), 1);
        assert!(!session.is_terminal());
    }

    #[test]
    fn test_replay_to_win_sets_terminal() {
        let moves = [
            Move::new(Player::X, Position::TopLeft),
            Move::new(Player::O, Position::Center),
            Move::new(Player::X, Position::TopCenter),
            Move::new(Player::O, Position::BottomCenter),
            Move::new(Player::X, Position::TopRight),
        ];
        let session = GameSession::replay(&moves).unwrap();
        assert!(session.is_terminal());
        assert_eq!(
            session.outcome(),
            Outcome::Won {
                player: Player::X,
                pattern: WinPattern::TopRow
            }
        );
    }

    #[test]
    fn test_replay_rejects_moves_after_game_over() {
        let moves = [
            Move::new(Player::X, Position::TopLeft),
            Move::new(Player::O, Position::Center),
            Move::new(Player::X, Position::TopCenter),
            Move::new(Player::O, Position::BottomCenter),
            Move::new(Player::X, Position::TopRight),
            Move::new(Player::O, Position::BottomLeft),
        ];
        assert!(matches!(
            GameSession::replay(&moves),
            Err(MoveError::OutOfTurn { .. })
        ));
    }

    #[test]
    fn test_rejected_move_leaves_session_unchanged() {
        let mut session = GameSession::new();
        session
            .apply(Move::new(Player::X, Position::Center))
            .unwrap();
        let before = session.clone();
        assert!(
            session
                .apply(Move::new(Player::O, Position::Center))
                .is_err()
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_deserialize_round_trip() {
        let session = GameSession::replay(&[
            Move::new(Player::X, Position::Center),
            Move::new(Player::O, Position::TopLeft),
        ])
        .unwrap();
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(serde_json::from_str::<GameSession>(&json).unwrap(), session);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_session() {
        let session = GameSession::replay(&[Move::new(Player::X, Position::Center)]).unwrap();

        // O is next, but the record claims X.
        let mut wrong_turn = serde_json::to_value(&session).unwrap();
        wrong_turn["to_move"] = serde_json::json!("X");
        assert!(serde_json::from_value::<GameSession>(wrong_turn).is_err());

        // A mark the history does not account for.
        let mut extra_mark = serde_json::to_value(&session).unwrap();
        extra_mark["board"][0] = serde_json::json!({ "Occupied": "O" });
        assert!(serde_json::from_value::<GameSession>(extra_mark).is_err());

        let mut early_end = serde_json::to_value(&session).unwrap();
        early_end["terminal"] = serde_json::json!(true);
        assert!(serde_json::from_value::<GameSession>(early_end).is_err());
    }
}
