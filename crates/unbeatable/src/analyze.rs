//! One-shot analysis of a board string.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use unbeatable_tictactoe::{Board, Minimax, Outcome, Player, SearchResult, evaluate};

/// What the engine makes of a board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Analysis {
    /// Board in compact form (`.` for empty).
    board: String,
    /// Outcome of the board as it stands.
    outcome: Outcome,
    /// Player whose mark goes next.
    to_move: Player,
    /// The computer's reply, present only while the game is in progress
    /// and O is to move.
    computer_move: Option<SearchResult>,
}

/// Evaluates `board` and, when it is the computer's turn, searches for its move.
#[instrument(fields(board = %board.to_compact()))]
pub fn analyze(board: &Board) -> Analysis {
    let outcome = evaluate(board);
    let to_move = board.next_player();

    let computer_move = Minimax::new().best_move(board);

    info!(%outcome, ?computer_move, "Board analyzed");
    Analysis {
        board: board.to_compact(),
        outcome,
        to_move,
        computer_move,
    }
}

impl std::fmt::Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Compact form is always nine valid marks.
        match self.board.parse::<Board>() {
            Ok(board) => writeln!(f, "{}\n", board)?,
            Err(_) => writeln!(f, "{}\n", self.board)?,
        }
        writeln!(f, "Outcome: {}", self.outcome)?;
        if let Some(pattern) = self.outcome.winning_pattern() {
            writeln!(f, "Line: {}", pattern)?;
        }
        match &self.computer_move {
            Some(result) => write!(
                f,
                "Computer plays {} (cell {}), score {}, {} positions searched",
                result.position().label(),
                result.position().index(),
                result.score(),
                result.nodes()
            ),
            None if self.outcome.is_terminal() => write!(f, "Game over"),
            None => write!(f, "{} to move", self.to_move),
        }
    }
}
