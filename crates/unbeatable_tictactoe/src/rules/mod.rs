//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are separated from board
//! storage so the search and the turn controller share one evaluator.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LineGeometry, Orientation, WinPattern, check_winner};

use crate::outcome::Outcome;
use crate::types::Board;

/// Classifies a board as won, drawn or still in progress.
///
/// Wins are checked first, in [`WinPattern::ALL`] order, so a full board with
/// a completed line is a win rather than a draw.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, pattern)) = check_winner(board) {
        Outcome::Won { player, pattern }
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
