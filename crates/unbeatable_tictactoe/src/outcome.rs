//! Classification of a board.

use crate::rules::WinPattern;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Score of a finished game from O's perspective.
pub type Score = i8;

/// O has three in a row.
pub const O_WINS: Score = 1;
/// Board full with no line.
pub const DRAW: Score = 0;
/// X has three in a row.
pub const X_WINS: Score = -1;

/// Outcome of a board, always derivable from the board alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line yet and empty cells remain.
    InProgress,
    /// A player completed a line.
    Won {
        /// The winner.
        player: Player,
        /// The first completed line in evaluation order.
        pattern: WinPattern,
    },
    /// Board is full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns true once the game cannot continue.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Won { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_pattern(&self) -> Option<WinPattern> {
        match self {
            Outcome::Won { pattern, .. } => Some(*pattern),
            _ => None,
        }
    }

    /// Minimax score of a terminal outcome, `None` while in progress.
    pub fn score(&self) -> Option<Score> {
        match self {
            Outcome::InProgress => None,
            Outcome::Won {
                player: Player::O, ..
            } => Some(O_WINS),
            Outcome::Won {
                player: Player::X, ..
            } => Some(X_WINS),
            Outcome::Draw => Some(DRAW),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Won { player, .. } => write!(f, "{player} wins!"),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}
