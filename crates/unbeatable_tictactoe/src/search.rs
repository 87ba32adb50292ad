//! Exhaustive minimax search for the computer player.
//!
//! The computer plays O and maximizes; the human plays X and minimizes.
//! Every continuation is searched to the end of the game. There is no
//! pruning, caching or depth limit, so the chosen move is optimal rather than
//! merely strong: O never loses from any position where it is not already
//! lost.
//!
//! The recursion mutates a scratch board in place and undoes every tentative
//! mark before trying the next candidate.

use crate::outcome::Score;
use crate::position::Position;
use crate::rules::evaluate;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The computer's pick for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SearchResult {
    /// Cell chosen for O.
    position: Position,
    /// Game-theoretic value of the move from O's perspective.
    score: Score,
    /// Positions visited while searching.
    nodes: u64,
}

/// Minimax searcher.
///
/// Holds only a visited-node counter; boards are always passed in.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    nodes: u64,
}

impl Minimax {
    /// Creates a new searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions visited since creation or since the last [`Minimax::best_move`] began.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Game-theoretic score of `board` from O's perspective.
    ///
    /// `maximizing` selects the side to move: `true` for O, `false` for X.
    /// Terminal boards return their outcome score without recursing. The
    /// board is used as scratch space and is identical to its input state
    /// when this returns.
    pub fn score(&mut self, board: &mut Board, maximizing: bool) -> Score {
        self.nodes += 1;

        if let Some(score) = evaluate(board).score() {
            return score;
        }

        let player = if maximizing { Player::O } else { Player::X };
        let mut best: Option<Score> = None;

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            board.mark_unchecked(pos, player);
            let score = self.score(board, !maximizing);
            board.clear(pos);

            best = Some(match best {
                None => score,
                Some(best) if maximizing => best.max(score),
                Some(best) => best.min(score),
            });
        }

        // An in-progress board always has an empty cell.
        best.unwrap_or(crate::outcome::DRAW)
    }

    /// Picks O's move on `board`.
    ///
    /// Each empty cell is tried in index order and scored with one ply of the
    /// same recursion; the first cell with the strictly greatest score wins.
    /// Returns `None` when the game is already over or when O is not the
    /// side to move. The caller's board is never touched; the search runs on
    /// a private copy.
    #[instrument(skip(self, board), fields(board = %board.to_compact()))]
    pub fn best_move(&mut self, board: &Board) -> Option<SearchResult> {
        self.nodes = 0;
        if evaluate(board).is_terminal() || board.next_player() != Player::O {
            debug!("No move for O on this board");
            return None;
        }
        let mut scratch = *board;
        let mut best: Option<(Position, Score)> = None;

        for pos in Position::ALL {
            if !scratch.is_empty(pos) {
                continue;
            }
            scratch.mark_unchecked(pos, Player::O);
            let score = self.score(&mut scratch, false);
            scratch.clear(pos);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        let (position, score) = best?;
        debug!(?position, score, nodes = self.nodes, "Search complete");
        Some(SearchResult {
            position,
            score,
            nodes: self.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{DRAW, O_WINS, X_WINS};

    #[test]
    fn test_terminal_board_scores_without_recursion() {
        let mut search = Minimax::new();
        let mut board: Board = "XXX/OO./...".parse().unwrap();
        assert_eq!(search.score(&mut board, true), X_WINS);
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn test_takes_immediate_win() {
        // O to move with two in the middle row.
        let board: Board = "XX./OO./X..".parse().unwrap();
        let result = Minimax::new().best_move(&board).unwrap();
        assert_eq!(*result.position(), Position::MiddleRight);
        assert_eq!(*result.score(), O_WINS);
    }

    #[test]
    fn test_blocks_immediate_loss() {
        let board: Board = "XX./.O./...".parse().unwrap();
        let result = Minimax::new().best_move(&board).unwrap();
        assert_eq!(*result.position(), Position::TopRight);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(Minimax::new().best_move(&board), None);
    }

    #[test]
    fn test_finished_or_wrong_side_has_no_move() {
        let won: Board = "XXX/OO./...".parse().unwrap();
        assert_eq!(Minimax::new().best_move(&won), None);

        let x_to_move: Board = "X../.O./...".parse().unwrap();
        assert_eq!(Minimax::new().best_move(&x_to_move), None);
        assert_eq!(Minimax::new().best_move(&Board::new()), None);
    }

    #[test]
    fn test_score_restores_board() {
        let mut board: Board = "X...O....".parse().unwrap();
        let before = board;
        let score = Minimax::new().score(&mut board, false);
        assert_eq!(board, before);
        assert_eq!(score, DRAW);
    }

    #[test]
    fn test_ties_break_toward_lowest_index() {
        // Against a center opening the corners draw and the edges lose.
        let board: Board = "....X....".parse().unwrap();
        let result = Minimax::new().best_move(&board).unwrap();
        assert_eq!(*result.position(), Position::TopLeft);
        assert_eq!(*result.score(), DRAW);
    }
}
