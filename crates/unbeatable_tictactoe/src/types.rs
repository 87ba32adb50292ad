//! Core domain types for tic-tac-toe.

use crate::error::{BoardParseError, MoveError};
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    /// Player X (the human, goes first).
    #[display("X")]
    X,
    /// Player O (the computer, goes second).
    #[display("O")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player's mark.
    Occupied(Player),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Checks if the cell holds no mark.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored in row-major order (0-8). Every board reachable through
/// the public API has strictly alternating marks: X has placed either as
/// many marks as O or exactly one more. Deserialization goes through the
/// same check as parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[Cell; 9]", into = "[Cell; 9]")]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns all cells in index order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Counts the marks placed by a player.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(player))
            .count()
    }

    /// Number of marks on the board.
    pub fn marks_placed(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// The player whose mark goes next, derived from the mark counts.
    pub fn next_player(&self) -> Player {
        if self.count(Player::X) > self.count(Player::O) {
            Player::O
        } else {
            Player::X
        }
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Empty positions in index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |pos| self.is_empty(*pos))
    }

    /// Places a player's mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalMove`] if the cell already holds a mark and
    /// [`MoveError::WrongMark`] if `player` is not next to move on this board.
    /// The board is left unchanged on error.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            return Err(MoveError::IllegalMove { position: pos });
        }
        if player != self.next_player() {
            return Err(MoveError::WrongMark { player });
        }
        self.cells[pos.index()] = Cell::Occupied(player);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell; 9] {
        &mut self.cells
    }

    /// Writes a mark without the alternation check. Search scratch boards only.
    pub(crate) fn mark_unchecked(&mut self, pos: Position, player: Player) {
        debug_assert!(self.is_empty(pos), "scratch mark over an occupied cell");
        self.cells[pos.index()] = Cell::Occupied(player);
    }

    /// Clears a cell. Search scratch boards only.
    pub(crate) fn clear(&mut self, pos: Position) {
        self.cells[pos.index()] = Cell::Empty;
    }

    /// Formats the board as a compact 9-character string (`.` for empty).
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Empty => '.',
                Cell::Occupied(Player::X) => 'X',
                Cell::Occupied(Player::O) => 'O',
            })
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.cells[pos] {
                    Cell::Empty => write!(f, "{}", pos + 1)?,
                    Cell::Occupied(player) => write!(f, "{player}")?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine marks such as `"XO./.X./..O"`.
    ///
    /// `X` and `O` are marks (any case), `.`, `-` and `_` are empty cells.
    /// Whitespace, `|` and `/` are separators and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for ch in s.chars() {
            match ch {
                'X' | 'x' => cells.push(Cell::Occupied(Player::X)),
                'O' | 'o' => cells.push(Cell::Occupied(Player::O)),
                '.' | '-' | '_' => cells.push(Cell::Empty),
                '|' | '/' => {}
                c if c.is_whitespace() => {}
                other => return Err(BoardParseError::UnknownMark { mark: other }),
            }
        }

        let cells: [Cell; 9] = cells
            .try_into()
            .map_err(|found: Vec<Cell>| BoardParseError::WrongLength { found: found.len() })?;
        Board::try_from(cells)
    }
}

impl TryFrom<[Cell; 9]> for Board {
    type Error = BoardParseError;

    /// Accepts cells only if the mark counts could come from alternating play.
    fn try_from(cells: [Cell; 9]) -> Result<Self, Self::Error> {
        let board = Board { cells };
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        if x != o && x != o + 1 {
            return Err(BoardParseError::Unbalanced { x, o });
        }
        Ok(board)
    }
}

impl From<Board> for [Cell; 9] {
    fn from(board: Board) -> Self {
        board.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.cells().iter().all(|c| c.is_empty()));
        assert_eq!(board.next_player(), Player::X);
        assert_eq!(board.empty_positions().count(), 9);
    }

    #[test]
    fn test_place_alternates() {
        let mut board = Board::new();
        board.place(Position::Center, Player::X).unwrap();
        assert_eq!(board.next_player(), Player::O);
        assert_eq!(
            board.place(Position::TopLeft, Player::X),
            Err(MoveError::WrongMark { player: Player::X })
        );
        board.place(Position::TopLeft, Player::O).unwrap();
        assert_eq!(board.next_player(), Player::X);
    }

    #[test]
    fn test_place_never_overwrites() {
        let mut board = Board::new();
        board.place(Position::Center, Player::X).unwrap();
        let before = board;
        assert_eq!(
            board.place(Position::Center, Player::O),
            Err(MoveError::IllegalMove {
                position: Position::Center
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "XO. / .X. / ..O".parse().unwrap();
        assert_eq!(board.get(Position::TopLeft), Cell::Occupied(Player::X));
        assert_eq!(board.get(Position::TopCenter), Cell::Occupied(Player::O));
        assert_eq!(board.to_compact(), "XO..X...O");
        assert_eq!(board.to_string(), "X|O|3\n-+-+-\n4|X|6\n-+-+-\n7|8|O");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongLength { found: 2 })
        );
        assert_eq!(
            "XOZ......".parse::<Board>(),
            Err(BoardParseError::UnknownMark { mark: 'Z' })
        );
        assert_eq!(
            "OO.......".parse::<Board>(),
            Err(BoardParseError::Unbalanced { x: 0, o: 2 })
        );
        assert_eq!(
            "XX.......".parse::<Board>(),
            Err(BoardParseError::Unbalanced { x: 2, o: 0 })
        );
    }

    #[test]
    fn test_deserialize_rejects_unbalanced_cells() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Occupied(Player::X);
        cells[1] = Cell::Occupied(Player::X);
        let json = serde_json::to_string(&cells).unwrap();

        let err = serde_json::from_str::<Board>(&json).unwrap_err();
        assert!(err.to_string().contains("2 X and 0 O"), "{err}");
    }

    #[test]
    fn test_serde_uses_cell_array() {
        let board: Board = "XO./.X./...".parse().unwrap();
        let json = serde_json::to_value(board).unwrap();
        assert!(json.is_array());
        assert_eq!(serde_json::from_value::<Board>(json).unwrap(), board);
    }
}
