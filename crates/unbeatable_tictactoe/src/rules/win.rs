//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};

/// One of the eight lines that win the game.
///
/// Variants are declared in evaluation order: rows top to bottom, columns
/// left to right, then the two diagonals.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::EnumCount,
)]
pub enum WinPattern {
    /// Cells 0, 1, 2.
    TopRow,
    /// Cells 3, 4, 5.
    MiddleRow,
    /// Cells 6, 7, 8.
    BottomRow,
    /// Cells 0, 3, 6.
    LeftColumn,
    /// Cells 1, 4, 7.
    CenterColumn,
    /// Cells 2, 5, 8.
    RightColumn,
    /// Cells 0, 4, 8.
    MainDiagonal,
    /// Cells 2, 4, 6.
    AntiDiagonal,
}

/// Direction a win line is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Left to right across a row.
    Horizontal,
    /// Top to bottom down a column.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// Where a view should draw the line through a winning pattern.
///
/// `offset` is the row (horizontal lines) or column (vertical lines) the line
/// runs through; diagonals always cross the center and use offset 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineGeometry {
    /// Direction of the line.
    pub orientation: Orientation,
    /// Row or column index (0-2) the line runs through.
    pub offset: usize,
}

impl WinPattern {
    /// All patterns in evaluation order.
    pub const ALL: [WinPattern; 8] = [
        WinPattern::TopRow,
        WinPattern::MiddleRow,
        WinPattern::BottomRow,
        WinPattern::LeftColumn,
        WinPattern::CenterColumn,
        WinPattern::RightColumn,
        WinPattern::MainDiagonal,
        WinPattern::AntiDiagonal,
    ];

    /// The three positions making up this line.
    pub fn positions(self) -> [Position; 3] {
        use Position::*;

        match self {
            WinPattern::TopRow => [TopLeft, TopCenter, TopRight],
            WinPattern::MiddleRow => [MiddleLeft, Center, MiddleRight],
            WinPattern::BottomRow => [BottomLeft, BottomCenter, BottomRight],
            WinPattern::LeftColumn => [TopLeft, MiddleLeft, BottomLeft],
            WinPattern::CenterColumn => [TopCenter, Center, BottomCenter],
            WinPattern::RightColumn => [TopRight, MiddleRight, BottomRight],
            WinPattern::MainDiagonal => [TopLeft, Center, BottomRight],
            WinPattern::AntiDiagonal => [TopRight, Center, BottomLeft],
        }
    }

    /// The board indices of this line.
    pub fn indices(self) -> [usize; 3] {
        self.positions().map(Position::index)
    }

    /// Checks if the pattern passes through a position.
    pub fn contains(self, pos: Position) -> bool {
        self.positions().contains(&pos)
    }

    /// Human-readable name of the line.
    pub fn label(self) -> &'static str {
        match self {
            WinPattern::TopRow => "Top row",
            WinPattern::MiddleRow => "Middle row",
            WinPattern::BottomRow => "Bottom row",
            WinPattern::LeftColumn => "Left column",
            WinPattern::CenterColumn => "Center column",
            WinPattern::RightColumn => "Right column",
            WinPattern::MainDiagonal => "Diagonal",
            WinPattern::AntiDiagonal => "Anti-diagonal",
        }
    }

    /// Where to draw the win line for this pattern.
    pub fn geometry(self) -> LineGeometry {
        let (orientation, offset) = match self {
            WinPattern::TopRow => (Orientation::Horizontal, 0),
            WinPattern::MiddleRow => (Orientation::Horizontal, 1),
            WinPattern::BottomRow => (Orientation::Horizontal, 2),
            WinPattern::LeftColumn => (Orientation::Vertical, 0),
            WinPattern::CenterColumn => (Orientation::Vertical, 1),
            WinPattern::RightColumn => (Orientation::Vertical, 2),
            WinPattern::MainDiagonal => (Orientation::Diagonal, 1),
            WinPattern::AntiDiagonal => (Orientation::AntiDiagonal, 1),
        };
        LineGeometry {
            orientation,
            offset,
        }
    }
}

impl std::fmt::Display for WinPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.indices();
        write!(f, "{} ({a},{b},{c})", self.label())
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the player and the first completed line in [`WinPattern::ALL`]
/// order, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<(Player, WinPattern)> {
    WinPattern::ALL.into_iter().find_map(|pattern| {
        let [a, b, c] = pattern.positions();
        let mark = board.get(a).mark()?;
        (board.get(b).mark() == Some(mark) && board.get(c).mark() == Some(mark))
            .then_some((mark, pattern))
    })
}
