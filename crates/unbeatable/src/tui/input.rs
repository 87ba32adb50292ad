//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;
use unbeatable_tictactoe::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the game.
    Quit,
    /// Start a new game.
    Reset,
    /// Place X under the cursor.
    PlaceAtCursor,
    /// Place X at a cell index (0-8).
    Place(usize),
    /// Move the cursor with an arrow key.
    MoveCursor(KeyCode),
    /// Key has no binding.
    Ignore,
}

/// Maps a key to an action.
///
/// Digits `1`-`9` address cells directly in reading order.
pub fn action_for(key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Enter | KeyCode::Char(' ') => Action::PlaceAtCursor,
        KeyCode::Char(c @ '1'..='9') => match c.to_digit(10) {
            Some(digit) => Action::Place(digit as usize - 1),
            None => Action::Ignore,
        },
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Action::MoveCursor(key),
        _ => Action::Ignore,
    }
}

/// Moves cursor based on arrow keys.
///
/// The cursor stops at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, column) = (cursor.row(), cursor.column());
    let (row, column) = match key {
        KeyCode::Up => (row.saturating_sub(1), column),
        KeyCode::Down => ((row + 1).min(2), column),
        KeyCode::Left => (row, column.saturating_sub(1)),
        KeyCode::Right => (row, (column + 1).min(2)),
        _ => (row, column),
    };
    Position::from_index(row * 3 + column).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_board() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Down), Position::BottomCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Down),
            Position::BottomRight
        );
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Right),
            Position::BottomRight
        );
    }

    #[test]
    fn test_other_keys_leave_cursor() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Enter), Position::Center);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for(KeyCode::Char('q')), Action::Quit);
        assert_eq!(action_for(KeyCode::Esc), Action::Quit);
        assert_eq!(action_for(KeyCode::Char('r')), Action::Reset);
        assert_eq!(action_for(KeyCode::Enter), Action::PlaceAtCursor);
        assert_eq!(action_for(KeyCode::Char(' ')), Action::PlaceAtCursor);
        assert_eq!(action_for(KeyCode::Char('1')), Action::Place(0));
        assert_eq!(action_for(KeyCode::Char('9')), Action::Place(8));
        assert_eq!(action_for(KeyCode::Char('0')), Action::Ignore);
        assert_eq!(
            action_for(KeyCode::Left),
            Action::MoveCursor(KeyCode::Left)
        );
        assert_eq!(action_for(KeyCode::Tab), Action::Ignore);
    }
}
