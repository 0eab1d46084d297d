//! Key mapping for the board and the menu.

use crossterm::event::KeyCode;
use perfect_tictactoe::{GameMode, Position};
use strum::IntoEnumIterator;

/// Moves the cursor one cell with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}

/// Maps `1`-`9` onto the board in reading order.
pub fn digit_position(c: char) -> Option<Position> {
    let digit = c.to_digit(10)? as usize;
    digit.checked_sub(1).and_then(Position::from_index)
}

/// Menu entries with their shortcut digits: `1` multiplayer, `2` AI.
pub fn mode_entries() -> impl Iterator<Item = (usize, GameMode)> {
    GameMode::iter().enumerate().map(|(i, mode)| (i + 1, mode))
}

/// Mode for a menu shortcut digit.
pub fn menu_choice(c: char) -> Option<GameMode> {
    let digit = c.to_digit(10)? as usize;
    mode_entries().find_map(|(key, mode)| (key == digit).then_some(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_board() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Down),
            Position::BottomRight
        );
        assert_eq!(move_cursor(Position::Center, KeyCode::Tab), Position::Center);
    }

    #[test]
    fn test_digits_map_in_reading_order() {
        assert_eq!(digit_position('1'), Some(Position::TopLeft));
        assert_eq!(digit_position('5'), Some(Position::Center));
        assert_eq!(digit_position('9'), Some(Position::BottomRight));
        assert_eq!(digit_position('0'), None);
        assert_eq!(digit_position('x'), None);
    }

    #[test]
    fn test_menu_choice() {
        assert_eq!(menu_choice('1'), Some(GameMode::HumanVsHuman));
        assert_eq!(menu_choice('2'), Some(GameMode::HumanVsAi));
        assert_eq!(menu_choice('3'), None);
    }
}
