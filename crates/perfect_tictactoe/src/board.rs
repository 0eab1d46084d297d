//! The 3x3 board.

use crate::error::{GameError, GameErrorKind};
use crate::position::Position;
use crate::types::{Cell, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from three rows of cells.
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; 9];
        for (r, row) in rows.iter().enumerate() {
            cells[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Gets the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::OutOfBounds`] if either coordinate is not in `0..=2`.
    #[instrument(skip(self))]
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        Ok(self.get(Position::from_row_col(row, col)?))
    }

    /// Places `player`'s mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::OutOfBounds`] if either coordinate is not in `0..=2`.
    /// - [`GameErrorKind::CellOccupied`] if the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), GameError> {
        let pos = Position::from_row_col(row, col)?;
        self.place_at(pos, player)
    }

    /// Places `player`'s mark at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::CellOccupied`] if the cell already holds a mark.
    pub fn place_at(&mut self, pos: Position, player: Player) -> Result<(), GameError> {
        if !self.is_empty(pos) {
            return Err(GameError::new(GameErrorKind::CellOccupied {
                row: pos.row(),
                col: pos.col(),
            }));
        }
        self.cells[pos.index()] = player.mark();
        Ok(())
    }

    /// Unconditionally writes a cell. Used by the search for trial/revert.
    pub(crate) fn put(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Checks if no empty cells remain.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// Number of marks on the board.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Empty positions in scan order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |pos| self.is_empty(*pos))
    }

    /// Derives whose turn it is from the mark counts.
    ///
    /// X always moves first, so a reachable board has as many X marks as O
    /// marks (X to move) or exactly one more (O to move).
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidBoard`] for any other pair of counts.
    pub fn side_to_move(&self) -> Result<Player, GameError> {
        let x_count = self.count(Player::X);
        let o_count = self.count(Player::O);
        if x_count == o_count {
            Ok(Player::X)
        } else if x_count == o_count + 1 {
            Ok(Player::O)
        } else {
            Err(GameError::new(GameErrorKind::InvalidBoard { x_count, o_count }))
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col])?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board text: {}", message)]
pub struct ParseBoardError {
    /// What was wrong with the input.
    pub message: String,
}

impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine `X`, `O` or `.` characters in row-major order.
    ///
    /// Whitespace, `|` and `/` are ignored so boards can be written as
    /// `"XO./.X./..O"` or across several lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; 9];
        let mut len = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '|' && *c != '/') {
            let cell = match ch {
                'X' | 'x' => Cell::Occupied(Player::X),
                'O' | 'o' => Cell::Occupied(Player::O),
                '.' | '_' | '-' => Cell::Empty,
                other => {
                    return Err(ParseBoardError {
                        message: format!("unexpected character {other:?}"),
                    });
                }
            };
            if len == 9 {
                return Err(ParseBoardError {
                    message: "more than 9 cells".to_string(),
                });
            }
            cells[len] = cell;
            len += 1;
        }
        if len != 9 {
            return Err(ParseBoardError {
                message: format!("expected 9 cells, found {len}"),
            });
        }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!board.is_full());
        assert_eq!(board.empty_positions().count(), 9);
    }

    #[test]
    fn test_place_sets_only_target_cell() {
        let mut board = Board::new();
        board.place(1, 2, Player::X).unwrap();
        assert_eq!(board.cell_at(1, 2).unwrap(), Cell::Occupied(Player::X));
        assert_eq!(board.filled(), 1);
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = Board::new();
        board.place(0, 0, Player::X).unwrap();
        let before = board;
        let err = board.place(0, 0, Player::O).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::CellOccupied { row: 0, col: 0 });
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.cell_at(3, 1).unwrap_err().kind(),
            GameErrorKind::OutOfBounds { row: 3, col: 1 }
        );
        assert_eq!(
            board.place(0, 5, Player::X).unwrap_err().kind(),
            GameErrorKind::OutOfBounds { row: 0, col: 5 }
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_full_board() {
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        assert!(board.is_full());
        assert_eq!(board.empty_positions().next(), None);
    }

    #[test]
    fn test_from_rows_matches_parse() {
        let x = Cell::Occupied(Player::X);
        let o = Cell::Occupied(Player::O);
        let e = Cell::Empty;
        let board = Board::from_rows([[o, o, e], [x, x, e], [e, e, e]]);
        assert_eq!(board, "OO./XX./...".parse().unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert!("XO".parse::<Board>().is_err());
        assert!("XOXOXOXOXO".parse::<Board>().is_err());
        assert!("XOZ/.../...".parse::<Board>().is_err());
    }

    #[test]
    fn test_display() {
        let board: Board = "X../.O./...".parse().unwrap();
        assert_eq!(board.to_string(), "X..\n.O.\n...");
    }

    #[test]
    fn test_side_to_move() {
        assert_eq!(Board::new().side_to_move().unwrap(), Player::X);
        let board: Board = "X../.../...".parse().unwrap();
        assert_eq!(board.side_to_move().unwrap(), Player::O);
        let board: Board = "XX./.../...".parse().unwrap();
        assert_eq!(
            board.side_to_move().unwrap_err().kind(),
            GameErrorKind::InvalidBoard {
                x_count: 2,
                o_count: 0
            }
        );
        let board: Board = "O../.../...".parse().unwrap();
        assert!(board.side_to_move().is_err());
    }
}
