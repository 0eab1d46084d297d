//! Error types for the game-state engine.

use crate::rules::Outcome;
use crate::types::Player;
use derive_more::{Display, Error};

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Row or column outside `0..=2`.
    #[display("Cell ({row}, {col}) is off the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Row of the occupied cell.
        row: usize,
        /// Column of the occupied cell.
        col: usize,
    },

    /// Search was asked for a move on a finished or full board.
    #[display("No legal move available")]
    NoLegalMove,

    /// A move was attempted after the game ended.
    #[display("Game is already over ({_0})")]
    SessionFinished(Outcome),

    /// A human move was attempted while the AI is to move.
    #[display("It's not a human's turn ({_0} is played by the AI)")]
    NotHumanTurn(Player),

    /// An AI move was requested outside the AI's turn.
    #[display("It's not the AI's turn")]
    NotAiTurn,

    /// Mark counts cannot arise from X-first alternating play.
    #[display("Board has {x_count} X marks and {o_count} O marks")]
    InvalidBoard {
        /// Number of X marks.
        x_count: usize,
        /// Number of O marks.
        o_count: usize,
    },
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    kind: GameErrorKind,
    /// Line number where the error was raised.
    line: u32,
    /// Source file where the error was raised.
    file: &'static str,
}

impl GameError {
    /// Creates a new error recording the caller's location.
    #[track_caller]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> GameErrorKind {
        self.kind
    }

    /// Returns the line where the error was raised.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the file where the error was raised.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_location() {
        let err = GameError::new(GameErrorKind::NoLegalMove);
        assert!(err.file().ends_with("error.rs"));
        assert!(err.line() > 0);
    }

    #[test]
    fn test_display_includes_kind() {
        let err = GameError::new(GameErrorKind::CellOccupied { row: 1, col: 2 });
        assert!(err.to_string().starts_with("Cell (1, 2) is already occupied"));
    }

    #[test]
    fn test_finished_display_names_outcome() {
        let kind = GameErrorKind::SessionFinished(Outcome::Win(Player::O));
        assert_eq!(kind.to_string(), "Game is already over (O wins)");
    }
}
