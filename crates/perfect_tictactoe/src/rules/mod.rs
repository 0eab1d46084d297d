//! Game rules for tic-tac-toe.
//!
//! Pure functions deriving the outcome from a board. Nothing here is stored:
//! callers recompute the outcome whenever the board changes.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, winning_line, LINES};

use crate::board::Board;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner yet and empty cells remain.
    Ongoing,
    /// A player completed a line.
    Win(Player),
    /// Board is full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns true once the game can accept no more moves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "Ongoing"),
            Outcome::Win(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Evaluates the board.
///
/// Wins are checked before the full-board test, since the last mark can both
/// fill the board and complete a line.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}
