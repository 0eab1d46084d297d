//! Session invariants.
//!
//! Checked with `debug_assert!` after every successful transition and
//! testable on their own.

use crate::session::Session;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// X has as many marks as O, or exactly one more.
pub struct MarkBalanceInvariant;

impl Invariant<Session> for MarkBalanceInvariant {
    fn holds(session: &Session) -> bool {
        session.board().side_to_move().is_ok()
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}

/// Replaying the move list onto the starting board yields the current board.
pub struct HistoryConsistentInvariant;

impl Invariant<Session> for HistoryConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let mut board = *session.initial_board();
        for mv in session.history() {
            if board.place_at(mv.position, mv.player).is_err() {
                return false;
            }
        }
        board == *session.board()
    }

    fn description() -> &'static str {
        "Move history replays onto the starting board"
    }
}

/// While ongoing, the player to move is the one the mark counts imply.
pub struct TurnMatchesBoardInvariant;

impl Invariant<Session> for TurnMatchesBoardInvariant {
    fn holds(session: &Session) -> bool {
        let alternates = session
            .history()
            .windows(2)
            .all(|pair| pair[0].player != pair[1].player);
        let to_move_ok = match session.to_move() {
            Some(player) => session.board().side_to_move().ok() == Some(player),
            None => true,
        };
        alternates && to_move_ok
    }

    fn description() -> &'static str {
        "Players alternate and the side to move matches the board"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (
    MarkBalanceInvariant,
    HistoryConsistentInvariant,
    TurnMatchesBoardInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::session::GameMode;
    use crate::types::Player;

    #[test]
    fn test_invariants_hold_for_new_session() {
        let session = Session::new(GameMode::HumanVsHuman);
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariants_hold_after_moves() {
        let mut session = Session::new(GameMode::HumanVsHuman);
        session.apply_human_move(1, 1).unwrap();
        session.apply_human_move(0, 0).unwrap();
        session.apply_human_move(2, 2).unwrap();
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariants_hold_for_resumed_session() {
        let board: Board = "X../.O./...".parse().unwrap();
        let mut session = Session::from_board(GameMode::HumanVsAi, board).unwrap();
        session.apply_human_move(2, 2).unwrap();
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_detects_corrupted_board() {
        let mut session = Session::new(GameMode::HumanVsHuman);
        session.apply_human_move(1, 1).unwrap();
        session.board_mut().place(0, 0, Player::X).unwrap();

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
        assert!(descriptions.contains(&MarkBalanceInvariant::description()));
        assert!(descriptions.contains(&HistoryConsistentInvariant::description()));
    }
}
