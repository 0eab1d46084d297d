//! Exhaustive minimax search.
//!
//! Scores are from O's point of view: a win for O is `+1`, a win for X is `-1`
//! and a draw is `0`. O maximizes, X minimizes. There is no pruning and no
//! depth limit; a game lasts at most 9 plies, so the full tree (under 550k
//! nodes from an empty board) is always searched. Scores carry no depth
//! weighting, so a quick win and a slow win are worth the same.
//!
//! The public entry points take `&Board` and copy it once into a scratch
//! board. Recursion then mutates that scratch in place and reverts each trial
//! mark before trying the next cell, so the caller's board is never touched
//! and no per-node copies are made.

use crate::board::Board;
use crate::error::{GameError, GameErrorKind};
use crate::position::Position;
use crate::rules::{evaluate, Outcome};
use crate::types::{Cell, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Minimax value of a position.
pub type Score = i8;

/// Value of a position O has won.
pub const O_WINS: Score = 1;
/// Value of a position X has won.
pub const X_WINS: Score = -1;
/// Value of a drawn position.
pub const DRAW: Score = 0;

/// A legal move together with its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Where the mark goes.
    pub position: Position,
    /// Value of the board after the mark is placed.
    pub score: Score,
}

/// Value of a terminal outcome, `None` while the game is ongoing.
fn terminal_score(outcome: Outcome) -> Option<Score> {
    match outcome {
        Outcome::Win(Player::O) => Some(O_WINS),
        Outcome::Win(Player::X) => Some(X_WINS),
        Outcome::Draw => Some(DRAW),
        Outcome::Ongoing => None,
    }
}

/// Returns true if `candidate` is strictly better than `best` for `player`.
fn improves(player: Player, candidate: Score, best: Score) -> bool {
    match player {
        Player::O => candidate > best,
        Player::X => candidate < best,
    }
}

/// Worst possible starting value for `player`'s running best.
fn floor(player: Player) -> Score {
    match player {
        Player::O => Score::MIN,
        Player::X => Score::MAX,
    }
}

/// Recursive search state.
struct Search {
    nodes: u64,
}

impl Search {
    fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Minimax value of `board` with `to_move` to play.
    ///
    /// Every trial mark is reverted before returning, so `board` is unchanged
    /// afterwards.
    fn score(&mut self, board: &mut Board, to_move: Player) -> Score {
        self.nodes += 1;
        if let Some(score) = terminal_score(evaluate(board)) {
            return score;
        }

        let mut best = floor(to_move);
        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }
            board.put(pos, to_move.mark());
            let child = self.score(board, to_move.opponent());
            board.put(pos, Cell::Empty);
            if improves(to_move, child, best) {
                best = child;
            }
        }
        best
    }

    /// Scores every legal move for `player` in scan order.
    fn rank(&mut self, board: &Board, player: Player) -> Result<Vec<ScoredMove>, GameError> {
        if evaluate(board).is_terminal() {
            return Err(GameError::new(GameErrorKind::NoLegalMove));
        }

        let mut scratch = *board;
        let mut ranked = Vec::with_capacity(9);
        for pos in Position::ALL {
            if !scratch.is_empty(pos) {
                continue;
            }
            scratch.put(pos, player.mark());
            let score = self.score(&mut scratch, player.opponent());
            scratch.put(pos, Cell::Empty);
            ranked.push(ScoredMove {
                position: pos,
                score,
            });
        }
        debug_assert_eq!(&scratch, board, "trial marks must be reverted");
        Ok(ranked)
    }
}

/// Minimax value of `board` with `to_move` to play.
pub fn score(board: &Board, to_move: Player) -> Score {
    let mut scratch = *board;
    Search::new().score(&mut scratch, to_move)
}

/// Scores every legal move for `player`, in scan order.
///
/// # Errors
///
/// Returns [`GameErrorKind::NoLegalMove`] if the board is already won or full.
#[instrument(skip(board), fields(board = %board))]
pub fn rank_moves(board: &Board, player: Player) -> Result<Vec<ScoredMove>, GameError> {
    let mut search = Search::new();
    let ranked = search.rank(board, player)?;
    debug!(nodes = search.nodes, moves = ranked.len(), "Ranked moves");
    Ok(ranked)
}

/// Chooses the optimal move for `player`.
///
/// O takes the highest score and X the lowest. Among equally good moves the
/// first one in scan order (row 0..2, then column 0..2) wins, which makes the
/// choice deterministic.
///
/// # Errors
///
/// Returns [`GameErrorKind::NoLegalMove`] if the board is already won or full.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(board: &Board, player: Player) -> Result<ScoredMove, GameError> {
    let mut search = Search::new();
    let ranked = search.rank(board, player)?;

    let mut best: Option<ScoredMove> = None;
    for candidate in ranked {
        match best {
            Some(current) if !improves(player, candidate.score, current.score) => {}
            _ => best = Some(candidate),
        }
    }

    let best = best.ok_or_else(|| GameError::new(GameErrorKind::NoLegalMove))?;
    debug!(
        player = %player,
        position = %best.position,
        score = best.score,
        nodes = search.nodes,
        "Search complete"
    );
    Ok(best)
}
