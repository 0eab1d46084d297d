//! Game session: turn order, game mode and the finished/ongoing state machine.

use crate::action::Move;
use crate::board::Board;
use crate::error::{GameError, GameErrorKind};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::position::Position;
use crate::rules::{evaluate, Outcome};
use crate::search::{best_move, ScoredMove};
use crate::types::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who controls each side. Fixed for the lifetime of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameMode {
    /// Two humans sharing one display.
    HumanVsHuman,
    /// Human plays X, the AI plays O.
    HumanVsAi,
}

impl GameMode {
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "Multiplayer",
            GameMode::HumanVsAi => "Play Against AI",
        }
    }

    /// The side played by the AI, if any.
    pub fn ai_player(self) -> Option<Player> {
        match self {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsAi => Some(Player::O),
        }
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Accepting moves; holds the player to move.
    Ongoing(Player),
    /// No further moves accepted; holds the terminal outcome.
    Finished(Outcome),
}

impl SessionState {
    /// State after a board change, given the player who would move next.
    fn after(outcome: Outcome, next: Player) -> Self {
        if outcome.is_terminal() {
            SessionState::Finished(outcome)
        } else {
            SessionState::Ongoing(next)
        }
    }
}

/// Everything a shell needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Copy of the board.
    board: Board,
    /// Outcome recomputed from the board.
    outcome: Outcome,
    /// Player to move, `None` once finished.
    to_move: Option<Player>,
    /// Session mode.
    mode: GameMode,
    /// Most recent move, if any.
    last_move: Option<Move>,
}

/// One game: owns its board and enforces turn order.
///
/// A session starts in `Ongoing(X)` on an empty board and moves to
/// `Finished` as soon as a move wins or fills the board. Every failed call
/// leaves the session exactly as it was.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    initial: Board,
    mode: GameMode,
    state: SessionState,
    history: Vec<Move>,
}

impl Session {
    /// Starts a new game on an empty board with X to move.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!(%mode, "Starting new session");
        Self {
            board: Board::new(),
            initial: Board::new(),
            mode,
            state: SessionState::Ongoing(Player::X),
            history: Vec::new(),
        }
    }

    /// Resumes a game from an existing board.
    ///
    /// The player to move is derived from the mark counts. A board that is
    /// already won or full starts in the `Finished` state.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidBoard`] if the mark counts cannot occur
    /// with X moving first.
    #[instrument(skip(board), fields(board = %board))]
    pub fn from_board(mode: GameMode, board: Board) -> Result<Self, GameError> {
        let to_move = board.side_to_move()?;
        let state = SessionState::after(evaluate(&board), to_move);
        info!(%mode, ?state, "Resuming session from board");
        Ok(Self {
            board,
            initial: board,
            mode,
            state,
            history: Vec::new(),
        })
    }

    /// Places the current player's mark at `(row, col)` on behalf of a human.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::SessionFinished`] once the game is over.
    /// - [`GameErrorKind::NotHumanTurn`] when the AI is to move.
    /// - [`GameErrorKind::OutOfBounds`] / [`GameErrorKind::CellOccupied`] for a bad cell.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<SessionState, GameError> {
        let player = self.ongoing().inspect_err(|e| {
            warn!(error = %e, "Human move attempted after game end");
        })?;
        if self.mode.ai_player() == Some(player) {
            warn!(%player, "Human tried to move on the AI's turn");
            return Err(GameError::new(GameErrorKind::NotHumanTurn(player)));
        }

        let pos = Position::from_row_col(row, col).inspect_err(|e| {
            warn!(error = %e, "Rejected human move");
        })?;
        self.commit(Move::new(player, pos))
    }

    /// Lets the AI choose and play its move.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::SessionFinished`] once the game is over.
    /// - [`GameErrorKind::NotAiTurn`] unless this is a human-vs-AI game with O to move.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn apply_ai_move(&mut self) -> Result<Move, GameError> {
        let player = self.ongoing().inspect_err(|e| {
            warn!(error = %e, "AI move attempted after game end");
        })?;
        if self.mode.ai_player() != Some(player) {
            warn!(%player, "AI move requested outside the AI's turn");
            return Err(GameError::new(GameErrorKind::NotAiTurn));
        }

        let choice = best_move(&self.board, player)?;
        let mv = Move::new(player, choice.position);
        self.commit(mv)?;
        info!(%mv, score = choice.score, "AI placed marker");
        Ok(mv)
    }

    /// Optimal move for whoever is to move. Does not change the session.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::SessionFinished`] once the game is over.
    #[instrument(skip(self))]
    pub fn suggest_move(&self) -> Result<ScoredMove, GameError> {
        let player = self.ongoing()?;
        best_move(&self.board, player)
    }

    /// Snapshot for rendering. The outcome is recomputed from the board.
    pub fn query_state(&self) -> SessionSnapshot {
        let outcome = evaluate(&self.board);
        debug_assert_eq!(
            outcome.is_terminal(),
            self.is_finished(),
            "cached state must agree with the board"
        );
        SessionSnapshot {
            board: self.board,
            outcome,
            to_move: self.to_move(),
            mode: self.mode,
            last_move: self.last_move(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board the session started from.
    pub(crate) fn initial_board(&self) -> &Board {
        &self.initial
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Moves played in this session, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Most recent move.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Player to move, `None` once finished.
    pub fn to_move(&self) -> Option<Player> {
        match self.state {
            SessionState::Ongoing(player) => Some(player),
            SessionState::Finished(_) => None,
        }
    }

    /// Final outcome, `None` while ongoing.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SessionState::Ongoing(_) => None,
            SessionState::Finished(outcome) => Some(outcome),
        }
    }

    /// Returns true once no more moves are accepted.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    /// Returns true when the shell should call [`Session::apply_ai_move`].
    pub fn is_ai_turn(&self) -> bool {
        matches!(self.to_move(), Some(player) if self.mode.ai_player() == Some(player))
    }

    /// Returns true when the shell should wait for human input.
    pub fn is_human_turn(&self) -> bool {
        self.to_move().is_some() && !self.is_ai_turn()
    }

    /// Player to move, or the finished error.
    fn ongoing(&self) -> Result<Player, GameError> {
        match self.state {
            SessionState::Ongoing(player) => Ok(player),
            SessionState::Finished(outcome) => Err(GameError::new(GameErrorKind::SessionFinished(outcome))),
        }
    }

    /// Places the mark and advances the state machine.
    fn commit(&mut self, mv: Move) -> Result<SessionState, GameError> {
        self.board.place_at(mv.position, mv.player).inspect_err(|e| {
            warn!(%mv, error = %e, "Rejected move");
        })?;
        self.history.push(mv);

        let outcome = evaluate(&self.board);
        self.state = SessionState::after(outcome, mv.player.opponent());
        debug!(%mv, state = ?self.state, "Move applied");
        if let SessionState::Finished(outcome) = self.state {
            info!(%outcome, moves = self.history.len(), "Game over");
        }

        debug_assert!(
            SessionInvariants::check_all(&*self).is_ok(),
            "session invariants violated after {mv}"
        );
        Ok(self.state)
    }
}
