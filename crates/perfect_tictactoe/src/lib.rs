//! Perfect tic-tac-toe - game-state engine
//!
//! Board representation, win/draw detection, exhaustive minimax and a session
//! state machine for human-vs-human or human-vs-AI play. Rendering and input
//! belong to the caller: a shell starts a [`Session`], forwards user intent
//! to it and renders [`Session::query_state`].
//!
//! # Architecture
//!
//! - **Board**: fixed 3x3 grid of cells
//! - **Rules**: outcome evaluation (win before draw)
//! - **Search**: exhaustive minimax, O maximizes and X minimizes
//! - **Session**: turn order, game mode, finished/ongoing state machine
//!
//! # Example
//!
//! ```
//! use perfect_tictactoe::{GameMode, Outcome, Player, Session};
//!
//! # fn example() -> Result<(), perfect_tictactoe::GameError> {
//! let mut session = Session::new(GameMode::HumanVsAi);
//! session.apply_human_move(1, 1)?;
//! let reply = session.apply_ai_move()?;
//! assert_eq!(reply.player, Player::O);
//! assert_eq!(*session.query_state().outcome(), Outcome::Ongoing);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod invariants;
mod position;
pub mod rules;
pub mod search;
mod session;
mod types;

// Crate-level exports - Domain types
pub use action::Move;
pub use board::{Board, ParseBoardError};
pub use position::Position;
pub use types::{Cell, Player};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - Rules and search
pub use rules::{evaluate, Outcome};
pub use search::{best_move, rank_moves, Score, ScoredMove};

// Crate-level exports - Session
pub use invariants::{
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation, MarkBalanceInvariant,
    SessionInvariants, TurnMatchesBoardInvariant,
};
pub use session::{GameMode, Session, SessionSnapshot, SessionState};
