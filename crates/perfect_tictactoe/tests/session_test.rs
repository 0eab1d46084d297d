//! Tests for the session state machine.

use perfect_tictactoe::{
    Board, GameErrorKind, GameMode, Move, Outcome, Player, Position, Session, SessionState,
};

fn session_from(mode: GameMode, text: &str) -> Session {
    Session::from_board(mode, text.parse().expect("valid board text")).expect("balanced board")
}

#[test]
fn test_human_move_on_resumed_board() {
    let mut session = session_from(GameMode::HumanVsHuman, "X../.O./...");
    assert_eq!(session.to_move(), Some(Player::X));

    let state = session.apply_human_move(2, 2).unwrap();
    assert_eq!(state, SessionState::Ongoing(Player::O));

    let snapshot = session.query_state();
    assert_eq!(*snapshot.outcome(), Outcome::Ongoing);
    assert_eq!(*snapshot.to_move(), Some(Player::O));
}

#[test]
fn test_occupied_cell_rejected_without_change() {
    let mut session = Session::new(GameMode::HumanVsHuman);
    session.apply_human_move(1, 1).unwrap();
    let board_before = *session.board();

    let err = session.apply_human_move(1, 1).unwrap_err();
    assert_eq!(err.kind(), GameErrorKind::CellOccupied { row: 1, col: 1 });
    assert_eq!(*session.board(), board_before);
    assert_eq!(session.to_move(), Some(Player::O));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_out_of_bounds_rejected_without_change() {
    let mut session = Session::new(GameMode::HumanVsAi);
    let err = session.apply_human_move(0, 3).unwrap_err();
    assert_eq!(err.kind(), GameErrorKind::OutOfBounds { row: 0, col: 3 });
    assert_eq!(*session.board(), Board::new());
    assert_eq!(session.state(), SessionState::Ongoing(Player::X));
}

#[test]
fn test_finished_session_rejects_everything() {
    let mut session = Session::new(GameMode::HumanVsHuman);
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
        session.apply_human_move(row, col).unwrap();
    }
    let finished = SessionState::Finished(Outcome::Win(Player::X));
    assert_eq!(session.state(), finished);

    let board = *session.board();
    for _ in 0..2 {
        let err = session.apply_human_move(2, 2).unwrap_err();
        assert_eq!(
            err.kind(),
            GameErrorKind::SessionFinished(Outcome::Win(Player::X))
        );
        let err = session.apply_ai_move().unwrap_err();
        assert_eq!(
            err.kind(),
            GameErrorKind::SessionFinished(Outcome::Win(Player::X))
        );
        assert_eq!(session.state(), finished);
        assert_eq!(*session.board(), board);
    }
    assert_eq!(*session.query_state().to_move(), None);
}

#[test]
fn test_draw_finishes_session() {
    let mut session = Session::new(GameMode::HumanVsHuman);
    // X O X / X O O / O X X
    for (row, col) in [
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
        (2, 2),
    ] {
        session.apply_human_move(row, col).unwrap();
    }
    assert_eq!(session.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_human_vs_ai_turn_cycle() {
    let mut session = Session::new(GameMode::HumanVsAi);
    assert!(session.is_human_turn());

    session.apply_human_move(1, 1).unwrap();
    assert!(session.is_ai_turn());
    assert!(!session.is_human_turn());

    let reply = session.apply_ai_move().unwrap();
    assert_eq!(reply, Move::new(Player::O, Position::TopLeft));
    assert!(session.is_human_turn());
    assert_eq!(session.last_move(), Some(reply));
}

#[test]
fn test_ai_blocks_immediate_threat() {
    let mut session = session_from(GameMode::HumanVsAi, "O../XX./...");
    let reply = session.apply_ai_move().unwrap();
    assert_eq!(reply.position, Position::MiddleRight);
    assert_eq!(session.to_move(), Some(Player::X));
}

#[test]
fn test_snapshot_serializes() {
    let mut session = Session::new(GameMode::HumanVsAi);
    session.apply_human_move(0, 0).unwrap();
    let snapshot = session.query_state();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["mode"], "human-vs-ai");
    assert_eq!(json["to_move"], "O");
    assert_eq!(json["outcome"], "Ongoing");
}

#[test]
fn test_sessions_are_independent_across_threads() {
    let handles: Vec<_> = (0..3)
        .map(|col| {
            std::thread::spawn(move || {
                let mut session = Session::new(GameMode::HumanVsAi);
                session.apply_human_move(0, col).unwrap();
                session.apply_ai_move().unwrap();
                *session.board()
            })
        })
        .collect();

    for (col, handle) in handles.into_iter().enumerate() {
        let board = handle.join().unwrap();
        assert_eq!(board.count(Player::X), 1);
        assert_eq!(board.count(Player::O), 1);
        assert_eq!(board.cell_at(0, col).unwrap(), Player::X.mark());
    }
}
