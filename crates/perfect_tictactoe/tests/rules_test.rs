//! Exhaustive checks of outcome evaluation over every reachable mark count.

use perfect_tictactoe::{evaluate, rules::LINES, Board, Cell, Outcome, Player, Position};

/// Every board with X count equal to O count or one more.
fn balanced_boards() -> impl Iterator<Item = Board> {
    (0..3usize.pow(9)).filter_map(|mut code| {
        let mut board = Board::new();
        for pos in Position::ALL {
            match code % 3 {
                1 => board.place_at(pos, Player::X).ok()?,
                2 => board.place_at(pos, Player::O).ok()?,
                _ => {}
            }
            code /= 3;
        }
        board.side_to_move().ok().map(|_| board)
    })
}

fn line_owners(board: &Board) -> Vec<Player> {
    let mut owners: Vec<Player> = LINES
        .into_iter()
        .filter_map(|line| {
            let cells = line.map(|pos| board.get(pos));
            match cells {
                [Cell::Occupied(a), Cell::Occupied(b), Cell::Occupied(c)] if a == b && b == c => {
                    Some(a)
                }
                _ => None,
            }
        })
        .collect();
    owners.dedup();
    owners
}

#[test]
fn test_completed_line_is_a_win_for_its_owner() {
    let mut checked = 0;
    for board in balanced_boards() {
        if let [owner] = line_owners(&board)[..] {
            assert_eq!(evaluate(&board), Outcome::Win(owner), "\n{board}");
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut draws = 0;
    for board in balanced_boards().filter(|b| b.is_full() && line_owners(b).is_empty()) {
        assert_eq!(evaluate(&board), Outcome::Draw, "\n{board}");
        draws += 1;
    }
    // Distinct drawn final positions with X moving first.
    assert_eq!(draws, 16);
}

#[test]
fn test_open_board_without_line_is_ongoing() {
    for board in balanced_boards().filter(|b| !b.is_full() && line_owners(b).is_empty()) {
        assert_eq!(evaluate(&board), Outcome::Ongoing, "\n{board}");
    }
}
