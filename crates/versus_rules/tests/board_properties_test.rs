//! Cross-board properties of the rules crate.

use versus_rules::{
    BattleshipBoard, Board, ConnectFourBoard, Coord, Marker, MoveEffect, Ocean, ReversiBoard,
    Score, Seat, ShipClass, ShotResult, TicTacToeBoard, WeiqiBoard, WinResult,
};

fn all_boards() -> Vec<Box<dyn Board>> {
    let mut one = Ocean::new();
    one.place(ShipClass::Destroyer, vec![Coord::new(1, 1), Coord::new(1, 2)])
        .unwrap();
    let mut two = Ocean::new();
    two.place(ShipClass::Destroyer, vec![Coord::new(4, 4), Coord::new(5, 4)])
        .unwrap();
    vec![
        Box::new(TicTacToeBoard::new()),
        Box::new(ConnectFourBoard::new()),
        Box::new(ReversiBoard::new()),
        Box::new(WeiqiBoard::with_size(9)),
        Box::new(BattleshipBoard::new(one, two)),
    ]
}

fn assert_alphabet(board: &dyn Board) {
    for (at, marker) in board.grid().squares() {
        assert!(
            board.admits(marker),
            "{} holds {marker:?} at {at}",
            board.kind()
        );
    }
}

/// Plays a few legal moves, alternating seats, checking invariants each step.
#[test]
fn test_invariants_hold_through_play() {
    for mut board in all_boards() {
        let mut seat = Seat::One;
        for _ in 0..6 {
            assert_alphabet(board.as_ref());
            let Some(at) = board
                .grid()
                .squares()
                .map(|(at, _)| at)
                .find(|at| board.is_valid_square(*at, seat))
            else {
                break;
            };
            let snapshot = board.to_string();
            let before = board.check_win();
            assert_eq!(board.check_win(), before, "{} check_win mutated", board.kind());
            assert_eq!(board.to_string(), snapshot);

            let first = board.is_valid_square(at, seat);
            assert_eq!(board.is_valid_square(at, seat), first);
            assert_eq!(board.to_string(), snapshot, "{} validity mutated", board.kind());

            board.set_square(at, seat);
            seat = seat.other();
        }
        assert_alphabet(board.as_ref());
    }
}

#[test]
fn test_tictactoe_diagonal_wins_on_third_move() {
    let mut board = TicTacToeBoard::new();
    board.set_square(Coord::new(1, 1), Seat::One);
    assert_eq!(board.check_win(), WinResult::Undecided);
    board.set_square(Coord::new(2, 2), Seat::One);
    assert_eq!(board.check_win(), WinResult::Undecided);
    board.set_square(Coord::new(3, 3), Seat::One);
    assert_eq!(
        board.check_win(),
        WinResult::Line {
            seat: Seat::One,
            cells: vec![Coord::new(1, 1), Coord::new(2, 2), Coord::new(3, 3)],
        }
    );
}

#[test]
fn test_connect_four_alternating_column_no_win() {
    let mut board = ConnectFourBoard::new();
    let mut seat = Seat::One;
    for _ in 0..6 {
        board.set_square(Coord::new(3, 1), seat);
        assert_eq!(board.check_win(), WinResult::Undecided);
        seat = seat.other();
    }
    assert!(!board.is_valid_square(Coord::new(3, 1), Seat::One));
}

#[test]
fn test_connect_four_seeded_vertical_wins() {
    let mut board = ConnectFourBoard::new();
    for y in 1..=3 {
        board.seed(Coord::new(6, y), Marker::Stone(Seat::Two));
    }
    assert_eq!(board.check_win(), WinResult::Undecided);
    let effect = board.set_square(Coord::new(6, 1), Seat::Two);
    assert_eq!(effect, MoveEffect::Dropped { at: Coord::new(6, 4) });
    assert!(matches!(board.check_win(), WinResult::Line { seat: Seat::Two, .. }));
}

#[test]
fn test_reversi_single_axis_capture() {
    let mut board = ReversiBoard::empty();
    board.seed(Coord::new(3, 3), Marker::Stone(Seat::One));
    board.seed(Coord::new(4, 3), Marker::Stone(Seat::Two));
    board.seed(Coord::new(5, 3), Marker::Stone(Seat::Two));
    board.seed(Coord::new(5, 4), Marker::Stone(Seat::Two));
    board.seed(Coord::new(6, 6), Marker::Stone(Seat::Two));

    assert!(board.is_valid_square(Coord::new(6, 3), Seat::One));
    board.set_square(Coord::new(6, 3), Seat::One);

    assert_eq!(board.grid().get(Coord::new(4, 3)), Some(Marker::Stone(Seat::One)));
    assert_eq!(board.grid().get(Coord::new(5, 3)), Some(Marker::Stone(Seat::One)));
    assert_eq!(board.grid().get(Coord::new(5, 4)), Some(Marker::Stone(Seat::Two)));
    assert_eq!(board.grid().get(Coord::new(6, 6)), Some(Marker::Stone(Seat::Two)));
    assert_eq!(board.score(), Score { one: 4, two: 2 });
}

#[test]
fn test_reversi_pass_detection() {
    let mut board = ReversiBoard::empty();
    board.seed(Coord::new(1, 1), Marker::Stone(Seat::One));
    board.seed(Coord::new(2, 1), Marker::Stone(Seat::Two));
    assert!(board.has_legal_move(Seat::One));
    // Seat two cannot flank a disc in the corner.
    assert!(!board.has_legal_move(Seat::Two));
    board.set_square(Coord::new(3, 1), Seat::One);
    assert!(!board.has_legal_move(Seat::Two));
    assert!(!board.has_legal_move(Seat::One));
}

#[test]
fn test_weiqi_lone_stone_captured() {
    let mut board = WeiqiBoard::with_size(9);
    board.seed(Coord::new(5, 5), Marker::Stone(Seat::Two));
    board.set_square(Coord::new(4, 5), Seat::One);
    board.set_square(Coord::new(6, 5), Seat::One);
    board.set_square(Coord::new(5, 4), Seat::One);
    assert_eq!(board.grid().get(Coord::new(5, 5)), Some(Marker::Stone(Seat::Two)));
    board.set_square(Coord::new(5, 6), Seat::One);
    assert_eq!(board.grid().get(Coord::new(5, 5)), Some(Marker::Empty));
    assert_eq!(board.prisoners(Seat::One), 1);
}

#[test]
fn test_weiqi_group_with_liberty_survives() {
    let mut board = WeiqiBoard::with_size(9);
    board.seed(Coord::new(5, 5), Marker::Stone(Seat::Two));
    board.seed(Coord::new(6, 5), Marker::Stone(Seat::Two));
    for at in [Coord::new(4, 5), Coord::new(5, 4), Coord::new(5, 6), Coord::new(6, 4)] {
        board.set_square(at, Seat::One);
    }
    assert_eq!(board.grid().get(Coord::new(5, 5)), Some(Marker::Stone(Seat::Two)));
    assert_eq!(board.grid().get(Coord::new(6, 5)), Some(Marker::Stone(Seat::Two)));
    assert_eq!(board.prisoners(Seat::One), 0);
}

#[test]
fn test_weiqi_suicide_is_legal_and_removes_own_stone() {
    let mut board = WeiqiBoard::with_size(9);
    board.seed(Coord::new(2, 1), Marker::Stone(Seat::One));
    board.seed(Coord::new(1, 2), Marker::Stone(Seat::One));
    assert!(board.is_valid_square(Coord::new(1, 1), Seat::Two));
    board.set_square(Coord::new(1, 1), Seat::Two);
    assert_eq!(board.grid().get(Coord::new(1, 1)), Some(Marker::Empty));
    assert_eq!(board.prisoners(Seat::One), 1);
}

#[test]
fn test_battleship_destroyer_sunk_in_two_shots() {
    let mut red = Ocean::new();
    red.place(ShipClass::Carrier, (1..=5).map(|x| Coord::new(x, 9)).collect())
        .unwrap();
    let mut blue = Ocean::new();
    blue.place(ShipClass::Destroyer, vec![Coord::new(3, 3), Coord::new(3, 4)])
        .unwrap();
    blue.place(ShipClass::Cruiser, (6..=8).map(|x| Coord::new(x, 1)).collect())
        .unwrap();
    let mut board = BattleshipBoard::new(red, blue);

    let before = board.remaining().two;
    assert_eq!(
        board.set_square(Coord::new(3, 3), Seat::One),
        MoveEffect::Shot { at: Coord::new(3, 3), result: ShotResult::Hit }
    );
    assert_eq!(
        board.set_square(Coord::new(3, 4), Seat::One),
        MoveEffect::Shot {
            at: Coord::new(3, 4),
            result: ShotResult::Sunk(ShipClass::Destroyer)
        }
    );
    assert_eq!(board.remaining().two, before - 2);
    assert_eq!(board.remaining().one, 5);
}
