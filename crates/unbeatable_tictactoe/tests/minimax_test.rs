//! Optimality tests for the minimax search.

use unbeatable_tictactoe::{
    Board, DRAW, Minimax, O_WINS, Position, TurnController, audit_all_strategies,
};

#[test]
fn test_search_leaves_input_unchanged_and_is_repeatable() {
    let board: Board = "X../.O./..X".parse().expect("valid board");
    let before = board;

    let mut search = Minimax::new();
    let first = search.best_move(&board).expect("moves remain");
    let second = search.best_move(&board).expect("moves remain");

    assert_eq!(board, before);
    assert_eq!(first, second);
}

#[test]
fn test_score_round_trips_scratch_board() {
    let mut board: Board = "X........".parse().expect("valid board");
    let before = board;
    let mut search = Minimax::new();

    let first = search.score(&mut board, true);
    let second = search.score(&mut board, true);

    assert_eq!(board, before);
    assert_eq!(first, second);
    assert_eq!(first, DRAW);
}

#[test]
fn test_prefers_lowest_index_forced_win() {
    // O can win at once on 5, but blocking at 2 also forces a win
    // (X must answer 5, then O completes 2-4-6), and 2 comes first.
    let board: Board = "XX./OO./..X".parse().expect("valid board");
    let result = Minimax::new().best_move(&board).expect("moves remain");
    assert_eq!(*result.position(), Position::TopRight);
    assert_eq!(*result.score(), O_WINS);
}

#[test]
fn test_corner_and_center_position_is_at_worst_a_draw() {
    // X at 0, O at 4, X to move.
    let mut controller = TurnController::new();
    controller.apply_human_move(0).expect("valid opening");
    let reply = controller.request_computer_move().expect("computer owes a move");
    assert_eq!(*reply.position(), Position::Center);

    let report = audit_all_strategies(&controller);
    assert!(*report.games() > 0);
    assert_eq!(*report.human_wins(), 0);
}

#[test]
fn test_computer_never_loses_from_empty_board() {
    let report = audit_all_strategies(&TurnController::new());
    assert!(report.computer_never_loses(), "{report}");
    assert!(*report.computer_wins() > 0);
    assert!(*report.draws() > 0);
    assert_eq!(
        *report.games(),
        report.computer_wins() + report.draws() + report.human_wins()
    );
}
