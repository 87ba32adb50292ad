//! Deferred computer moves through the app and the scheduler.

use crossterm::event::KeyCode;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use unbeatable::{Action, App, action_for};
use unbeatable_tictactoe::{Position, TurnState};

#[tokio::test]
async fn test_reset_during_delay_drops_the_move() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(Duration::from_millis(100), tx);

    app.dispatch(Action::Place(0));
    assert_eq!(app.controller().state(), TurnState::ComputerThinking);

    app.dispatch(Action::Reset);
    assert!(app.controller().board().cells().iter().all(|c| c.is_empty()));

    // The aborted reply never arrives.
    let late = timeout(Duration::from_millis(300), rx.recv()).await;
    assert!(!matches!(late, Ok(Some(_))));
    assert_eq!(app.controller().board().marks_placed(), 0);
    assert_eq!(app.controller().state(), TurnState::WaitingForHuman);
}

#[tokio::test]
async fn test_reply_after_reset_belongs_to_new_game() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(Duration::from_millis(20), tx);

    app.dispatch(Action::Place(0));
    app.dispatch(Action::Reset);
    app.dispatch(Action::Place(8));

    let ticket = timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*ticket.generation(), 1);

    app.handle_ticket(ticket);
    assert_eq!(app.controller().board().marks_placed(), 2);
    assert_eq!(
        app.controller().board().get(Position::BottomRight).mark(),
        Some(unbeatable_tictactoe::Player::X)
    );
    assert_eq!(app.controller().state(), TurnState::WaitingForHuman);
}

#[tokio::test]
async fn test_keyboard_game_to_the_end() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(Duration::ZERO, tx);

    // Always take the first empty cell by number key.
    while app.controller().state() != TurnState::GameOver {
        let cell = app
            .controller()
            .board()
            .empty_positions()
            .next()
            .unwrap();
        let key = char::from_digit(cell.index() as u32 + 1, 10).unwrap();
        assert!(app.dispatch(action_for(KeyCode::Char(key))));

        if app.controller().state() == TurnState::ComputerThinking {
            let ticket = rx.recv().await.unwrap();
            app.handle_ticket(ticket);
        }
    }

    assert_ne!(
        app.controller().outcome().winner(),
        Some(unbeatable_tictactoe::Player::X)
    );
    assert!(!app.dispatch(action_for(KeyCode::Char('q'))));
}
