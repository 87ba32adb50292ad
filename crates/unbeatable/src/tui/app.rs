//! Application state and logic.

use crate::tui::input::{Action, move_cursor};
use crate::tui::scheduler::defer_computer_move;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use unbeatable_tictactoe::{MoveError, MoveTicket, Position, TurnController, TurnState};

/// Main application state.
pub struct App {
    controller: TurnController,
    cursor: Position,
    status_message: String,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tickets: mpsc::UnboundedSender<MoveTicket>,
}

const WELCOME: &str = "Your move. Arrows + Enter or 1-9 to place, r to reset, q to quit.";

impl App {
    /// Creates a new application.
    ///
    /// Deferred computer moves are delivered on `tickets` after `delay`.
    pub fn new(delay: Duration, tickets: mpsc::UnboundedSender<MoveTicket>) -> Self {
        Self {
            controller: TurnController::new(),
            cursor: Position::Center,
            status_message: WELCOME.to_string(),
            delay,
            pending: None,
            tickets,
        }
    }

    /// Gets the turn controller.
    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True while a deferred computer move is outstanding.
    pub fn is_waiting_on_computer(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies a key action. Returns `false` when the app should exit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!(?action, "Handling action");
        match action {
            Action::Quit => {
                self.cancel_pending();
                return false;
            }
            Action::Reset => self.restart(),
            Action::PlaceAtCursor => self.place(self.cursor.index()),
            Action::Place(index) => {
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                self.place(index);
            }
            Action::MoveCursor(key) => self.cursor = move_cursor(self.cursor, key),
            Action::Ignore => {}
        }
        true
    }

    /// Places X at `index` and, if the game goes on, defers the computer's reply.
    pub fn place(&mut self, index: usize) {
        match self.controller.apply_human_move(index) {
            Ok(outcome) if outcome.is_terminal() => {
                self.status_message = outcome.to_string();
            }
            Ok(_) => {
                self.status_message = "Computer is thinking...".to_string();
                self.schedule_computer_move();
            }
            Err(e) => {
                debug!(error = %e, "Human move rejected");
                self.status_message = format!("Invalid move: {}", e);
            }
        }
    }

    fn schedule_computer_move(&mut self) {
        match self.controller.schedule_computer_move() {
            Ok(ticket) => {
                self.cancel_pending();
                self.pending = Some(defer_computer_move(
                    ticket,
                    self.delay,
                    self.tickets.clone(),
                ));
            }
            Err(e) => warn!(error = %e, "Could not schedule computer move"),
        }
    }

    /// Plays a deferred computer move delivered by the scheduler.
    ///
    /// Tickets from before a reset are discarded without touching the board.
    pub fn handle_ticket(&mut self, ticket: MoveTicket) {
        match self.controller.resolve_ticket(ticket) {
            Ok(reply) => {
                self.pending = None;
                self.status_message = if reply.outcome().is_terminal() {
                    reply.outcome().to_string()
                } else {
                    format!("Computer played {}. Your move.", reply.position().label())
                };
            }
            Err(MoveError::StaleTicket { .. }) => {
                debug!(?ticket, "Stale deferred move discarded");
            }
            Err(e) => {
                warn!(error = %e, "Deferred computer move failed");
                self.status_message = format!("Computer move failed: {}", e);
            }
        }
    }

    /// Restarts the game, cancelling any outstanding computer move.
    pub fn restart(&mut self) {
        self.cancel_pending();
        self.controller.reset();
        self.cursor = Position::Center;
        self.status_message = WELCOME.to_string();
        info!(generation = self.controller.generation(), "Game restarted");
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!("Aborting deferred computer move");
            handle.abort();
        }
    }

    /// Whether the human can place a mark right now.
    pub fn is_human_turn(&self) -> bool {
        self.controller.state() == TurnState::WaitingForHuman
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn app() -> (App, mpsc::UnboundedReceiver<MoveTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(Duration::from_millis(5), tx), rx)
    }

    #[tokio::test]
    async fn test_place_defers_computer_reply() {
        let (mut app, mut rx) = app();
        assert!(app.dispatch(Action::Place(0)));
        assert_eq!(app.controller().state(), TurnState::ComputerThinking);
        assert!(app.is_waiting_on_computer());

        let ticket = rx.recv().await.unwrap();
        app.handle_ticket(ticket);
        assert!(app.is_human_turn());
        assert!(!app.is_waiting_on_computer());
        assert_eq!(app.controller().board().marks_placed(), 2);
    }

    #[tokio::test]
    async fn test_occupied_cell_reports_error() {
        let (mut app, mut rx) = app();
        app.place(4);
        let ticket = rx.recv().await.unwrap();
        app.handle_ticket(ticket);

        app.place(4);
        assert!(app.status_message().starts_with("Invalid move"));
        assert_eq!(app.controller().board().marks_placed(), 2);
    }

    #[tokio::test]
    async fn test_cursor_and_quit() {
        let (mut app, _rx) = app();
        app.dispatch(Action::MoveCursor(KeyCode::Up));
        assert_eq!(app.cursor(), Position::TopCenter);
        app.dispatch(Action::PlaceAtCursor);
        assert_eq!(app.controller().history().len(), 1);
        assert!(!app.dispatch(Action::Quit));
    }

    #[tokio::test]
    async fn test_restart_discards_stale_ticket() {
        let (mut app, _rx) = app();
        app.place(0);
        let stale = app.controller().schedule_computer_move().unwrap();

        app.dispatch(Action::Reset);
        assert!(!app.is_waiting_on_computer());
        assert_eq!(app.status_message(), WELCOME);

        app.handle_ticket(stale);
        assert_eq!(app.controller().board().marks_placed(), 0);
        assert!(app.is_human_turn());
    }
}
