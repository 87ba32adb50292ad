//! Deferred computer moves.
//!
//! The computer answers after a short pause so the human sees their own mark
//! first. The pause runs on a tokio task that hands the move ticket back to
//! the UI loop; aborting the task cancels the move.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, instrument};
use unbeatable_tictactoe::MoveTicket;

/// Sends `ticket` on `tx` once `delay` has passed.
#[instrument(skip(tx))]
pub fn defer_computer_move(
    ticket: MoveTicket,
    delay: Duration,
    tx: mpsc::UnboundedSender<MoveTicket>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(delay).await;
        if tx.send(ticket).is_err() {
            debug!(?ticket, "UI loop closed, dropping deferred move");
        }
    })
}
