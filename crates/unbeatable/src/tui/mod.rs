//! Terminal UI for Unbeatable.

mod app;
mod input;
mod scheduler;
mod ui;

pub use app::App;
pub use input::{Action, action_for, move_cursor};
pub use scheduler::defer_computer_move;

use crate::config::Settings;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use unbeatable_tictactoe::MoveTicket;

/// Runs the interactive game until the player quits.
#[instrument(skip_all, fields(delay_ms = *settings.computer_delay_ms()))]
pub async fn run_tui(settings: Settings) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Deferred computer moves come back over this channel
    let (ticket_tx, mut ticket_rx) = mpsc::unbounded_channel();
    let app = App::new(settings.computer_delay(), ticket_tx);

    let res = run_app(&mut terminal, app, &mut ticket_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Terminal UI closed");
    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    ticket_rx: &mut mpsc::UnboundedReceiver<MoveTicket>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // Deliver any computer move whose delay has elapsed
        while let Ok(ticket) = ticket_rx.try_recv() {
            app.handle_ticket(ticket);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !app.dispatch(action_for(key.code)) {
                    info!("User quit");
                    return Ok(());
                }
            }
        }

        tokio::task::yield_now().await;
    }
}
