//! Stateless UI rendering for tic-tac-toe.

use crate::tui::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unbeatable_tictactoe::{
    Board, Cell, Orientation, Outcome, Player, Position, TurnController, TurnState, WinPattern,
};

/// Renders the whole screen from app state.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let controller = app.controller();
    let outcome = controller.outcome();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Turn / result
            Constraint::Min(9),    // Board
            Constraint::Length(1), // Win line / game over note
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Unbeatable - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let headline = Paragraph::new(headline_text(controller))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(headline, chunks[1]);

    draw_board(
        frame,
        chunks[2],
        controller.board(),
        app.cursor(),
        outcome.winning_pattern(),
        controller.state() == TurnState::WaitingForHuman,
    );

    if let Some(note) = footer_text(&outcome) {
        let note = Paragraph::new(note)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        frame.render_widget(note, chunks[3]);
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[4]);
}

/// Turn indicator while playing, result text once the game is over.
pub fn headline_text(controller: &TurnController) -> String {
    match controller.state() {
        TurnState::WaitingForHuman => format!("Turn: {}", Player::X),
        TurnState::ComputerThinking => format!("Turn: {}", Player::O),
        TurnState::GameOver => controller.outcome().to_string(),
    }
}

/// Win line description and replay hint for a finished game.
pub fn footer_text(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Draw => Some("Press r to play again".to_string()),
        Outcome::Won { pattern, .. } => Some(format!(
            "{} {} - Press r to play again",
            pattern.label(),
            line_glyph(*pattern)
        )),
    }
}

fn line_glyph(pattern: WinPattern) -> &'static str {
    match pattern.geometry().orientation {
        Orientation::Horizontal => "───",
        Orientation::Vertical => "│",
        Orientation::Diagonal => "╲",
        Orientation::AntiDiagonal => "╱",
    }
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    winning: Option<WinPattern>,
    show_cursor: bool,
) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
                Constraint::Length(1),
                Constraint::Length(12),
            ])
            .split(chunk);

        for (column, cell_area) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
            if let Some(pos) = Position::from_index(row * 3 + column) {
                let highlight = CellHighlight {
                    cursor: show_cursor && pos == cursor,
                    winning: winning.is_some_and(|pattern| pattern.contains(pos)),
                };
                draw_cell(frame, cell_area, board.get(pos), pos, highlight);
            }
        }
        draw_separator_vertical(frame, cols[1]);
        draw_separator_vertical(frame, cols[3]);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

#[derive(Debug, Clone, Copy)]
struct CellHighlight {
    cursor: bool,
    winning: bool,
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: Cell, pos: Position, highlight: CellHighlight) {
    let (symbol, base_style) = match cell {
        Cell::Empty => (
            format!("{}", pos.index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if highlight.winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if highlight.cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {} ", symbol), style)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
