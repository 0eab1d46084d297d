//! Stateless UI rendering.

use crate::app::{App, Screen};
use crate::input::mode_entries;
use perfect_tictactoe::{rules::winning_line, Board, Cell, GameMode, Outcome, Player, Position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the current screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Body
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let help = match app.screen() {
        Screen::Menu => {
            draw_menu(frame, chunks[1], app.menu_selection());
            "1/2 or arrows + Enter: choose | Q: Quit"
        }
        Screen::Playing => {
            if let Some(session) = app.session() {
                let snapshot = session.query_state();
                draw_board(
                    frame,
                    chunks[1],
                    app,
                    snapshot.board(),
                    *snapshot.outcome(),
                    *snapshot.mode(),
                );
            }
            "Arrows + Enter/Space or 1-9: move | H: Hint | R: Menu | Q: Quit"
        }
    };

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_menu(frame: &mut Frame, area: Rect, selected: GameMode) {
    let lines: Vec<Line> = mode_entries()
        .map(|(key, mode)| {
            let text = format!("{}. {}", key, mode.label());
            let style = if mode == selected {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Game mode"));
    frame.render_widget(menu, center_rect(area, 30, 4));
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    board: &Board,
    outcome: Outcome,
    mode: GameMode,
) {
    let highlight = winning_line(board).map(|(_, line)| line);
    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        if row > 0 {
            lines.push(Line::from(Span::styled(
                "───┼───┼───",
                Style::default().fg(Color::DarkGray),
            )));
        }
        let mut spans = Vec::with_capacity(5);
        for col in 0..3 {
            if col > 0 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            let pos = Position::ALL[row * 3 + col];
            let in_line = highlight.is_some_and(|line| line.contains(&pos));
            spans.push(cell_span(board.get(pos), pos, app, in_line));
        }
        lines.push(Line::from(spans));
    }

    let title = match outcome {
        Outcome::Win(player) => describe_winner(player, mode).to_string(),
        Outcome::Draw => "Draw".to_string(),
        Outcome::Ongoing => mode.label().to_string(),
    };
    let grid = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(grid, center_rect(area, 17, 7));
}

/// Title text for a won game.
fn describe_winner(player: Player, mode: GameMode) -> &'static str {
    match (mode.ai_player() == Some(player), player) {
        (true, _) => "The AI wins",
        (false, Player::X) => "X wins",
        (false, Player::O) => "O wins",
    }
}

fn cell_span(cell: Cell, pos: Position, app: &App, in_winning_line: bool) -> Span<'static> {
    let (symbol, base) = match cell {
        Cell::Empty if app.hint() == Some(pos) => (" ? ", Style::default().fg(Color::Magenta)),
        Cell::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Cell::Occupied(Player::X) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Player::O) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if in_winning_line {
        base.bg(Color::Green)
    } else if pos == app.cursor() && !app.session().is_some_and(|s| s.is_finished()) {
        base.bg(Color::White).fg(Color::Black)
    } else {
        base
    };
    Span::styled(symbol, style)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
