use crate::game::{self, GameSession, SettleState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    session: &GameSession,
    cursor: (usize, usize),
    selected: Option<(usize, usize)>,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, session, cursor, selected, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, session: &GameSession, area: ratatui::layout::Rect) {
    let status = match session.state() {
        SettleState::Stable => format!("Score: {}", session.score()),
        SettleState::Settling => format!("Score: {}  |  settling...", session.score()),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Candy Crush"));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    session: &GameSession,
    cursor: (usize, usize),
    selected: Option<(usize, usize)>,
    area: ratatui::layout::Rect,
) {
    let board = session.board();
    let size = board.size();
    let mut lines = Vec::new();

    let hline = "═".repeat(size * 3);
    lines.push(Line::from(format!("╔{hline}╗")));

    for row in 0..size {
        let mut row_spans = vec![Span::raw("║")];
        for col in 0..size {
            let (symbol, color) = match board.color_at(row, col) {
                None | Some(game::Color::Blank) => (" . ", Color::DarkGray),
                Some(c) => (" ● ", token_color(c)),
            };

            let mut style = Style::default().fg(color);
            if selected == Some((row, col)) {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            if cursor == (row, col) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }
        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("╚{hline}╝")));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn token_color(color: game::Color) -> Color {
    match color {
        game::Color::Red => Color::Red,
        game::Color::Yellow => Color::Yellow,
        game::Color::Green => Color::Green,
        game::Color::Orange => Color::LightRed,
        game::Color::Blue => Color::Blue,
        game::Color::Purple => Color::Magenta,
        game::Color::Blank => Color::DarkGray,
    }
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let line = Line::from("Arrows: Move  |  Enter: Select/Swap  |  A: Auto  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(vec![line])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
