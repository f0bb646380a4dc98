use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::{GameSnapshot, GameStatus};

/// Draws the one-line status bar: score, length, board size and phase.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &GameSnapshot) {
    frame.render_widget(
        Paragraph::new(hud_line(snapshot)).alignment(Alignment::Center),
        area,
    );
}

fn hud_line(snapshot: &GameSnapshot) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let (status_text, status_color) = match snapshot.status {
        GameStatus::Running => ("running", Color::Green),
        GameStatus::GameOver => ("game over", Color::Red),
    };

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(snapshot.snake_length.to_string(), value),
        Span::styled("  Board ", label),
        Span::styled(format!("{0}x{0}", snapshot.board_size), value),
        Span::styled("  ", label),
        Span::styled(status_text, Style::default().fg(status_color)),
    ])
}
