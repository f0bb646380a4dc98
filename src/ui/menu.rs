use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::EndReason;
use crate::leaderboard::ScoreEntry;
use crate::ui::NameInput;

/// Draws the game-over popup with the name prompt.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    end_reason: Option<EndReason>,
    name: &NameInput,
) {
    let popup = centered_popup(area, 44, 9);
    frame.render_widget(Clear, popup);

    let title = if end_reason.is_some_and(EndReason::is_win) {
        "YOU WIN"
    } else {
        "GAME OVER"
    };

    let lines = vec![
        Line::from(title).style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Score: {score}")),
        Line::from(cause_text(end_reason)),
        Line::from(""),
        Line::from(format!("Name: {}_", name.value())),
        Line::from("[Enter] Save  [Esc] Skip").style(Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the top-scores popup.
pub fn render_leaderboard(frame: &mut Frame<'_>, area: Rect, entries: &[ScoreEntry]) {
    let height = u16::try_from(entries.len()).unwrap_or(u16::MAX).saturating_add(6);
    let popup = centered_popup(area, 36, height);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("Top 5 Scores").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
    ];
    if entries.is_empty() {
        lines.push(Line::from("No scores yet"));
    }
    lines.extend(entries.iter().enumerate().map(|(rank, entry)| {
        Line::from(format!("{}. {} - {}", rank + 1, entry.name, entry.score))
    }));
    lines.push(Line::from(""));
    lines.push(
        Line::from("[R]/[Enter] Play Again  [Q] Quit").style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" leaderboard ")),
        popup,
    );
}

fn cause_text(end_reason: Option<EndReason>) -> &'static str {
    match end_reason {
        Some(EndReason::SelfCollision) => "Cause: hit yourself",
        Some(EndReason::BoardFull) => "Cause: board full",
        None => "",
    }
}

/// Centres a `width` x `height` rectangle in `area`, clamped to fit.
fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::game::EndReason;

    use super::{cause_text, centered_popup};

    #[test]
    fn popup_is_centred_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);

        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(20, 7, 40, 10));

        let clamped = centered_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(clamped.width, 20);
        assert_eq!(clamped.height, 5);
    }

    #[test]
    fn cause_names_the_ending() {
        assert_eq!(
            cause_text(Some(EndReason::SelfCollision)),
            "Cause: hit yourself"
        );
        assert_eq!(cause_text(Some(EndReason::BoardFull)), "Cause: board full");
        assert_eq!(cause_text(None), "");
    }
}
