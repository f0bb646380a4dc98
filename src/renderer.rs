use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::game::GameSnapshot;
use crate::grid::{Cell, Position};
use crate::ui::Overlay;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_leaderboard};

/// Terminal columns per board cell, so cells look roughly square.
const CELL_WIDTH: u16 = 2;

const GLYPH_CELL: &str = "██";
const SNAKE_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;

/// Renders the full game frame from a snapshot plus the current overlay.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, overlay: &Overlay) {
    let area = frame.area();
    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let board_rect = board_rect(board_area, snapshot.board_size);
    let block = Block::bordered().title(" wrap-snake ");
    let inner = block.inner(board_rect);
    frame.render_widget(block, board_rect);

    render_cells(frame.buffer_mut(), inner, snapshot);
    render_hud(frame, hud_area, snapshot);

    match overlay {
        Overlay::None => {}
        Overlay::NameEntry(name) => {
            render_game_over_menu(frame, area, snapshot.score, snapshot.end_reason, name);
        }
        Overlay::Leaderboard(entries) => render_leaderboard(frame, area, entries),
    }
}

fn render_cells(buffer: &mut Buffer, inner: Rect, snapshot: &GameSnapshot) {
    let size = i32::from(snapshot.board_size);
    for y in 0..size {
        for x in 0..size {
            let position = Position::new(x, y);
            let style = match snapshot.cell(position) {
                Some(Cell::SnakeBody) if position == snapshot.head => Style::new()
                    .fg(SNAKE_COLOR)
                    .add_modifier(Modifier::BOLD),
                Some(Cell::SnakeBody) => Style::new().fg(SNAKE_COLOR).add_modifier(Modifier::DIM),
                Some(Cell::Food) => Style::new().fg(FOOD_COLOR),
                Some(Cell::Empty) | None => continue,
            };

            if let Some((column, row)) = cell_to_terminal(inner, position) {
                buffer.set_string(column, row, GLYPH_CELL, style);
            }
        }
    }
}

/// Bordered rectangle holding the board, centred in `area` and clamped to fit.
fn board_rect(area: Rect, board_size: u16) -> Rect {
    let width = board_size.saturating_mul(CELL_WIDTH).saturating_add(2).min(area.width);
    let height = board_size.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn cell_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
