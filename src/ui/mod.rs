pub mod hud;
pub mod menu;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::leaderboard::ScoreEntry;

/// Longest name accepted for a leaderboard entry.
pub const MAX_NAME_LEN: usize = 16;

/// Screen layered over the board by the front-end.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Overlay {
    /// Game in progress, nothing on top.
    #[default]
    None,
    /// Game over; the player types a name for the leaderboard.
    NameEntry(NameInput),
    /// Top scores after saving or skipping.
    Leaderboard(Vec<ScoreEntry>),
}

/// What a key did to a [`NameInput`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NameInputEvent {
    Submit,
    Skip,
    Edited,
    Ignored,
}

/// Single-line text field for the player's name.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct NameInput {
    value: String,
}

impl NameInput {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn apply(&mut self, key: &KeyEvent) -> NameInputEvent {
        if key.kind != KeyEventKind::Press || key.modifiers.contains(KeyModifiers::CONTROL) {
            return NameInputEvent::Ignored;
        }

        match key.code {
            KeyCode::Enter => NameInputEvent::Submit,
            KeyCode::Esc => NameInputEvent::Skip,
            KeyCode::Backspace => {
                if self.value.pop().is_some() {
                    NameInputEvent::Edited
                } else {
                    NameInputEvent::Ignored
                }
            }
            KeyCode::Char(c) if !c.is_control() && self.value.chars().count() < MAX_NAME_LEN => {
                self.value.push(c);
                NameInputEvent::Edited
            }
            _ => NameInputEvent::Ignored,
        }
    }
}
