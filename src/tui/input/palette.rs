use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use super::edit_line;
use crate::tui::app::{App, Mode};

/// Keys in the command palette. Typing only schedules a search; the event
/// loop runs it once input goes quiet.
pub(super) fn handle_palette(app: &mut App, key: KeyEvent, now: Instant) {
    let Some(palette) = &mut app.palette else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Esc => app.close_palette(),
        KeyCode::Enter => app.palette_accept(),
        KeyCode::Up => palette.selected = palette.selected.saturating_sub(1),
        KeyCode::Down => {
            if palette.selected + 1 < palette.results.len() {
                palette.selected += 1;
            }
        }
        _ => {
            if edit_line(&mut palette.input, key) {
                let query = palette.input.text().to_string();
                if query.trim().is_empty() {
                    palette.debounce.cancel();
                    palette.results.clear();
                    palette.selected = 0;
                } else {
                    palette.debounce.schedule(query, now);
                }
            }
        }
    }
}
