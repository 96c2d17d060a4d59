use crossterm::event::{KeyCode, KeyEvent};

use super::edit_line;
use crate::model::ProjectStatus;
use crate::ops::filter::SortField;
use crate::tui::app::{App, Mode, Screen};
use crate::util::unicode::LineEditor;

pub(super) fn handle_projects(app: &mut App, key: KeyEvent) {
    let len = app.visible_projects().len();
    let view = &mut app.projects;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if view.cursor + 1 < len {
                view.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => view.cursor = view.cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => view.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => view.cursor = len.saturating_sub(1),
        KeyCode::Char('f') => {
            view.filter.status = cycle(&ProjectStatus::ALL, view.filter.status);
            view.cursor = 0;
        }
        KeyCode::Char('s') => {
            view.filter.sort_by = cycle(&SortField::ALL, view.filter.sort_by);
            view.cursor = 0;
        }
        KeyCode::Char('o') => view.filter.sort_order = view.filter.sort_order.reversed(),
        KeyCode::Char('/') => {
            view.search = LineEditor::with_text(view.filter.search.as_deref().unwrap_or(""));
            app.mode = Mode::Search;
        }
        KeyCode::Char('n') => app.screen = Screen::Notifications,
        KeyCode::Enter => {
            let selected = app
                .visible_projects()
                .get(app.projects.cursor)
                .map(|p| p.id.clone());
            if let Some(id) = selected {
                app.open_board(&id);
            }
        }
        _ => {}
    }
}

/// Live filter: every edit re-applies the search text.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    let view = &mut app.projects;
    match key.code {
        KeyCode::Esc => {
            view.search.clear();
            view.filter.search = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => app.mode = Mode::Navigate,
        _ => {
            if edit_line(&mut view.search, key) {
                let text = view.search.text();
                view.filter.search = (!text.trim().is_empty()).then(|| text.to_string());
                view.cursor = 0;
            }
        }
    }
}

/// Step through `all`, with `None` before the first and after the last.
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(c) => all
            .iter()
            .position(|&x| x == c)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}
