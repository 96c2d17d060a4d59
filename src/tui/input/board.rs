use crossterm::event::{KeyCode, KeyEvent};

use super::edit_line;
use crate::ops::kanban::{add_card, move_card};
use crate::tui::app::{App, Mode, Screen};

pub(super) fn handle_board(app: &mut App, key: KeyEvent) {
    let Some(board) = &mut app.board else {
        app.screen = Screen::Projects;
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            app.board = None;
            app.screen = Screen::Projects;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            board.column = board.column.saturating_sub(1);
            board.clamp();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            board.column = (board.column + 1).min(3);
            board.clamp();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if board.row + 1 < board.layout.column(board.status()).len() {
                board.row += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => board.row = board.row.saturating_sub(1),
        KeyCode::Char('>') => shift_column(app, true),
        KeyCode::Char('<') => shift_column(app, false),
        KeyCode::Char('J') => reorder(app, true),
        KeyCode::Char('K') => reorder(app, false),
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle(app),
        KeyCode::Char('d') => delete(app),
        KeyCode::Char('a') => {
            app.new_card.clear();
            app.mode = Mode::AddCard;
        }
        _ => {}
    }
}

/// Move the selected card into the neighbouring column, keeping its row.
fn shift_column(app: &mut App, forward: bool) {
    let Some(board) = &mut app.board else {
        return;
    };
    let Some(task_id) = board.selected_task_id().map(str::to_string) else {
        return;
    };
    let from = board.status();
    let Some(to) = (if forward { from.next() } else { from.prev() }) else {
        return;
    };
    let row = board.row;
    match move_card(
        &mut app.ws.store,
        &mut board.layout,
        &board.project_id,
        &task_id,
        to,
        row,
    ) {
        Ok(_) => board.select(&task_id),
        Err(e) => {
            app.message = Some(e.to_string());
            return;
        }
    }
    app.persist();
}

/// Swap the selected card with its neighbour in the same column.
fn reorder(app: &mut App, down: bool) {
    let Some(board) = &mut app.board else {
        return;
    };
    let Some(task_id) = board.selected_task_id().map(str::to_string) else {
        return;
    };
    let len = board.layout.column(board.status()).len();
    let target = if down {
        if board.row + 1 >= len {
            return;
        }
        board.row + 1
    } else {
        match board.row.checked_sub(1) {
            Some(row) => row,
            None => return,
        }
    };
    let status = board.status();
    if let Err(e) = move_card(
        &mut app.ws.store,
        &mut board.layout,
        &board.project_id,
        &task_id,
        status,
        target,
    ) {
        app.message = Some(e.to_string());
        return;
    }
    board.select(&task_id);
}

fn toggle(app: &mut App) {
    let Some(board) = &app.board else {
        return;
    };
    let Some(task_id) = board.selected_task_id().map(str::to_string) else {
        return;
    };
    let project_id = board.project_id.clone();
    if let Err(e) = app.ws.store.toggle_task(&project_id, &task_id) {
        app.message = Some(e.to_string());
        return;
    }
    app.refresh_board();
    if let Some(board) = &mut app.board {
        board.select(&task_id);
    }
    app.persist();
}

fn delete(app: &mut App) {
    let Some(board) = &app.board else {
        return;
    };
    let Some(task_id) = board.selected_task_id().map(str::to_string) else {
        return;
    };
    let project_id = board.project_id.clone();
    match app.ws.store.delete_task(&project_id, &task_id) {
        Ok(task) => app.message = Some(format!("Deleted {}", task.title)),
        Err(e) => {
            app.message = Some(e.to_string());
            return;
        }
    }
    app.refresh_board();
    app.persist();
}

/// Text entry for a new card in the focused column
pub(super) fn handle_add_card(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.new_card.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let title = app.new_card.text().trim().to_string();
            app.new_card.clear();
            app.mode = Mode::Navigate;
            if title.is_empty() {
                return;
            }
            let Some(board) = &mut app.board else {
                return;
            };
            let status = board.status();
            match add_card(
                &mut app.ws.store,
                &mut board.layout,
                &board.project_id,
                status,
                &title,
            ) {
                Ok(id) => board.select(&id),
                Err(e) => {
                    app.message = Some(e.to_string());
                    return;
                }
            }
            app.persist();
        }
        _ => {
            edit_line(&mut app.new_card, key);
        }
    }
}
